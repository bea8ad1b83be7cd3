//! Route 53 zone lookup and alias records.
//!
//! Alias records resolve to another AWS resource's endpoint instead of a
//! literal address, which is how both flows bind a domain: the bucket-direct
//! flow targets the regional S3 website endpoint, the CDN flow targets the
//! distribution's domain under CloudFront's fixed hosted zone.

use aws_sdk_route53::types::{
    AliasTarget, Change, ChangeAction, ChangeBatch, ResourceRecordSet, RrType,
};
use tracing::{debug, info};

use crate::error::Result;
use crate::utils::normalize_zone_id;

/// A hosted zone covering some suffix of the managed domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedZone {
    /// Zone id with the `/hostedzone/` listing prefix stripped.
    pub id: String,
    /// Zone name, including the trailing dot Route 53 reports.
    pub name: String,
}

/// An alias target: the hosted zone and host name of the resource a record
/// should resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTarget {
    /// Hosted-zone id of the target resource's endpoint.
    pub zone_id: String,
    /// Host name of the target resource's endpoint.
    pub host: String,
}

/// Manages Route 53 hosted zones and alias records.
#[derive(Debug, Clone)]
pub struct DomainManager {
    client: aws_sdk_route53::Client,
}

impl DomainManager {
    /// Create a manager over a Route 53 client.
    #[must_use]
    pub fn new(client: aws_sdk_route53::Client) -> Self {
        Self { client }
    }

    /// Find the most specific hosted zone covering `domain`.
    ///
    /// Pages through every zone in the account; among the zones whose name is
    /// a suffix of `domain` on a label boundary, the longest name wins. With
    /// zones for both `example.com.` and `sub.example.com.`, looking up
    /// `www.sub.example.com` selects `sub.example.com.`.
    pub async fn find_hosted_zone(&self, domain: &str) -> Result<Option<HostedZone>> {
        let mut best: Option<HostedZone> = None;

        let mut pages = self.client.list_hosted_zones().into_paginator().send();
        while let Some(page) = pages.next().await {
            let page = page.map_err(aws_sdk_route53::Error::from)?;
            for zone in page.hosted_zones() {
                if !zone_covers(zone.name(), domain) {
                    continue;
                }
                if best
                    .as_ref()
                    .is_none_or(|b| zone.name().len() > b.name.len())
                {
                    best = Some(HostedZone {
                        id: normalize_zone_id(zone.id()).to_owned(),
                        name: zone.name().to_owned(),
                    });
                }
            }
        }

        if let Some(zone) = &best {
            debug!(zone = %zone.name, %domain, "hosted zone matched");
        }
        Ok(best)
    }

    /// UPSERT an `A` alias record pointing `domain` at `target`.
    ///
    /// UPSERT makes this idempotent: re-running with the same inputs is a
    /// no-op change. Target health evaluation is disabled.
    pub async fn upsert_alias_record(
        &self,
        zone: &HostedZone,
        domain: &str,
        target: &RecordTarget,
    ) -> Result<()> {
        let alias = AliasTarget::builder()
            .hosted_zone_id(&target.zone_id)
            .dns_name(&target.host)
            .evaluate_target_health(false)
            .build()?;

        let record = ResourceRecordSet::builder()
            .name(domain)
            .r#type(RrType::A)
            .alias_target(alias)
            .build()?;

        let change = Change::builder()
            .action(ChangeAction::Upsert)
            .resource_record_set(record)
            .build()?;

        self.client
            .change_resource_record_sets()
            .hosted_zone_id(&zone.id)
            .change_batch(ChangeBatch::builder().changes(change).build()?)
            .send()
            .await
            .map_err(aws_sdk_route53::Error::from)?;

        info!(%domain, zone = %zone.name, host = %target.host, "upserted alias record");
        Ok(())
    }
}

/// Whether a zone named `zone_name` (with its trailing dot) covers `domain`.
///
/// The zone's name minus the trailing dot must equal `domain` or be a
/// `.`-separated suffix of it; `badexample.com` is not covered by
/// `example.com.`.
#[must_use]
pub fn zone_covers(zone_name: &str, domain: &str) -> bool {
    let zone = zone_name.trim_end_matches('.');
    domain == zone || domain.ends_with(&format!(".{zone}"))
}
