//! Publication workflows.
//!
//! Two independent end-to-end flows take a local directory to a domain
//! serving content: the bucket-direct flow (HTTP via the S3 website
//! endpoint) and the CDN flow (HTTPS via CloudFront). Each function builds
//! its managers from the [`AwsContext`] it is handed and sequences their
//! calls; no state outlives the call.

use std::path::Path;

use tracing::info;

use crate::bucket::{self, Bucket, BucketManager};
use crate::cdn::{Distribution, DistributionManager};
use crate::cert::{Certificate, CertificateManager};
use crate::config::SiteSettings;
use crate::context::AwsContext;
use crate::dns::{DomainManager, RecordTarget};
use crate::endpoints::{CLOUDFRONT_ZONE_ID, website_endpoint};
use crate::error::{DeployError, Result};

/// Result of mirroring a directory into a bucket.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Object keys uploaded, in upload order.
    pub uploaded: Vec<String>,
    /// The bucket's public website URL.
    pub website_url: String,
}

/// Result of the CDN flow.
#[derive(Debug, Clone)]
pub enum CdnOutcome {
    /// A distribution already carried the domain alias; nothing was changed.
    AlreadyProvisioned {
        /// The existing distribution.
        distribution: Distribution,
    },
    /// A distribution was created, deployed, and bound in DNS.
    Provisioned {
        /// The new distribution.
        distribution: Distribution,
        /// The HTTPS URL now serving the domain.
        url: String,
    },
}

/// Create-or-get `name` and configure it for public website hosting.
pub async fn setup_bucket(
    ctx: &AwsContext,
    settings: &SiteSettings,
    name: &str,
) -> Result<Bucket> {
    let buckets = BucketManager::new(ctx.s3().clone(), ctx.region());

    let bucket = buckets.ensure_bucket(name).await?;
    buckets.set_public_policy(&bucket).await?;
    buckets.enable_website_hosting(&bucket, settings).await?;

    Ok(bucket)
}

/// Mirror the directory at `path` into `bucket` and report the website URL.
pub async fn sync_site(ctx: &AwsContext, path: &Path, bucket: &str) -> Result<SyncReport> {
    let buckets = BucketManager::new(ctx.s3().clone(), ctx.region());

    let uploaded = buckets.sync(path, bucket).await?;
    let region = buckets.bucket_region(bucket).await?;
    let website_url = bucket::website_url(bucket, &region)?;

    Ok(SyncReport {
        uploaded,
        website_url,
    })
}

/// Bind `domain`'s DNS alias to its bucket's website endpoint.
///
/// The bucket is expected to carry the domain's name; its region selects the
/// website endpoint the alias record targets.
pub async fn setup_domain(ctx: &AwsContext, domain: &str) -> Result<String> {
    let buckets = BucketManager::new(ctx.s3().clone(), ctx.region());
    let domains = DomainManager::new(ctx.route53().clone());

    let region = buckets.bucket_region(domain).await?;
    let endpoint = website_endpoint(&region).ok_or_else(|| DeployError::UnsupportedRegion {
        region: region.clone(),
    })?;

    let zone = domains
        .find_hosted_zone(domain)
        .await?
        .ok_or_else(|| DeployError::HostedZoneNotFound {
            domain: domain.to_owned(),
        })?;

    let target = RecordTarget {
        zone_id: endpoint.zone_id.to_owned(),
        host: endpoint.host.to_owned(),
    };
    domains.upsert_alias_record(&zone, domain, &target).await?;

    Ok(format!("http://{domain}"))
}

/// Find the issued certificate covering `domain`, if any.
pub async fn find_cert(ctx: &AwsContext, domain: &str) -> Result<Option<Certificate>> {
    CertificateManager::new(ctx.acm().clone())
        .find_matching_cert(domain)
        .await
}

/// Find the distribution aliased to `domain`, if any.
pub async fn find_dist(ctx: &AwsContext, domain: &str) -> Result<Option<Distribution>> {
    DistributionManager::new(ctx.cloudfront().clone())
        .find_distribution(domain)
        .await
}

/// Idempotently provision a CloudFront distribution and DNS alias for
/// `domain`, served from `bucket`.
///
/// When a distribution already carries the alias, the flow stops there: the
/// DNS record and bucket contents are not re-verified. Otherwise a matching
/// certificate is required up front; without one the flow aborts with
/// [`DeployError::NoMatchingCertificate`] before anything is created.
pub async fn setup_cdn(
    ctx: &AwsContext,
    settings: &SiteSettings,
    domain: &str,
    bucket: &str,
) -> Result<CdnOutcome> {
    let distributions = DistributionManager::new(ctx.cloudfront().clone());

    if let Some(distribution) = distributions.find_distribution(domain).await? {
        info!(
            %domain,
            id = %distribution.id,
            "distribution already exists, leaving it untouched"
        );
        return Ok(CdnOutcome::AlreadyProvisioned { distribution });
    }

    let cert = find_cert(ctx, domain)
        .await?
        .ok_or_else(|| DeployError::NoMatchingCertificate {
            domain: domain.to_owned(),
        })?;

    let distribution = distributions
        .create_distribution(domain, &cert.arn, settings)
        .await?;

    info!(id = %distribution.id, "waiting for distribution deployment");
    distributions
        .await_deployment(&distribution.id, settings)
        .await?;

    let domains = DomainManager::new(ctx.route53().clone());
    let zone = domains
        .find_hosted_zone(domain)
        .await?
        .ok_or_else(|| DeployError::HostedZoneNotFound {
            domain: domain.to_owned(),
        })?;

    let target = RecordTarget {
        zone_id: CLOUDFRONT_ZONE_ID.to_owned(),
        host: distribution.domain_name.clone(),
    };
    domains.upsert_alias_record(&zone, domain, &target).await?;

    info!(%domain, %bucket, "domain now served through CloudFront");
    Ok(CdnOutcome::Provisioned {
        distribution,
        url: format!("https://{domain}"),
    })
}
