//! CloudFront distribution management.
//!
//! One distribution per domain: lookup is by exact alias match, creation
//! binds the domain's bucket origin to an ACM certificate, and deployment is
//! awaited with a bounded fixed-interval poll.

use std::time::Duration;

use aws_sdk_cloudfront::types::{
    Aliases, CookiePreference, CustomErrorResponse, CustomErrorResponses, DefaultCacheBehavior,
    DistributionConfig, ForwardedValues, Headers, ItemSelection, MinimumProtocolVersion, Origin,
    Origins, QueryStringCacheKeys, S3OriginConfig, SslSupportMethod, TrustedSigners,
    ViewerCertificate, ViewerProtocolPolicy,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SiteSettings;
use crate::error::{DeployError, Result};

/// Domain suffix of S3 bucket origins.
const S3_ORIGIN_SUFFIX: &str = "s3.amazonaws.com";

/// Distribution status value reported once deployment has finished.
const STATUS_DEPLOYED: &str = "Deployed";

/// A CloudFront distribution as this tool sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Opaque distribution id.
    pub id: String,
    /// The `*.cloudfront.net` host serving the distribution.
    pub domain_name: String,
    /// Deployment status string (`InProgress` until deployed).
    pub status: String,
    /// Domain aliases bound to the distribution.
    pub aliases: Vec<String>,
}

impl Distribution {
    /// Whether the distribution has finished deploying.
    #[must_use]
    pub fn is_deployed(&self) -> bool {
        self.status == STATUS_DEPLOYED
    }
}

/// Manages CloudFront distributions for website domains.
#[derive(Debug, Clone)]
pub struct DistributionManager {
    client: aws_sdk_cloudfront::Client,
}

impl DistributionManager {
    /// Create a manager over a CloudFront client.
    #[must_use]
    pub fn new(client: aws_sdk_cloudfront::Client) -> Self {
        Self { client }
    }

    /// Find the distribution whose alias list contains exactly `domain`.
    ///
    /// Pages through every distribution in the account; no partial or
    /// wildcard matching.
    pub async fn find_distribution(&self, domain: &str) -> Result<Option<Distribution>> {
        let mut pages = self.client.list_distributions().into_paginator().send();
        while let Some(page) = pages.next().await {
            let page = page.map_err(aws_sdk_cloudfront::Error::from)?;
            let Some(list) = page.distribution_list() else {
                continue;
            };
            for summary in list.items() {
                let aliases: Vec<String> = summary
                    .aliases()
                    .map(|a| a.items().to_vec())
                    .unwrap_or_default();
                if aliases.iter().any(|alias| alias == domain) {
                    return Ok(Some(Distribution {
                        id: summary.id().to_owned(),
                        domain_name: summary.domain_name().to_owned(),
                        status: summary.status().to_owned(),
                        aliases,
                    }));
                }
            }
        }
        Ok(None)
    }

    /// Create a distribution serving `domain` from its bucket origin, bound
    /// to the certificate at `cert_arn`.
    ///
    /// The request shape is fixed: redirect-to-HTTPS viewer policy, SNI
    /// certificate binding, a 403 → `/index.html` rewrite so single-page
    /// applications can route client-side, and the TTLs from `settings`.
    /// Returns immediately; deployment continues asynchronously.
    pub async fn create_distribution(
        &self,
        domain: &str,
        cert_arn: &str,
        settings: &SiteSettings,
    ) -> Result<Distribution> {
        let origin_id = origin_id(domain);

        let origin = Origin::builder()
            .id(&origin_id)
            .domain_name(origin_domain(domain))
            .s3_origin_config(S3OriginConfig::builder().origin_access_identity("").build())
            .build()?;

        let behavior = DefaultCacheBehavior::builder()
            .target_origin_id(&origin_id)
            .viewer_protocol_policy(ViewerProtocolPolicy::RedirectToHttps)
            .trusted_signers(TrustedSigners::builder().enabled(false).quantity(0).build()?)
            .forwarded_values(
                ForwardedValues::builder()
                    .query_string(false)
                    .cookies(
                        CookiePreference::builder()
                            .forward(ItemSelection::All)
                            .build()?,
                    )
                    .headers(Headers::builder().quantity(0).build()?)
                    .query_string_cache_keys(QueryStringCacheKeys::builder().quantity(0).build()?)
                    .build()?,
            )
            .default_ttl(settings.default_ttl)
            .min_ttl(settings.min_ttl)
            .build()?;

        let config = DistributionConfig::builder()
            .caller_reference(Uuid::new_v4().to_string())
            .comment("")
            .enabled(true)
            .default_root_object(&settings.index_document)
            .aliases(Aliases::builder().quantity(1).items(domain).build()?)
            .origins(Origins::builder().quantity(1).items(origin).build()?)
            .default_cache_behavior(behavior)
            .viewer_certificate(
                ViewerCertificate::builder()
                    .acm_certificate_arn(cert_arn)
                    .ssl_support_method(SslSupportMethod::SniOnly)
                    .minimum_protocol_version(MinimumProtocolVersion::TlSv112016)
                    .build(),
            )
            .custom_error_responses(
                CustomErrorResponses::builder()
                    .quantity(1)
                    .items(
                        CustomErrorResponse::builder()
                            .error_code(403)
                            .response_page_path(format!("/{}", settings.index_document))
                            .response_code("200")
                            .build()?,
                    )
                    .build()?,
            )
            .build()?;

        let resp = self
            .client
            .create_distribution()
            .distribution_config(config)
            .send()
            .await
            .map_err(aws_sdk_cloudfront::Error::from)?;

        let dist = resp
            .distribution()
            .ok_or(DeployError::IncompleteResponse {
                field: "Distribution",
            })?;

        info!(id = %dist.id(), %domain, "created distribution");
        Ok(Distribution {
            id: dist.id().to_owned(),
            domain_name: dist.domain_name().to_owned(),
            status: dist.status().to_owned(),
            aliases: vec![domain.to_owned()],
        })
    }

    /// Block until the distribution with `id` reports `Deployed`.
    ///
    /// Polls every `settings.deploy_poll_secs` seconds for up to
    /// `settings.deploy_max_attempts` checks (25 minutes at the defaults),
    /// then fails with [`DeployError::DeploymentTimeout`].
    pub async fn await_deployment(&self, id: &str, settings: &SiteSettings) -> Result<()> {
        for attempt in 1..=settings.deploy_max_attempts {
            let resp = self
                .client
                .get_distribution()
                .id(id)
                .send()
                .await
                .map_err(aws_sdk_cloudfront::Error::from)?;

            let status = resp
                .distribution()
                .ok_or(DeployError::IncompleteResponse {
                    field: "Distribution",
                })?
                .status();

            if status == STATUS_DEPLOYED {
                info!(%id, attempt, "distribution deployed");
                return Ok(());
            }

            debug!(%id, attempt, %status, "distribution still deploying");
            if attempt < settings.deploy_max_attempts {
                tokio::time::sleep(Duration::from_secs(settings.deploy_poll_secs)).await;
            }
        }

        Err(DeployError::DeploymentTimeout {
            id: id.to_owned(),
            attempts: settings.deploy_max_attempts,
        })
    }
}

/// The origin id CloudFront configuration uses for a domain's bucket.
#[must_use]
pub fn origin_id(domain: &str) -> String {
    format!("S3-{domain}")
}

/// The origin host for a domain's bucket.
#[must_use]
pub fn origin_domain(domain: &str) -> String {
    format!("{domain}.{S3_ORIGIN_SUFFIX}")
}
