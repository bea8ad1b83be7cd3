//! Authenticated AWS client context.
//!
//! [`AwsContext`] bundles the service clients a deployment needs. It is built
//! once at startup (optionally from a named credential profile) and passed by
//! reference into each workflow function; nothing in this crate holds global
//! state.

use aws_config::BehaviorVersion;

/// The default region assumed when the shared config resolves none.
const FALLBACK_REGION: &str = "us-east-1";

/// Clients for the services a deployment touches, plus the session region.
#[derive(Debug, Clone)]
pub struct AwsContext {
    s3: aws_sdk_s3::Client,
    route53: aws_sdk_route53::Client,
    cloudfront: aws_sdk_cloudfront::Client,
    acm: aws_sdk_acm::Client,
    region: String,
}

impl AwsContext {
    /// Build a context from the default credential chain.
    ///
    /// When `profile` is given, credentials and region come from that named
    /// profile; otherwise the usual environment/instance chain applies. Falls
    /// back to `us-east-1` when no region is configured anywhere.
    pub async fn from_profile(profile: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let shared = loader.load().await;
        let region = shared
            .region()
            .map_or_else(|| FALLBACK_REGION.to_owned(), |r| r.as_ref().to_owned());

        tracing::debug!(%region, profile = profile.unwrap_or("<default>"), "loaded AWS session");

        Self {
            s3: aws_sdk_s3::Client::new(&shared),
            route53: aws_sdk_route53::Client::new(&shared),
            cloudfront: aws_sdk_cloudfront::Client::new(&shared),
            acm: aws_sdk_acm::Client::new(&shared),
            region,
        }
    }

    /// Build a context from preconfigured clients.
    ///
    /// Used by tests to point the managers at a local endpoint.
    #[must_use]
    pub fn new(
        s3: aws_sdk_s3::Client,
        route53: aws_sdk_route53::Client,
        cloudfront: aws_sdk_cloudfront::Client,
        acm: aws_sdk_acm::Client,
        region: impl Into<String>,
    ) -> Self {
        Self {
            s3,
            route53,
            cloudfront,
            acm,
            region: region.into(),
        }
    }

    /// The S3 client.
    #[must_use]
    pub fn s3(&self) -> &aws_sdk_s3::Client {
        &self.s3
    }

    /// The Route 53 client.
    #[must_use]
    pub fn route53(&self) -> &aws_sdk_route53::Client {
        &self.route53
    }

    /// The CloudFront client.
    #[must_use]
    pub fn cloudfront(&self) -> &aws_sdk_cloudfront::Client {
        &self.cloudfront
    }

    /// The ACM client.
    #[must_use]
    pub fn acm(&self) -> &aws_sdk_acm::Client {
        &self.acm
    }

    /// The region the session resolved to.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}
