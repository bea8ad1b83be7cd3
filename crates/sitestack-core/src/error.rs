//! Deployment error types.
//!
//! Defines [`DeployError`], the error enum shared by every manager and
//! workflow in this crate. Collaborator failures are wrapped per service so a
//! call site's failure modes stay visible in its signature; local conditions
//! (missing certificate, exhausted deployment wait, unknown region) get their
//! own variants.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DeployError>;

/// Error type for all deployment operations.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// No issued ACM certificate covers the requested domain.
    #[error("no issued certificate matches domain {domain}")]
    NoMatchingCertificate {
        /// The domain that was being provisioned.
        domain: String,
    },

    /// A distribution did not reach the deployed state within the poll limit.
    #[error("distribution {id} not deployed after {attempts} status checks")]
    DeploymentTimeout {
        /// The distribution id that was being waited on.
        id: String,
        /// Number of status checks performed before giving up.
        attempts: u32,
    },

    /// No hosted zone in the account covers the requested domain.
    #[error("no hosted zone found for domain {domain}")]
    HostedZoneNotFound {
        /// The domain that was being bound.
        domain: String,
    },

    /// The bucket's region has no known static-website endpoint.
    #[error("no static-website endpoint known for region {region}")]
    UnsupportedRegion {
        /// The region reported for the bucket.
        region: String,
    },

    /// A local file could not be read for upload.
    #[error("failed to read {path}: {source}")]
    FileRead {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A local directory could not be traversed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// The directory that could not be traversed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A collaborator response was missing a descriptor it is documented to carry.
    #[error("response was missing the {field} field")]
    IncompleteResponse {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A request could not be assembled from the given parameters.
    #[error("invalid request parameters: {0}")]
    Build(#[from] aws_smithy_types::error::operation::BuildError),

    /// An S3 request failed.
    #[error("S3 request failed: {0}")]
    S3(#[from] aws_sdk_s3::Error),

    /// A Route 53 request failed.
    #[error("Route 53 request failed: {0}")]
    Route53(#[from] aws_sdk_route53::Error),

    /// A CloudFront request failed.
    #[error("CloudFront request failed: {0}")]
    CloudFront(#[from] aws_sdk_cloudfront::Error),

    /// An ACM request failed.
    #[error("ACM request failed: {0}")]
    Acm(#[from] aws_sdk_acm::Error),
}
