//! Static-website deployment to AWS.
//!
//! This crate automates the path from a local directory to a domain serving
//! HTTPS content: it creates and configures an S3 bucket for static hosting,
//! mirrors local files into it, binds the domain in Route 53, and provisions
//! a CloudFront distribution backed by an ACM certificate.
//!
//! # Architecture
//!
//! ```text
//! sitestack CLI (clap)
//!        |
//!        v
//! workflow (publication flows: bucket-direct, CDN)
//!        |
//!        v
//! managers (BucketManager, DomainManager, DistributionManager, CertificateManager)
//!        |
//!        v
//! AwsContext (S3 / Route 53 / CloudFront / ACM clients)
//! ```
//!
//! Every cloud operation returns a [`DeployError`]-carrying `Result`; the only
//! error recovered internally is the bucket-already-owned case during bucket
//! creation. Everything else propagates to the caller unchanged.

pub mod bucket;
pub mod cdn;
pub mod cert;
pub mod config;
pub mod context;
pub mod dns;
pub mod endpoints;
pub mod error;
pub mod utils;
pub mod walk;
pub mod workflow;

pub use config::SiteSettings;
pub use context::AwsContext;
pub use error::{DeployError, Result};
