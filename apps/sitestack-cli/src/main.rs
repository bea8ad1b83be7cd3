//! sitestack - deploy static websites to AWS.
//!
//! ```text
//! sitestack setup-bucket www.example.com
//! sitestack sync ./public www.example.com
//! sitestack setup-domain www.example.com
//! sitestack setup-cdn www.example.com www.example.com
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter |
//! | `SITESTACK_*` | *(see core settings)* | Hosting/CDN setting overrides |

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sitestack_core::bucket::BucketManager;
use sitestack_core::workflow::{self, CdnOutcome};
use sitestack_core::{AwsContext, DeployError, SiteSettings};

#[derive(Parser)]
#[command(name = "sitestack")]
#[command(about = "Deploy static websites to AWS", long_about = None)]
struct Cli {
    /// AWS credential profile to use
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all buckets
    ListBuckets,

    /// List objects in a bucket
    ListBucketObjects {
        /// Bucket to list
        bucket: String,
    },

    /// Create and configure a bucket for static website hosting
    SetupBucket {
        /// Bucket to create or reuse
        bucket: String,
    },

    /// Mirror the contents of a local directory into a bucket
    Sync {
        /// Local directory to upload
        pathname: PathBuf,
        /// Destination bucket
        bucket: String,
    },

    /// Point a domain at its bucket's website endpoint
    SetupDomain {
        /// Domain (and bucket) name, e.g. www.example.com
        domain: String,
    },

    /// Find the certificate matching a domain
    FindCert {
        /// Domain to match
        domain: String,
    },

    /// Provision a CDN distribution and DNS alias for a domain
    SetupCdn {
        /// Domain to serve
        domain: String,
        /// Bucket holding the site content
        bucket: String,
    },

    /// Find the distribution matching a domain
    FindDist {
        /// Domain to match
        domain: String,
    },
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` when set, otherwise keeps this tool's own spans at `info`
/// and everything else at `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sitestack=info,sitestack_core=info,warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let ctx = AwsContext::from_profile(cli.profile.as_deref()).await;
    let settings = SiteSettings::from_env();

    run_command(&ctx, &settings, cli.command).await
}

async fn run_command(ctx: &AwsContext, settings: &SiteSettings, command: Commands) -> Result<()> {
    match command {
        Commands::ListBuckets => {
            let buckets = BucketManager::new(ctx.s3().clone(), ctx.region());
            for name in buckets.list_buckets().await? {
                println!("{name}");
            }
        }
        Commands::ListBucketObjects { bucket } => {
            let buckets = BucketManager::new(ctx.s3().clone(), ctx.region());
            for key in buckets.list_objects(&bucket).await? {
                println!("{key}");
            }
        }
        Commands::SetupBucket { bucket } => {
            let bucket = workflow::setup_bucket(ctx, settings, &bucket).await?;
            println!("Bucket configured for website hosting: {}", bucket.name);
        }
        Commands::Sync { pathname, bucket } => {
            let report = workflow::sync_site(ctx, &pathname, &bucket).await?;
            println!(
                "Uploaded {} object(s) to {bucket}",
                report.uploaded.len()
            );
            println!("{}", report.website_url);
        }
        Commands::SetupDomain { domain } => {
            let url = workflow::setup_domain(ctx, &domain).await?;
            println!("Domain configured: {url}");
        }
        Commands::FindCert { domain } => {
            if let Some(cert) = workflow::find_cert(ctx, &domain).await? {
                println!("{}", cert.arn);
            }
        }
        Commands::SetupCdn { domain, bucket } => {
            match workflow::setup_cdn(ctx, settings, &domain, &bucket).await {
                Ok(CdnOutcome::AlreadyProvisioned { distribution }) => {
                    println!(
                        "Distribution {} already serves {domain}",
                        distribution.id
                    );
                }
                Ok(CdnOutcome::Provisioned { url, .. }) => {
                    println!("Domain configured: {url}");
                }
                // The one failure reported as plain output rather than an
                // error exit: nothing was created, there is nothing to retry.
                Err(DeployError::NoMatchingCertificate { domain }) => {
                    eprintln!("Error: no matching certificate found for {domain}");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::FindDist { domain } => {
            if let Some(dist) = workflow::find_dist(ctx, &domain).await? {
                println!("{}\t{}\t{}", dist.id, dist.domain_name, dist.status);
            }
        }
    }

    Ok(())
}
