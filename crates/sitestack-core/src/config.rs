//! Deployment settings.
//!
//! Provides [`SiteSettings`] for configuring website hosting and distribution
//! provisioning. All fields default to the values baked into the publication
//! workflow; environment variables can override them via
//! [`SiteSettings::from_env`].

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Settings for website hosting and CDN provisioning.
///
/// # Examples
///
/// ```
/// use sitestack_core::config::SiteSettings;
///
/// let settings = SiteSettings::default();
/// assert_eq!(settings.index_document, "index.html");
/// assert_eq!(settings.default_ttl, 86_400);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    /// Index document served for directory requests (also the distribution's
    /// default root object).
    #[builder(default = String::from("index.html"))]
    pub index_document: String,

    /// Error document served for missing keys.
    #[builder(default = String::from("error.html"))]
    pub error_document: String,

    /// Default cache TTL for the distribution, in seconds.
    #[builder(default = 86_400)]
    pub default_ttl: i64,

    /// Minimum cache TTL for the distribution, in seconds.
    #[builder(default = 3_600)]
    pub min_ttl: i64,

    /// Seconds to sleep between distribution status checks.
    #[builder(default = 30)]
    pub deploy_poll_secs: u64,

    /// Number of status checks before the deployment wait gives up.
    #[builder(default = 50)]
    pub deploy_max_attempts: u32,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            index_document: String::from("index.html"),
            error_document: String::from("error.html"),
            default_ttl: 86_400,
            min_ttl: 3_600,
            deploy_poll_secs: 30,
            deploy_max_attempts: 50,
        }
    }
}

impl SiteSettings {
    /// Load settings from environment variables, falling back to defaults.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SITESTACK_INDEX_DOCUMENT` | `index.html` |
    /// | `SITESTACK_ERROR_DOCUMENT` | `error.html` |
    /// | `SITESTACK_DEFAULT_TTL` | `86400` |
    /// | `SITESTACK_MIN_TTL` | `3600` |
    /// | `SITESTACK_DEPLOY_POLL_SECS` | `30` |
    /// | `SITESTACK_DEPLOY_MAX_ATTEMPTS` | `50` |
    ///
    /// Unparsable numeric values fall back to the default rather than failing
    /// the command.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            index_document: env_string("SITESTACK_INDEX_DOCUMENT", defaults.index_document),
            error_document: env_string("SITESTACK_ERROR_DOCUMENT", defaults.error_document),
            default_ttl: env_parsed("SITESTACK_DEFAULT_TTL", defaults.default_ttl),
            min_ttl: env_parsed("SITESTACK_MIN_TTL", defaults.min_ttl),
            deploy_poll_secs: env_parsed("SITESTACK_DEPLOY_POLL_SECS", defaults.deploy_poll_secs),
            deploy_max_attempts: env_parsed(
                "SITESTACK_DEPLOY_MAX_ATTEMPTS",
                defaults.deploy_max_attempts,
            ),
        }
    }
}

fn env_string(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
