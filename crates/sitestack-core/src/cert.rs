//! ACM certificate lookup.
//!
//! A distribution can only bind a certificate that covers its alias, so the
//! CDN flow locates an issued certificate whose subject-alternative names
//! match the domain, either exactly or through a wildcard.

use aws_sdk_acm::types::CertificateStatus;
use tracing::debug;

use crate::error::Result;

/// A certificate that matched a domain lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// The certificate's ARN.
    pub arn: String,
    /// The certificate's primary domain name, when reported.
    pub domain_name: Option<String>,
}

/// Locates issued ACM certificates by domain.
#[derive(Debug, Clone)]
pub struct CertificateManager {
    client: aws_sdk_acm::Client,
}

impl CertificateManager {
    /// Create a manager over an ACM client.
    ///
    /// CloudFront only accepts certificates from `us-east-1`, so the client
    /// passed here should be bound to that region when the result feeds a
    /// distribution.
    #[must_use]
    pub fn new(client: aws_sdk_acm::Client) -> Self {
        Self { client }
    }

    /// Find the first issued certificate covering `domain`.
    ///
    /// Pages through issued certificates and inspects each one's
    /// subject-alternative names; the first certificate with a matching name
    /// wins. Returns `None` when nothing matches.
    pub async fn find_matching_cert(&self, domain: &str) -> Result<Option<Certificate>> {
        let mut pages = self
            .client
            .list_certificates()
            .certificate_statuses(CertificateStatus::Issued)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(aws_sdk_acm::Error::from)?;
            for summary in page.certificate_summary_list() {
                let Some(arn) = summary.certificate_arn() else {
                    continue;
                };
                if self.cert_matches(arn, domain).await? {
                    debug!(%arn, %domain, "certificate matched");
                    return Ok(Some(Certificate {
                        arn: arn.to_owned(),
                        domain_name: summary.domain_name().map(ToOwned::to_owned),
                    }));
                }
            }
        }

        Ok(None)
    }

    /// Whether the certificate at `arn` covers `domain`.
    async fn cert_matches(&self, arn: &str, domain: &str) -> Result<bool> {
        let resp = self
            .client
            .describe_certificate()
            .certificate_arn(arn)
            .send()
            .await
            .map_err(aws_sdk_acm::Error::from)?;

        let Some(detail) = resp.certificate() else {
            return Ok(false);
        };

        Ok(detail
            .subject_alternative_names()
            .iter()
            .any(|name| san_matches(name, domain)))
    }
}

/// Whether a single subject-alternative name covers `domain`.
///
/// Exact names must match exactly; a wildcard name `*.suffix` covers any
/// domain ending in `.suffix` (including deeper labels), but never the bare
/// suffix itself.
#[must_use]
pub fn san_matches(name: &str, domain: &str) -> bool {
    if name == domain {
        return true;
    }
    if let Some(suffix) = name.strip_prefix('*') {
        return domain.ends_with(suffix);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::san_matches;

    #[test]
    fn exact_name_matches_only_itself() {
        assert!(san_matches("www.example.com", "www.example.com"));
        assert!(!san_matches("www.example.com", "example.com"));
        assert!(!san_matches("www.example.com", "wwww.example.com"));
    }

    #[test]
    fn wildcard_covers_subdomains() {
        assert!(san_matches("*.example.com", "foo.example.com"));
        assert!(san_matches("*.example.com", "foo.bar.example.com"));
    }

    #[test]
    fn wildcard_does_not_cover_the_bare_apex() {
        assert!(!san_matches("*.example.com", "example.com"));
    }

    #[test]
    fn wildcard_requires_the_dot_boundary() {
        assert!(!san_matches("*.example.com", "badexample.com"));
    }
}
