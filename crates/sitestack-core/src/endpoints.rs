//! Region endpoint table for S3 static-website hosting.
//!
//! S3 website endpoints are plain HTTP hosts with a per-region alias
//! hosted-zone id that Route 53 needs when creating alias records. The table
//! below covers the regions where S3 website hosting is offered under the
//! classic endpoint scheme; regions not listed cannot be targeted by the
//! bucket-direct flow.

/// An S3 static-website endpoint for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebsiteEndpoint {
    /// Endpoint host name, e.g. `s3-website-us-east-1.amazonaws.com`.
    pub host: &'static str,
    /// Hosted-zone id Route 53 alias records must reference for this host.
    pub zone_id: &'static str,
}

/// Hosted-zone id shared by every CloudFront distribution alias target.
pub const CLOUDFRONT_ZONE_ID: &str = "Z2FDTNDATAQYW2";

/// Region name → website endpoint. Ordering is irrelevant; lookup is by key.
const ENDPOINTS: &[(&str, WebsiteEndpoint)] = &[
    (
        "us-east-1",
        WebsiteEndpoint {
            host: "s3-website-us-east-1.amazonaws.com",
            zone_id: "Z3AQBSTGFYJSTF",
        },
    ),
    (
        "us-east-2",
        WebsiteEndpoint {
            host: "s3-website.us-east-2.amazonaws.com",
            zone_id: "Z2O1EMRO9K5GLX",
        },
    ),
    (
        "us-west-1",
        WebsiteEndpoint {
            host: "s3-website-us-west-1.amazonaws.com",
            zone_id: "Z2F56UZL2M1ACD",
        },
    ),
    (
        "us-west-2",
        WebsiteEndpoint {
            host: "s3-website-us-west-2.amazonaws.com",
            zone_id: "Z3BJ6K6RIION7M",
        },
    ),
    (
        "ca-central-1",
        WebsiteEndpoint {
            host: "s3-website.ca-central-1.amazonaws.com",
            zone_id: "Z1QDHH18159H29",
        },
    ),
    (
        "eu-west-1",
        WebsiteEndpoint {
            host: "s3-website-eu-west-1.amazonaws.com",
            zone_id: "Z1BKCTXD74EZPE",
        },
    ),
    (
        "eu-west-2",
        WebsiteEndpoint {
            host: "s3-website.eu-west-2.amazonaws.com",
            zone_id: "Z3GKZC51ZF0DB4",
        },
    ),
    (
        "eu-west-3",
        WebsiteEndpoint {
            host: "s3-website.eu-west-3.amazonaws.com",
            zone_id: "Z3R1K369G5AVDG",
        },
    ),
    (
        "eu-central-1",
        WebsiteEndpoint {
            host: "s3-website.eu-central-1.amazonaws.com",
            zone_id: "Z21DNDUVLTQW6Q",
        },
    ),
    (
        "eu-north-1",
        WebsiteEndpoint {
            host: "s3-website.eu-north-1.amazonaws.com",
            zone_id: "Z3BAZG2TWCNX0D",
        },
    ),
    (
        "ap-south-1",
        WebsiteEndpoint {
            host: "s3-website.ap-south-1.amazonaws.com",
            zone_id: "Z11RGJOFQNVJUP",
        },
    ),
    (
        "ap-northeast-1",
        WebsiteEndpoint {
            host: "s3-website-ap-northeast-1.amazonaws.com",
            zone_id: "Z2M4EHUR26P7ZW",
        },
    ),
    (
        "ap-northeast-2",
        WebsiteEndpoint {
            host: "s3-website.ap-northeast-2.amazonaws.com",
            zone_id: "Z3W03O7B5YMIYP",
        },
    ),
    (
        "ap-southeast-1",
        WebsiteEndpoint {
            host: "s3-website-ap-southeast-1.amazonaws.com",
            zone_id: "Z3O0J2DXBE1FTB",
        },
    ),
    (
        "ap-southeast-2",
        WebsiteEndpoint {
            host: "s3-website-ap-southeast-2.amazonaws.com",
            zone_id: "Z1WCIGYICN2BYD",
        },
    ),
    (
        "sa-east-1",
        WebsiteEndpoint {
            host: "s3-website-sa-east-1.amazonaws.com",
            zone_id: "Z7KQH4QJS55SO",
        },
    ),
];

/// Look up the website endpoint for a region.
///
/// # Examples
///
/// ```
/// use sitestack_core::endpoints::website_endpoint;
///
/// let endpoint = website_endpoint("us-east-1").unwrap();
/// assert_eq!(endpoint.host, "s3-website-us-east-1.amazonaws.com");
/// assert!(website_endpoint("mars-north-1").is_none());
/// ```
#[must_use]
pub fn website_endpoint(region: &str) -> Option<WebsiteEndpoint> {
    ENDPOINTS
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, endpoint)| *endpoint)
}
