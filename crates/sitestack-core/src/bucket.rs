//! S3 bucket management for static-website hosting.
//!
//! [`BucketManager`] covers the storage half of a deployment: create-or-get a
//! bucket, attach the public-read policy, enable website hosting, and mirror
//! a local directory into it. Uploads happen strictly one at a time in walk
//! order; nothing is deleted and nothing is skipped.

use std::path::Path;

use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, ErrorDocument, IndexDocument,
    WebsiteConfiguration,
};
use tracing::{debug, info};

use crate::config::SiteSettings;
use crate::endpoints::website_endpoint;
use crate::error::{DeployError, Result};
use crate::utils::content_type_for_key;
use crate::walk::walk_files;

/// Handle to a bucket that exists and is owned by this account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Globally-unique bucket name.
    pub name: String,
}

/// Manages S3 buckets used for website hosting.
#[derive(Debug, Clone)]
pub struct BucketManager {
    client: aws_sdk_s3::Client,
    region: String,
}

impl BucketManager {
    /// Create a manager over an S3 client bound to `region`.
    #[must_use]
    pub fn new(client: aws_sdk_s3::Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    /// List the names of every bucket owned by the account.
    pub async fn list_buckets(&self) -> Result<Vec<String>> {
        let resp = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;

        Ok(resp
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(ToOwned::to_owned))
            .collect())
    }

    /// List every object key in `bucket`.
    pub async fn list_objects(&self, bucket: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token = None;
        loop {
            let mut req = self.client.list_objects_v2().bucket(bucket);
            if let Some(token) = continuation_token.take() {
                req = req.continuation_token(token);
            }
            let resp = req.send().await.map_err(aws_sdk_s3::Error::from)?;

            keys.extend(
                resp.contents()
                    .iter()
                    .filter_map(|o| o.key().map(ToOwned::to_owned)),
            );

            if resp.is_truncated() == Some(true) {
                continuation_token = resp.next_continuation_token().map(ToOwned::to_owned);
            } else {
                break;
            }
        }
        Ok(keys)
    }

    /// Create `name`, or return a handle to it if this account already owns it.
    ///
    /// Creation is not naturally idempotent, so the `BucketAlreadyOwnedByYou`
    /// service error is treated as success. Any other error propagates.
    pub async fn ensure_bucket(&self, name: &str) -> Result<Bucket> {
        let mut req = self.client.create_bucket().bucket(name);

        // us-east-1 is the one region that rejects an explicit constraint.
        if self.region != "us-east-1" {
            let constraint = BucketLocationConstraint::from(self.region.as_str());
            req = req.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(constraint)
                    .build(),
            );
        }

        match req.send().await {
            Ok(_) => {
                info!(bucket = %name, region = %self.region, "created bucket");
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_bucket_already_owned_by_you() {
                    debug!(bucket = %name, "bucket already owned, reusing");
                } else {
                    return Err(aws_sdk_s3::Error::from(service_err).into());
                }
            }
        }

        Ok(Bucket {
            name: name.to_owned(),
        })
    }

    /// Attach the fixed anonymous-read policy to `bucket`.
    pub async fn set_public_policy(&self, bucket: &Bucket) -> Result<()> {
        self.client
            .put_bucket_policy()
            .bucket(&bucket.name)
            .policy(public_read_policy(&bucket.name))
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;

        debug!(bucket = %bucket.name, "applied public-read policy");
        Ok(())
    }

    /// Configure `bucket` to serve a static website.
    pub async fn enable_website_hosting(
        &self,
        bucket: &Bucket,
        settings: &SiteSettings,
    ) -> Result<()> {
        let website = WebsiteConfiguration::builder()
            .index_document(
                IndexDocument::builder()
                    .suffix(&settings.index_document)
                    .build()?,
            )
            .error_document(
                ErrorDocument::builder()
                    .key(&settings.error_document)
                    .build()?,
            )
            .build();

        self.client
            .put_bucket_website()
            .bucket(&bucket.name)
            .website_configuration(website)
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;

        debug!(bucket = %bucket.name, "enabled website hosting");
        Ok(())
    }

    /// Upload one local file to `bucket` under `key`.
    ///
    /// The content type is inferred from the key's extension, defaulting to
    /// `text/plain`.
    pub async fn upload_file(&self, bucket: &str, path: &Path, key: &str) -> Result<()> {
        let body = tokio::fs::read(path)
            .await
            .map_err(|source| DeployError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type_for_key(key).to_string())
            .body(body.into())
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;

        info!(bucket = %bucket, key = %key, "uploaded");
        Ok(())
    }

    /// Mirror the directory at `root` into `bucket`, one object per file.
    ///
    /// Returns the keys uploaded, in upload order. Objects absent locally are
    /// left untouched and unchanged files are re-uploaded anyway.
    pub async fn sync(&self, root: &Path, bucket: &str) -> Result<Vec<String>> {
        let entries = walk_files(root)?;
        let mut uploaded = Vec::with_capacity(entries.len());

        for entry in entries {
            self.upload_file(bucket, &entry.path, &entry.key).await?;
            uploaded.push(entry.key);
        }

        info!(bucket = %bucket, count = uploaded.len(), "sync complete");
        Ok(uploaded)
    }

    /// The region `bucket` lives in.
    ///
    /// GetBucketLocation reports no constraint for `us-east-1`.
    pub async fn bucket_region(&self, bucket: &str) -> Result<String> {
        let resp = self
            .client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;

        Ok(resp
            .location_constraint()
            .map(BucketLocationConstraint::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("us-east-1")
            .to_owned())
    }
}

/// The public website URL for `bucket` hosted in `region`.
pub fn website_url(bucket: &str, region: &str) -> Result<String> {
    let endpoint = website_endpoint(region).ok_or_else(|| DeployError::UnsupportedRegion {
        region: region.to_owned(),
    })?;
    Ok(format!("http://{bucket}.{}", endpoint.host))
}

/// The fixed policy document granting anonymous `s3:GetObject` on a bucket.
#[must_use]
pub fn public_read_policy(bucket: &str) -> String {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "PublicReadGetObject",
            "Effect": "Allow",
            "Principal": "*",
            "Action": ["s3:GetObject"],
            "Resource": [format!("arn:aws:s3:::{bucket}/*")]
        }]
    })
    .to_string()
}
