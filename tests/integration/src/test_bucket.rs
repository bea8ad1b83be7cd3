//! Bucket provisioning integration tests.

#[cfg(test)]
mod tests {
    use sitestack_core::SiteSettings;
    use sitestack_core::bucket::Bucket;

    use crate::{bucket_manager, cleanup_bucket, s3_client, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_ensure_bucket_is_idempotent() {
        let manager = bucket_manager();
        let name = test_bucket_name("ensure");

        let first = manager.ensure_bucket(&name).await.expect("first create");
        let second = manager
            .ensure_bucket(&name)
            .await
            .expect("second create must reuse the bucket");

        assert_eq!(first, second);
        assert_eq!(first.name, name);

        cleanup_bucket(&s3_client(), &name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_ensured_bucket_appears_in_listing() {
        let manager = bucket_manager();
        let name = test_bucket_name("listed");

        manager.ensure_bucket(&name).await.expect("create");

        let names = manager.list_buckets().await.expect("list_buckets");
        assert!(names.contains(&name), "listing should contain {name}");

        cleanup_bucket(&s3_client(), &name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_setup_applies_policy_and_website_config() {
        let client = s3_client();
        let manager = bucket_manager();
        let settings = SiteSettings::default();
        let name = test_bucket_name("setup");

        let bucket = manager.ensure_bucket(&name).await.expect("create");
        manager.set_public_policy(&bucket).await.expect("policy");
        manager
            .enable_website_hosting(&bucket, &settings)
            .await
            .expect("website config");

        let policy = client
            .get_bucket_policy()
            .bucket(&name)
            .send()
            .await
            .expect("get_bucket_policy");
        let document: serde_json::Value =
            serde_json::from_str(policy.policy().unwrap_or_default()).expect("policy is JSON");
        assert_eq!(
            document["Statement"][0]["Resource"][0],
            format!("arn:aws:s3:::{name}/*")
        );

        let website = client
            .get_bucket_website()
            .bucket(&name)
            .send()
            .await
            .expect("get_bucket_website");
        assert_eq!(
            website.index_document().map(|d| d.suffix()),
            Some("index.html")
        );
        assert_eq!(
            website.error_document().map(|d| d.key()),
            Some("error.html")
        );

        cleanup_bucket(&client, &name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_bucket_region_defaults_to_us_east_1() {
        let manager = bucket_manager();
        let name = test_bucket_name("region");

        manager.ensure_bucket(&name).await.expect("create");

        let region = manager.bucket_region(&name).await.expect("bucket_region");
        assert_eq!(region, "us-east-1");

        cleanup_bucket(&s3_client(), &name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_upload_sets_inferred_content_type() {
        let client = s3_client();
        let manager = bucket_manager();
        let name = test_bucket_name("ctype");

        manager.ensure_bucket(&name).await.expect("create");

        let dir = tempfile::tempdir().expect("tempdir");
        let local = dir.path().join("index.html");
        std::fs::write(&local, "<html/>").expect("write local file");

        manager
            .upload_file(&name, &local, "index.html")
            .await
            .expect("upload");

        let head = client
            .head_object()
            .bucket(&name)
            .key("index.html")
            .send()
            .await
            .expect("head_object");
        assert_eq!(head.content_type(), Some("text/html"));

        cleanup_bucket(&client, &name).await;
    }

    #[test]
    fn bucket_handle_compares_by_name() {
        let a = Bucket {
            name: "www.example.com".to_owned(),
        };
        let b = Bucket {
            name: "www.example.com".to_owned(),
        };
        assert_eq!(a, b);
    }
}
