//! Directory sync integration tests.

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::{bucket_manager, cleanup_bucket, s3_client, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_sync_mirrors_nested_tree() {
        let client = s3_client();
        let manager = bucket_manager();
        let name = test_bucket_name("sync");

        manager.ensure_bucket(&name).await.expect("create");

        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.txt"), "alpha").expect("write a.txt");
        fs::create_dir(dir.path().join("sub")).expect("mkdir sub");
        fs::write(dir.path().join("sub/b.html"), "<html/>").expect("write b.html");

        let uploaded = manager.sync(dir.path(), &name).await.expect("sync");
        assert_eq!(uploaded, vec!["a.txt".to_owned(), "sub/b.html".to_owned()]);

        let keys = manager.list_objects(&name).await.expect("list_objects");
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"a.txt".to_owned()));
        assert!(keys.contains(&"sub/b.html".to_owned()));

        let head = client
            .head_object()
            .bucket(&name)
            .key("sub/b.html")
            .send()
            .await
            .expect("head b.html");
        assert_eq!(head.content_type(), Some("text/html"));

        let head = client
            .head_object()
            .bucket(&name)
            .key("a.txt")
            .send()
            .await
            .expect("head a.txt");
        assert_eq!(head.content_type(), Some("text/plain"));

        cleanup_bucket(&client, &name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_sync_overwrites_existing_objects() {
        let client = s3_client();
        let manager = bucket_manager();
        let name = test_bucket_name("resync");

        manager.ensure_bucket(&name).await.expect("create");

        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("index.html"), "v1").expect("write v1");
        manager.sync(dir.path(), &name).await.expect("first sync");

        fs::write(dir.path().join("index.html"), "v2").expect("write v2");
        manager.sync(dir.path(), &name).await.expect("second sync");

        let body = client
            .get_object()
            .bucket(&name)
            .key("index.html")
            .send()
            .await
            .expect("get_object")
            .body
            .collect()
            .await
            .expect("collect body");
        assert_eq!(body.into_bytes().as_ref(), b"v2");

        cleanup_bucket(&client, &name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_sync_of_missing_directory_fails_without_uploading() {
        let manager = bucket_manager();
        let name = test_bucket_name("nosrc");

        manager.ensure_bucket(&name).await.expect("create");

        let dir = tempfile::tempdir().expect("tempdir");
        let gone = dir.path().join("does-not-exist");
        assert!(manager.sync(&gone, &name).await.is_err());

        let keys = manager.list_objects(&name).await.expect("list_objects");
        assert!(keys.is_empty());

        cleanup_bucket(&s3_client(), &name).await;
    }
}
