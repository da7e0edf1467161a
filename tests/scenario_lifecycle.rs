mod common;

use std::sync::Arc;

use bang_shortener::application::services::RedirectRegistry;
use bang_shortener::error::RegistryError;
use bang_shortener::infrastructure::persistence::MemoryRedirectRepository;

#[tokio::test]
async fn test_full_lifecycle_over_http() {
    let (server, repo) = common::create_test_server();

    let created = server
        .post("/new")
        .add_query_param("url", "https://example.com")
        .await
        .json::<serde_json::Value>();
    let slug = created["slug"].as_str().unwrap().to_string();
    let key = created["key"].as_str().unwrap().to_string();

    let redirect = server.get(&format!("/{slug}")).await;
    assert_eq!(redirect.status_code(), 307);
    assert_eq!(redirect.header("location"), "https://example.com");
    common::wait_for_increments(&repo, 1).await;

    server
        .get(&format!("/clicks/{slug}"))
        .add_query_param("key", &key)
        .await
        .assert_text("1");

    server
        .delete(&format!("/{slug}"))
        .add_query_param("key", "wrong")
        .await
        .assert_status_unauthorized();
    assert_eq!(server.get(&format!("/{slug}")).await.status_code(), 307);

    server
        .delete(&format!("/{slug}"))
        .add_query_param("key", &key)
        .await
        .assert_status_ok();

    let gone = server.get(&format!("/{slug}")).await;
    gone.assert_status_bad_request();
    assert_eq!(
        gone.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

#[tokio::test]
async fn test_create_then_resolve_returns_same_url() {
    let repo = Arc::new(MemoryRedirectRepository::new());
    let registry = RedirectRegistry::new(repo.clone());

    for url in [
        "http://example.com",
        "https://example.com",
        "https://a-b.c-d.example.co",
        "http://x.io",
    ] {
        let created = registry.create(Some(url)).await.unwrap();
        let resolved = registry.resolve(&created.slug).await.unwrap();

        assert_eq!(resolved.target_url, url);
        resolved.click_task.await.unwrap();
    }
}

#[tokio::test]
async fn test_never_created_slug_is_not_found() {
    let registry = RedirectRegistry::new(Arc::new(MemoryRedirectRepository::new()));

    assert!(matches!(
        registry.resolve("!zzzzz").await,
        Err(RegistryError::NotFound)
    ));
}

#[tokio::test]
async fn test_wrong_key_delete_leaves_record() {
    let repo = Arc::new(MemoryRedirectRepository::new());
    let registry = RedirectRegistry::new(repo.clone());
    let created = registry.create(Some("https://example.com")).await.unwrap();

    assert!(matches!(
        registry.delete(&created.slug, Some("x")).await,
        Err(RegistryError::Unauthorized)
    ));
    assert!(registry.resolve(&created.slug).await.is_ok());

    registry.delete(&created.slug, Some(&created.key)).await.unwrap();
    assert!(matches!(
        registry.resolve(&created.slug).await,
        Err(RegistryError::NotFound)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_count_every_click() {
    let repo = Arc::new(MemoryRedirectRepository::new());
    let registry = Arc::new(RedirectRegistry::new(repo.clone()));
    let created = registry.create(Some("https://example.com")).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let registry = registry.clone();
        let slug = created.slug.clone();
        handles.push(tokio::spawn(async move {
            let resolved = registry.resolve(&slug).await.unwrap();
            resolved.click_task.await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let clicks = registry
        .stats(&created.slug, Some(&created.key))
        .await
        .unwrap();
    assert_eq!(clicks, "50");
}

#[tokio::test]
async fn test_failed_increment_is_invisible() {
    let repo = Arc::new(MemoryRedirectRepository::new());
    let registry = RedirectRegistry::new(repo.clone());
    let created = registry.create(Some("https://example.com")).await.unwrap();

    let resolved = registry.resolve(&created.slug).await.unwrap();
    // The store goes away after the lookup but before the increment runs.
    repo.set_failing(true);
    resolved.click_task.await.unwrap();
    repo.set_failing(false);

    assert_eq!(resolved.target_url, "https://example.com");
    assert_eq!(repo.increment_attempts(), 1);
    assert_eq!(
        registry.stats(&created.slug, Some(&created.key)).await.unwrap(),
        "0"
    );
}
