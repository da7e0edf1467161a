//! Runs against a live Redis when `REDIS_URL` is set; otherwise each test returns early.

use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use bang_shortener::domain::entities::NewRedirect;
use bang_shortener::domain::repositories::{RedirectRepository, StoreError};
use bang_shortener::infrastructure::persistence::RedisRedirectRepository;
use bang_shortener::utils::code_generator::generate_slug;

struct RedisFixture {
    repo: RedisRedirectRepository,
    conn: ConnectionManager,
    slug: String,
}

impl RedisFixture {
    async fn raw(&mut self) -> Vec<String> {
        self.conn.lrange(&self.slug, 0, -1).await.unwrap()
    }

    async fn seed(&mut self, fields: &[&str]) {
        let _: () = self.conn.rpush(&self.slug, fields).await.unwrap();
    }

    async fn cleanup(mut self) {
        let _: () = self.conn.del(&self.slug).await.unwrap();
    }
}

async fn fixture() -> Option<RedisFixture> {
    let Ok(url) = std::env::var("REDIS_URL") else {
        eprintln!("REDIS_URL not set, skipping");
        return None;
    };

    let repo = RedisRedirectRepository::connect(&url).await.unwrap();
    let client = redis::Client::open(url).unwrap();
    let conn = ConnectionManager::new(client).await.unwrap();

    Some(RedisFixture {
        repo,
        conn,
        slug: generate_slug().unwrap(),
    })
}

fn new_redirect(slug: &str, url: &str) -> NewRedirect {
    NewRedirect {
        slug: slug.to_string(),
        target_url: url.to_string(),
        admin_key: "secret".to_string(),
    }
}

#[tokio::test]
async fn test_insert_and_find() {
    let Some(mut fx) = fixture().await else { return };

    let written = fx
        .repo
        .insert_if_absent(new_redirect(&fx.slug, "https://example.com"))
        .await
        .unwrap();
    assert!(written);
    assert_eq!(fx.raw().await, vec!["https://example.com", "secret", "0"]);

    let found = fx.repo.find(&fx.slug).await.unwrap().unwrap();
    assert_eq!(found.target_url, "https://example.com");
    assert_eq!(found.clicks, 0);
    assert!(found.is_authorized("secret"));

    fx.cleanup().await;
}

#[tokio::test]
async fn test_insert_taken_slug_keeps_record() {
    let Some(mut fx) = fixture().await else { return };
    fx.repo
        .insert_if_absent(new_redirect(&fx.slug, "https://example.com"))
        .await
        .unwrap();

    let written = fx
        .repo
        .insert_if_absent(new_redirect(&fx.slug, "https://other.org"))
        .await
        .unwrap();

    assert!(!written);
    assert_eq!(fx.raw().await, vec!["https://example.com", "secret", "0"]);

    fx.cleanup().await;
}

#[tokio::test]
async fn test_find_missing() {
    let Some(fx) = fixture().await else { return };

    assert!(fx.repo.find(&fx.slug).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_legacy_record_reads_zero_clicks() {
    let Some(mut fx) = fixture().await else { return };
    fx.seed(&["https://example.com", "secret"]).await;

    let found = fx.repo.find(&fx.slug).await.unwrap().unwrap();
    assert_eq!(found.clicks, 0);

    fx.cleanup().await;
}

#[tokio::test]
async fn test_increment_counts_up() {
    let Some(mut fx) = fixture().await else { return };
    fx.repo
        .insert_if_absent(new_redirect(&fx.slug, "https://example.com"))
        .await
        .unwrap();

    assert_eq!(fx.repo.increment_clicks(&fx.slug).await.unwrap(), Some(1));
    assert_eq!(fx.repo.increment_clicks(&fx.slug).await.unwrap(), Some(2));
    assert_eq!(fx.repo.find(&fx.slug).await.unwrap().unwrap().clicks, 2);

    fx.cleanup().await;
}

#[tokio::test]
async fn test_increment_missing_key_is_not_created() {
    let Some(mut fx) = fixture().await else { return };

    assert_eq!(fx.repo.increment_clicks(&fx.slug).await.unwrap(), None);

    let exists: bool = fx.conn.exists(&fx.slug).await.unwrap();
    assert!(!exists);
}

#[tokio::test]
async fn test_increment_upgrades_legacy_record() {
    let Some(mut fx) = fixture().await else { return };
    fx.seed(&["https://example.com", "secret"]).await;

    assert_eq!(fx.repo.increment_clicks(&fx.slug).await.unwrap(), Some(1));
    assert_eq!(fx.raw().await, vec!["https://example.com", "secret", "1"]);

    fx.cleanup().await;
}

#[tokio::test]
async fn test_increment_rejects_corrupt_counter() {
    let Some(mut fx) = fixture().await else { return };
    fx.seed(&["https://example.com", "secret", "junk"]).await;

    assert!(matches!(
        fx.repo.increment_clicks(&fx.slug).await,
        Err(StoreError::Corrupt { .. })
    ));
    assert_eq!(fx.raw().await, vec!["https://example.com", "secret", "junk"]);

    fx.cleanup().await;
}

#[tokio::test]
async fn test_increment_rejects_trailing_elements() {
    let Some(mut fx) = fixture().await else { return };
    fx.seed(&["https://example.com", "secret", "4", "extra"]).await;

    assert!(matches!(
        fx.repo.increment_clicks(&fx.slug).await,
        Err(StoreError::Corrupt { .. })
    ));
    assert_eq!(fx.raw().await.len(), 4);

    fx.cleanup().await;
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let Some(fx) = fixture().await else { return };
    fx.repo
        .insert_if_absent(new_redirect(&fx.slug, "https://example.com"))
        .await
        .unwrap();

    assert!(fx.repo.delete(&fx.slug).await.unwrap());
    assert!(!fx.repo.delete(&fx.slug).await.unwrap());
    assert!(fx.repo.find(&fx.slug).await.unwrap().is_none());
}

#[tokio::test]
async fn test_health_check() {
    let Some(fx) = fixture().await else { return };

    assert!(fx.repo.health_check().await);
}
