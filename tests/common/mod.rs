#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;

use bang_shortener::application::services::RedirectRegistry;
use bang_shortener::infrastructure::persistence::MemoryRedirectRepository;
use bang_shortener::routes::routes;
use bang_shortener::state::AppState;

pub const TEST_KEY: &str = "AbCdEfGhIjKlMnOpQrStUvWxYz0123456789AbCdEfGhIjKlMnOpQrStUvWxYz01";

pub fn create_test_state() -> (AppState, Arc<MemoryRedirectRepository>) {
    let repo = Arc::new(MemoryRedirectRepository::new());
    let registry = RedirectRegistry::new(repo.clone());

    (AppState::new(Arc::new(registry)), repo)
}

/// Test server over the full route table, backed by an in-memory store.
pub fn create_test_server() -> (TestServer, Arc<MemoryRedirectRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(routes(state)).unwrap();

    (server, repo)
}

/// Seeds a current-layout record.
pub async fn create_test_redirect(repo: &MemoryRedirectRepository, slug: &str, url: &str) {
    repo.insert_raw(
        slug,
        vec![url.to_string(), TEST_KEY.to_string(), "0".to_string()],
    )
    .await;
}

/// Seeds a record without the click counter, as older releases wrote them.
pub async fn create_legacy_redirect(repo: &MemoryRedirectRepository, slug: &str, url: &str) {
    repo.insert_raw(slug, vec![url.to_string(), TEST_KEY.to_string()])
        .await;
}

/// Waits until `count` detached click increments have run.
pub async fn wait_for_increments(repo: &MemoryRedirectRepository, count: usize) {
    for _ in 0..200 {
        if repo.increment_attempts() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!(
        "expected {} click increments, saw {}",
        count,
        repo.increment_attempts()
    );
}
