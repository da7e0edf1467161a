mod common;

#[tokio::test]
async fn test_index_reports_version() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["bang!"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let (server, repo) = common::create_test_server();
    repo.set_failing(true);

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "error");
}
