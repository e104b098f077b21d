mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use docs_redirects::api::handlers::resolve_handler;

fn server() -> TestServer {
    let app = Router::new()
        .route("/{*path}", get(resolve_handler))
        .with_state(common::create_test_state());

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_old_path_redirects_permanently() {
    let response = server().get("/en/enterprise/3.11/admin/overview").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(
        response.header("location"),
        "/en/enterprise-server@3.11/admin/overview"
    );
}

#[tokio::test]
async fn test_redirect_keeps_query_string() {
    let response = server()
        .get("/enterprise/3.11/user")
        .add_query_param("tab", "cli")
        .await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(
        response.header("location"),
        "/en/enterprise-server@3.11/github?tab=cli"
    );
}

#[tokio::test]
async fn test_redirect_from_frontmatter() {
    let response = server().get("/ja/admin/about").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(
        response.header("location"),
        "/ja/enterprise-server@3.11/admin/overview"
    );
}

#[tokio::test]
async fn test_canonical_path_serves_page() {
    let response = server().get("/en/enterprise-server@3.11/github/").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["href"], "/en/enterprise-server@3.11/github");
    assert_eq!(json["title"], "GitHub");
    assert_eq!(json["relative_path"], "github/index.md");
}

#[tokio::test]
async fn test_translation_falls_back_to_english() {
    let response = server().get("/es/enterprise-server@3.11/github").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["href"], "/es/enterprise-server@3.11/github");
    assert_eq!(json["title"], "GitHub");
}

#[tokio::test]
async fn test_unknown_path_not_found() {
    let response = server().get("/en/does-not-exist").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["path"], "/en/does-not-exist");
}

#[tokio::test]
async fn test_asset_paths_are_not_resolved() {
    let server = server();

    server.get("/assets/images/logo.png").await.assert_status_not_found();
    server.get("/_next/static/chunk.js").await.assert_status_not_found();
}
