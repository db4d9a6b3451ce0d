//! Integration tests for the HTTP boundary.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::net::TcpListener;

use whereami::config::AppConfig;
use whereami::metadata::cache::MetadataCache;
use whereami::metadata::client::MetadataClient;
use whereami::payload::builder::PayloadBuilder;
use whereami::server::http::HttpServer;

async fn spawn_app(config: AppConfig) -> SocketAddr {
    let metadata = MetadataCache::new(
        MetadataClient::with_base_url("http://127.0.0.1:1/").with_retry(1, Duration::from_millis(1)),
    );
    let builder = Arc::new(PayloadBuilder::new(Arc::new(config), Arc::new(metadata)));

    let app = HttpServer::new(builder).into_router();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn healthz_returns_fixed_ok() {
    let addr = spawn_app(AppConfig::default()).await;

    let response = reqwest::get(format!("http://{addr}/healthz")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn root_returns_the_full_record() {
    let addr = spawn_app(AppConfig::default()).await;

    let response = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    let obj = body.as_object().unwrap();
    assert!(obj.contains_key("pod_name"));
    assert!(obj.contains_key("timestamp"));
    assert!(obj.contains_key("host_header"));
    assert!(!obj.contains_key("project_id"));
    assert!(!obj.contains_key("backend_result"));
}

#[tokio::test]
async fn field_path_returns_the_single_value() {
    let addr = spawn_app(AppConfig::default()).await;

    let full: Value = reqwest::get(format!("http://{addr}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let pod_name = full["pod_name"].as_str().unwrap().to_string();

    let response = reqwest::get(format!("http://{addr}/pod_name")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), pod_name);
}

#[tokio::test]
async fn nested_path_uses_the_last_segment() {
    let addr = spawn_app(AppConfig::default()).await;

    let response = reqwest::get(format!("http://{addr}/some/nested/timestamp"))
        .await
        .unwrap();
    let body = response.text().await.unwrap();
    assert_eq!(body.len(), 19, "expected a bare timestamp, got {body:?}");
}

#[tokio::test]
async fn unknown_field_falls_back_to_the_full_record() {
    let addr = spawn_app(AppConfig::default()).await;

    let response = reqwest::get(format!("http://{addr}/no_such_field")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert!(body.as_object().unwrap().contains_key("pod_name"));
}

#[tokio::test]
async fn echoed_headers_surface_in_the_response() {
    let addr = spawn_app(AppConfig {
        echo_headers: true,
        ..AppConfig::default()
    })
    .await;

    let client = reqwest::Client::new();
    let body: Value = client
        .get(format!("http://{addr}/"))
        .header("x-custom", "abc")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["headers"]["x-custom"], "abc");
}
