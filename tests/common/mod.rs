//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a mock cloud-metadata endpoint serving `tree`, counting hits.
/// Returns the base URL to hand to `MetadataClient::with_base_url`.
pub async fn start_metadata_server(tree: Value) -> (String, Arc<AtomicU32>) {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();

    let app = Router::new().route(
        "/",
        get(move || {
            let tree = tree.clone();
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(tree)
            }
        }),
    );

    let addr = serve(app).await;
    (format!("http://{addr}/"), hits)
}

/// Start a metadata endpoint that always fails, counting attempts.
pub async fn start_failing_metadata_server() -> (String, Arc<AtomicU32>) {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();

    let app = Router::new().route(
        "/",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                StatusCode::SERVICE_UNAVAILABLE
            }
        }),
    );

    let addr = serve(app).await;
    (format!("http://{addr}/"), hits)
}

/// Start a mock HTTP backend returning `body` as JSON and recording the
/// headers of every request it sees.
pub async fn start_backend(body: Value) -> (SocketAddr, Arc<Mutex<Vec<HeaderMap>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    let app = Router::new().route(
        "/",
        get(move |headers: HeaderMap| {
            let body = body.clone();
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(headers);
                Json(body)
            }
        }),
    );

    let addr = serve(app).await;
    (addr, seen)
}
