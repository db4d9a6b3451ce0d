//! HTTP boundary.
//!
//! # Responsibilities
//! - Create the Axum router with the payload, field, and health handlers
//! - Wire up middleware (tracing, permissive CORS)
//! - Serve with graceful shutdown

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::payload::builder::PayloadBuilder;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub builder: Arc<PayloadBuilder>,
}

/// HTTP server for the identity probe.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(builder: Arc<PayloadBuilder>) -> Self {
        let state = AppState { builder };

        let router = Router::new()
            .route("/healthz", get(healthz))
            .route("/", get(payload_handler))
            .route("/{*path}", get(field_handler))
            .with_state(state)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// The underlying router, for in-process tests.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        axum::serve(listener, self.router)
            .with_graceful_shutdown(super::shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Healthcheck endpoint. Fixed body, independent of the payload core.
async fn healthz() -> &'static str {
    "OK"
}

async fn payload_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let record = state.builder.build(Some(&headers)).await;
    Json(record).into_response()
}

/// Single-field lookup: `GET /zone` returns just the zone. An unknown key
/// falls back to the full record.
async fn field_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Response {
    let record = state.builder.build(Some(&headers)).await;

    let requested = path.rsplit('/').next().unwrap_or(path.as_str());
    match record.field(requested) {
        Some(Value::String(value)) => value.into_response(),
        Some(value) => Json(value).into_response(),
        None => Json(record).into_response(),
    }
}
