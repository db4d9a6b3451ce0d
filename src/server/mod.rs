//! Request boundaries.
//!
//! # Data Flow
//! ```text
//! HTTP:  GET /            → full record (JSON)
//!        GET /{field}     → single field when the last path segment names
//!                           a payload key, else the full record
//!        GET /healthz     → fixed OK body, independent of the core
//!
//! gRPC:  Whereami.GetPayload(Empty) → WhereamiReply
//!        plus standard health and reflection services
//! ```
//!
//! Both boundaries delegate to the same [`PayloadBuilder`]; serialization
//! is the only logic that lives here.

pub mod grpc;
pub mod http;

pub use http::HttpServer;

/// Wait for shutdown signal (Ctrl+C).
pub(crate) async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
