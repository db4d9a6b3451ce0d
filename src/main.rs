//! Whereami service entrypoint.
//!
//! Reports identity facts about its own execution environment (project, zone,
//! node, cluster, pod) and can chain the request to a downstream instance of
//! itself over HTTP or gRPC, which makes it useful for exercising service-mesh
//! routing, load balancing, and trace-header propagation.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌────────────────────────────────────────────────┐
//!                       │                   WHEREAMI                     │
//!                       │                                                │
//!     Inbound request   │  ┌──────────┐        ┌──────────────────┐      │
//!     ──────────────────┼─▶│  server  │───────▶│  PayloadBuilder  │      │
//!     (HTTP or gRPC)    │  │ boundary │        └───────┬──────────┘      │
//!                       │  └──────────┘                │                 │
//!                       │              ┌───────────────┼──────────────┐  │
//!                       │              ▼               ▼              ▼  │
//!                       │      ┌──────────────┐ ┌────────────┐ ┌───────┐ │
//!                       │      │MetadataCache │ │ AppConfig  │ │ relay │─┼──▶ Backend
//!                       │      │ (fetch once) │ │ (env vars) │ │       │ │    (optional)
//!                       │      └──────┬───────┘ └────────────┘ └───────┘ │
//!                       └─────────────┼──────────────────────────────────┘
//!                                     ▼
//!                          Cloud metadata endpoint
//! ```
//!
//! Every identity field is gathered best-effort: a failed lookup is logged
//! and omitted, never surfaced as a failed response.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use whereami::config::AppConfig;
use whereami::metadata::{cache::MetadataCache, client::MetadataClient};
use whereami::payload::builder::PayloadBuilder;
use whereami::server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    whereami::observability::logging::init();

    tracing::info!("whereami v0.1.0 starting");

    let config = Arc::new(AppConfig::from_env()?);

    tracing::info!(
        port = config.port,
        grpc_enabled = config.grpc_enabled,
        backend_enabled = config.backend_enabled,
        echo_headers = config.echo_headers,
        "Configuration loaded"
    );

    // Warm the metadata cache before accepting traffic. The fetch is sticky:
    // whatever this resolves to (populated or empty) is served for the
    // process lifetime.
    let metadata = Arc::new(MetadataCache::new(MetadataClient::new()));
    metadata.get().await;

    let builder = Arc::new(PayloadBuilder::new(config.clone(), metadata));

    if config.grpc_enabled {
        let addr = SocketAddr::from(([0, 0, 0, 0], server::grpc::GRPC_PORT));
        tracing::info!(address = %addr, "gRPC server listening");
        server::grpc::run(builder, addr).await?;
    } else {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(address = %listener.local_addr()?, "HTTP server listening");
        server::http::HttpServer::new(builder).run(listener).await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
