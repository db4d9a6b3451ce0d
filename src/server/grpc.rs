//! gRPC boundary.
//!
//! Serves the Whereami service alongside the standard gRPC health and
//! reflection services. The unary payload call has no inbound HTTP headers,
//! so header-derived fields are omitted from the record.

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tonic::{Request, Response, Status};

use crate::payload::builder::PayloadBuilder;
use crate::proto;
use crate::proto::whereami_server::{Whereami, WhereamiServer};

/// Fixed gRPC serving port.
pub const GRPC_PORT: u16 = 9090;

pub struct WhereamiService {
    builder: Arc<PayloadBuilder>,
}

impl WhereamiService {
    pub fn new(builder: Arc<PayloadBuilder>) -> Self {
        Self { builder }
    }
}

#[tonic::async_trait]
impl Whereami for WhereamiService {
    async fn get_payload(
        &self,
        _request: Request<proto::Empty>,
    ) -> Result<Response<proto::WhereamiReply>, Status> {
        let record = self.builder.build(None).await;
        Ok(Response::new(record.into()))
    }
}

/// Serve the Whereami, health, and reflection services until shutdown.
pub async fn run(
    builder: Arc<PayloadBuilder>,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<WhereamiServer<WhereamiService>>()
        .await;

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(proto::FILE_DESCRIPTOR_SET)
        .build_v1alpha()?;

    Server::builder()
        .add_service(WhereamiServer::new(WhereamiService::new(builder)))
        .add_service(health_service)
        .add_service(reflection_service)
        .serve_with_shutdown(addr, super::shutdown_signal())
        .await?;

    tracing::info!("gRPC server stopped");
    Ok(())
}
