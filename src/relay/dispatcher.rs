//! Backend dispatch.
//!
//! One downstream call per inbound request, over HTTP+JSON or gRPC as
//! configured. The dispatcher is stateless across calls and absorbs every
//! failure: transport errors, non-success statuses, and malformed bodies
//! all collapse to absence.

use std::time::Duration;

use axum::http::HeaderMap;
use tonic::metadata::MetadataMap;
use tonic::transport::Channel;

use crate::payload::record::IdentityRecord;
use crate::proto;
use crate::proto::whereami_client::WhereamiClient;

/// Ports that trigger a TLS-secured gRPC channel.
///
/// Load-bearing compatibility behavior: channel security is derived from
/// the port suffix of the backend address, and only these two ports select
/// TLS.
pub const GRPC_SECURE_PORTS: [&str; 2] = ["443", "8443"];

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Wire protocol for the downstream call. Selected by configuration,
/// never auto-detected from the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendProtocol {
    Http,
    Grpc,
}

/// Performs the downstream call with forwarded trace headers.
pub struct BackendDispatcher {
    http: reqwest::Client,
    call_timeout: Duration,
}

impl BackendDispatcher {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_CALL_TIMEOUT)
    }

    /// Dispatcher with a custom outbound call timeout.
    pub fn with_timeout(call_timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(call_timeout)
            .build()
            .unwrap_or_default();

        Self { http, call_timeout }
    }

    /// Call the backend at `service` (`host[:port]`).
    ///
    /// Returns the backend's record, or `None` on any failure — partial
    /// failure is expected and must never propagate as an error.
    pub async fn call(
        &self,
        service: &str,
        protocol: BackendProtocol,
        forwarded: &HeaderMap,
    ) -> Option<IdentityRecord> {
        match protocol {
            BackendProtocol::Http => self.call_http(service, forwarded).await,
            BackendProtocol::Grpc => self.call_grpc(service, forwarded).await,
        }
    }

    async fn call_http(&self, service: &str, forwarded: &HeaderMap) -> Option<IdentityRecord> {
        let url = format!("http://{service}");

        let response = match self.http.get(&url).headers(forwarded.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(service, error = %e, "Backend HTTP request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(service, status = %response.status(), "Backend returned non-success status");
            return None;
        }

        match response.json().await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(service, error = %e, "Backend response was not a valid payload");
                None
            }
        }
    }

    async fn call_grpc(&self, service: &str, forwarded: &HeaderMap) -> Option<IdentityRecord> {
        let uri = if is_secure_port(service) {
            tracing::info!(service, "Using gRPC secure channel");
            format!("https://{service}")
        } else {
            tracing::info!(service, "Using gRPC insecure channel");
            format!("http://{service}")
        };

        let endpoint = match Channel::from_shared(uri) {
            Ok(endpoint) => endpoint
                .connect_timeout(CONNECT_TIMEOUT)
                .timeout(self.call_timeout),
            Err(e) => {
                tracing::warn!(service, error = %e, "Invalid backend address");
                return None;
            }
        };

        let channel = match endpoint.connect().await {
            Ok(channel) => channel,
            Err(e) => {
                tracing::warn!(service, error = %e, "Backend gRPC channel failed");
                return None;
            }
        };

        let mut client = WhereamiClient::new(channel);
        let mut request = tonic::Request::new(proto::Empty {});
        *request.metadata_mut() = MetadataMap::from_headers(forwarded.clone());

        match client.get_payload(request).await {
            Ok(response) => Some(IdentityRecord::from(response.into_inner())),
            Err(status) => {
                tracing::warn!(service, status = %status, "Backend gRPC call failed");
                None
            }
        }
    }
}

impl Default for BackendDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// True when the address's port suffix selects a TLS channel.
fn is_secure_port(service: &str) -> bool {
    match service.rsplit_once(':') {
        Some((_, port)) => GRPC_SECURE_PORTS.contains(&port),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_ports_select_tls() {
        assert!(is_secure_port("svc:443"));
        assert!(is_secure_port("svc:8443"));
        assert!(is_secure_port("svc.example.internal:8443"));
    }

    #[test]
    fn other_ports_stay_plaintext() {
        assert!(!is_secure_port("svc:9090"));
        assert!(!is_secure_port("svc:80"));
        assert!(!is_secure_port("svc:44300"));
    }

    #[test]
    fn address_without_port_stays_plaintext() {
        assert!(!is_secure_port("svc"));
        assert!(!is_secure_port("svc.example.internal"));
    }
}
