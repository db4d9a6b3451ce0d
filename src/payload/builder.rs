//! Payload assembly.
//!
//! # Responsibilities
//! - Gather every identity fact best-effort, one source at a time
//! - Merge cached cloud metadata, downward-API values, and request facts
//! - Relay to the configured backend and nest its record in the response
//!
//! # Design Decisions
//! - Each lookup fails independently; a missing fact is logged and omitted
//! - The builder never returns an error: the response always carries at
//!   least the pod name and timestamp

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::{header, HeaderMap};

use crate::config::AppConfig;
use crate::metadata::cache::MetadataCache;
use crate::payload::emoji;
use crate::payload::record::IdentityRecord;
use crate::relay::dispatcher::{BackendDispatcher, BackendProtocol};
use crate::relay::headers::forwarded_headers;

/// Assembles one [`IdentityRecord`] per inbound request.
pub struct PayloadBuilder {
    config: Arc<AppConfig>,
    metadata: Arc<MetadataCache>,
    dispatcher: BackendDispatcher,
    pod_name: String,
}

impl PayloadBuilder {
    pub fn new(config: Arc<AppConfig>, metadata: Arc<MetadataCache>) -> Self {
        Self {
            config,
            metadata,
            dispatcher: BackendDispatcher::new(),
            pod_name: process_hostname(),
        }
    }

    /// Build the identity record.
    ///
    /// `request_headers` is absent on the gRPC path; header-derived fields
    /// (host header, trace forwarding, header echo) are then omitted.
    pub async fn build(&self, request_headers: Option<&HeaderMap>) -> IdentityRecord {
        let mut record = IdentityRecord::default();

        // Cloud metadata, from the process-lifetime cache.
        let meta = self.metadata.get().await;
        if meta.is_empty() {
            tracing::warn!("Cloud metadata unavailable");
        } else {
            record.project_id = meta.project_id.clone();
            record.zone = meta.zone.clone();
            record.cluster_name = meta.cluster_name.clone();
            record.gce_instance_id = meta.instance_id.clone();
            record.gce_service_account = meta.service_account.clone();
        }

        // Node name: downward API first, instance hostname as fallback.
        record.node_name = self
            .config
            .node_name
            .clone()
            .or_else(|| meta.instance_hostname.clone());
        if record.node_name.is_none() {
            tracing::warn!("Unable to capture node name");
        }

        if let Some(headers) = request_headers {
            record.host_header = headers
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
        }

        record.pod_name = self.pod_name.clone();
        record.pod_name_emoji = Some(emoji::emoji_for(&self.pod_name).to_string());
        record.timestamp = build_timestamp();

        // Downward-API facts, each independently optional.
        record.pod_namespace = self.config.pod_namespace.clone();
        record.pod_ip = self.config.pod_ip.clone();
        record.pod_service_account = self.config.pod_service_account.clone();
        record.metadata = self.config.metadata.clone();

        if self.config.backend_enabled {
            if let Some(service) = self.config.backend() {
                let forwarded = match request_headers {
                    Some(headers) => forwarded_headers(headers),
                    None => HeaderMap::new(),
                };
                let protocol = if self.config.grpc_enabled {
                    BackendProtocol::Grpc
                } else {
                    BackendProtocol::Http
                };

                tracing::info!(service, ?protocol, "Calling backend");

                // A failed dispatch omits backend_result entirely; it is
                // never stored as null and never fails the response.
                if let Some(result) = self.dispatcher.call(service, protocol, &forwarded).await {
                    record.backend_result = Some(Box::new(result));
                }
            } else {
                tracing::warn!("Backend relay enabled but BACKEND_SERVICE is unset");
            }
        }

        if self.config.echo_headers {
            if let Some(headers) = request_headers {
                record.headers = Some(echo_headers(headers));
            }
        }

        record
    }
}

fn process_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| {
            tracing::warn!("Unable to read process hostname");
            "unknown".to_string()
        })
}

/// Wall clock truncated to whole seconds, ISO-8601.
fn build_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Copy the inbound header map verbatim. Names arrive normalized to
/// lowercase; values that are not valid UTF-8 are skipped.
fn echo_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn timestamp_has_second_precision() {
        let ts = build_timestamp();
        // 2026-08-08T12:34:56 — no sub-second component.
        assert_eq!(ts.len(), 19);
        assert!(ts.contains('T'));
        assert!(!ts.contains('.'));
    }

    #[test]
    fn echo_copies_all_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-custom", HeaderValue::from_static("abc"));
        headers.insert("accept", HeaderValue::from_static("*/*"));

        let echoed = echo_headers(&headers);
        assert_eq!(echoed.get("x-custom").map(String::as_str), Some("abc"));
        assert_eq!(echoed.get("accept").map(String::as_str), Some("*/*"));
        assert_eq!(echoed.len(), 2);
    }

    #[test]
    fn echo_skips_non_utf8_values() {
        let mut headers = HeaderMap::new();
        headers.insert("x-bin", HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        headers.insert("x-ok", HeaderValue::from_static("fine"));

        let echoed = echo_headers(&headers);
        assert!(!echoed.contains_key("x-bin"));
        assert_eq!(echoed.get("x-ok").map(String::as_str), Some("fine"));
    }
}
