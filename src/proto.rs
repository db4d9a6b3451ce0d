//! Generated gRPC types for the Whereami service.
//!
//! Message types come from `proto/whereami.proto` via tonic-build. The wire
//! format uses plain proto3 strings, so an unset field arrives as `""`; the
//! conversions below map between that convention and the optional fields of
//! [`IdentityRecord`](crate::payload::IdentityRecord).

use crate::payload::IdentityRecord;

tonic::include_proto!("whereami");

/// Encoded file descriptor set for the reflection service.
pub const FILE_DESCRIPTOR_SET: &[u8] =
    tonic::include_file_descriptor_set!("whereami_descriptor");

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl From<WhereamiReply> for IdentityRecord {
    fn from(reply: WhereamiReply) -> Self {
        IdentityRecord {
            project_id: non_empty(reply.project_id),
            zone: non_empty(reply.zone),
            cluster_name: non_empty(reply.cluster_name),
            gce_instance_id: non_empty(reply.gce_instance_id),
            gce_service_account: non_empty(reply.gce_service_account),
            node_name: non_empty(reply.node_name),
            host_header: non_empty(reply.host_header),
            pod_name: reply.pod_name,
            pod_name_emoji: non_empty(reply.pod_name_emoji),
            timestamp: reply.timestamp,
            pod_namespace: non_empty(reply.pod_namespace),
            pod_ip: non_empty(reply.pod_ip),
            pod_service_account: non_empty(reply.pod_service_account),
            metadata: non_empty(reply.metadata),
            backend_result: reply
                .backend_result
                .map(|nested| Box::new(IdentityRecord::from(*nested))),
            // The reply message carries no header echo.
            headers: None,
        }
    }
}

impl From<IdentityRecord> for WhereamiReply {
    fn from(record: IdentityRecord) -> Self {
        WhereamiReply {
            cluster_name: record.cluster_name.unwrap_or_default(),
            gce_instance_id: record.gce_instance_id.unwrap_or_default(),
            gce_service_account: record.gce_service_account.unwrap_or_default(),
            host_header: record.host_header.unwrap_or_default(),
            metadata: record.metadata.unwrap_or_default(),
            node_name: record.node_name.unwrap_or_default(),
            pod_ip: record.pod_ip.unwrap_or_default(),
            pod_name: record.pod_name,
            pod_name_emoji: record.pod_name_emoji.unwrap_or_default(),
            pod_namespace: record.pod_namespace.unwrap_or_default(),
            pod_service_account: record.pod_service_account.unwrap_or_default(),
            project_id: record.project_id.unwrap_or_default(),
            timestamp: record.timestamp,
            zone: record.zone.unwrap_or_default(),
            backend_result: record
                .backend_result
                .map(|nested| Box::new(WhereamiReply::from(*nested))),
        }
    }
}
