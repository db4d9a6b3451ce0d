//! The environment identity record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity facts about one workload instance, assembled per request.
///
/// Fields are independently optional and skipped entirely when absent;
/// only `pod_name` and `timestamp` are always present. A chained downstream
/// call nests its own record under `backend_result`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gce_instance_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gce_service_account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_header: Option<String>,

    /// Process hostname. Always present.
    pub pod_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_name_emoji: Option<String>,

    /// Build wall-clock time, ISO-8601 at second precision. Always present.
    pub timestamp: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_service_account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_result: Option<Box<IdentityRecord>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl IdentityRecord {
    /// Look up one field by its payload key.
    ///
    /// Returns the field's JSON value when `name` names a present field of
    /// the serialized record, `None` otherwise. Used by the HTTP boundary's
    /// single-field endpoint.
    pub fn field(&self, name: &str) -> Option<Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map.get(name).cloned(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> IdentityRecord {
        IdentityRecord {
            pod_name: "pod-1".to_string(),
            timestamp: "2026-08-08T12:00:00".to_string(),
            ..IdentityRecord::default()
        }
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let json = serde_json::to_value(minimal()).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.get("pod_name").unwrap(), "pod-1");
        assert!(obj.contains_key("timestamp"));
        assert!(!obj.contains_key("project_id"));
        assert!(!obj.contains_key("backend_result"));
        assert!(!obj.contains_key("headers"));
    }

    #[test]
    fn field_lookup_matches_serialized_keys() {
        let record = IdentityRecord {
            zone: Some("us-central1-a".to_string()),
            ..minimal()
        };

        assert_eq!(record.field("zone"), Some(Value::from("us-central1-a")));
        assert_eq!(record.field("pod_name"), Some(Value::from("pod-1")));
        assert_eq!(record.field("cluster_name"), None);
        assert_eq!(record.field("no_such_key"), None);
    }

    #[test]
    fn partial_backend_json_still_parses() {
        // A downstream response missing even the guaranteed fields must not
        // fail deserialization; the relay treats the body as best-effort.
        let record: IdentityRecord = serde_json::from_str(r#"{"zone":"z"}"#).unwrap();
        assert_eq!(record.zone.as_deref(), Some("z"));
        assert_eq!(record.pod_name, "");
    }

    #[test]
    fn nested_backend_result_round_trips() {
        let record = IdentityRecord {
            backend_result: Some(Box::new(IdentityRecord {
                pod_name: "downstream".to_string(),
                ..IdentityRecord::default()
            })),
            ..minimal()
        };

        let json = serde_json::to_string(&record).unwrap();
        let parsed: IdentityRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.backend_result.unwrap().pod_name, "downstream");
    }
}
