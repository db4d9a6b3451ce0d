//! Configuration schema and environment parsing.
//!
//! All recognized options arrive via environment variables, read once at
//! startup. Downward-API values (pod namespace, IP, service account) are
//! plain strings; feature switches are tolerant boolean flags.

use std::env;

use serde::Serialize;

const PORT: &str = "PORT";
const GRPC_ENABLED: &str = "GRPC_ENABLED";
const BACKEND_ENABLED: &str = "BACKEND_ENABLED";
const BACKEND_SERVICE: &str = "BACKEND_SERVICE";
const ECHO_HEADERS: &str = "ECHO_HEADERS";
const METADATA: &str = "METADATA";
const NODE_NAME: &str = "NODE_NAME";
const POD_NAMESPACE: &str = "POD_NAMESPACE";
const POD_IP: &str = "POD_IP";
const POD_SERVICE_ACCOUNT: &str = "POD_SERVICE_ACCOUNT";

const DEFAULT_PORT: u16 = 8080;

/// Error raised for a malformed typed environment variable.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid env var {0}={1}")]
    EnvVar(&'static str, String),
}

/// Runtime configuration, captured from the environment at startup.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,

    /// Serve (and dispatch to backends over) gRPC instead of HTTP.
    pub grpc_enabled: bool,

    /// Relay each request to a downstream backend.
    pub backend_enabled: bool,

    /// Downstream backend address, `host[:port]`.
    pub backend_service: Option<String>,

    /// Echo the full inbound header map into the response.
    pub echo_headers: bool,

    /// Free-form metadata string surfaced verbatim in the payload.
    pub metadata: Option<String>,

    /// Node name, from the downward API.
    pub node_name: Option<String>,

    /// Pod namespace, from the downward API.
    pub pod_namespace: Option<String>,

    /// Pod IP, from the downward API.
    pub pod_ip: Option<String>,

    /// Pod service account, from the downward API.
    pub pod_service_account: Option<String>,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_port()?,
            grpc_enabled: flag(GRPC_ENABLED),
            backend_enabled: flag(BACKEND_ENABLED),
            backend_service: non_empty(BACKEND_SERVICE),
            echo_headers: flag(ECHO_HEADERS),
            metadata: non_empty(METADATA),
            node_name: non_empty(NODE_NAME),
            pod_namespace: non_empty(POD_NAMESPACE),
            pod_ip: non_empty(POD_IP),
            pod_service_account: non_empty(POD_SERVICE_ACCOUNT),
        })
    }

    /// Backend address when relaying is fully configured.
    ///
    /// `BACKEND_ENABLED` without `BACKEND_SERVICE` leaves the relay off.
    pub fn backend(&self) -> Option<&str> {
        if !self.backend_enabled {
            return None;
        }
        self.backend_service.as_deref()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            grpc_enabled: false,
            backend_enabled: false,
            backend_service: None,
            echo_headers: false,
            metadata: None,
            node_name: None,
            pod_namespace: None,
            pod_ip: None,
            pod_service_account: None,
        }
    }
}

fn parse_port() -> Result<u16, ConfigError> {
    match env::var(PORT) {
        Ok(val) if !val.is_empty() => val
            .parse()
            .map_err(|_| ConfigError::EnvVar(PORT, val)),
        _ => Ok(DEFAULT_PORT),
    }
}

/// Read a boolean feature flag. `True`, `true`, and `1` enable; anything
/// else (including absence) leaves the feature off.
fn flag(name: &str) -> bool {
    env::var(name).map_or(false, |val| flag_enabled(&val))
}

fn flag_enabled(value: &str) -> bool {
    matches!(value, "True" | "true" | "1")
}

/// Read an optional string variable, treating empty as unset.
fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|val| !val.is_empty())
}
