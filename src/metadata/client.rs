//! Cloud metadata endpoint client.
//!
//! Performs one recursive GET against the local metadata service with the
//! required flavor header and extracts the identity facts this service
//! reports. The endpoint can take a few seconds to come up on managed nodes,
//! so the read is retried a bounded number of times with jittered
//! exponential backoff before giving up.

use std::time::Duration;

use rand::Rng;
use serde_json::Value;

/// Well-known local metadata endpoint.
pub const METADATA_BASE_URL: &str = "http://metadata.google.internal/computeMetadata/v1/";

const METADATA_FLAVOR: &str = "Metadata-Flavor";
const METADATA_FLAVOR_VALUE: &str = "Google";

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BASE_BACKOFF: Duration = Duration::from_secs(1);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Identity facts extracted from the metadata tree.
///
/// Every field is independent: a missing or malformed entry leaves only that
/// field unset and never blocks extraction of its siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedMetadata {
    pub project_id: Option<String>,
    pub zone: Option<String>,
    pub cluster_name: Option<String>,
    pub instance_id: Option<String>,
    pub service_account: Option<String>,
    pub instance_hostname: Option<String>,
}

impl CachedMetadata {
    /// True when the fetch never succeeded and nothing was extracted.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Extract the identity fields from a recursive metadata response.
    pub fn from_tree(tree: &Value) -> Self {
        let project_id = tree
            .pointer("/project/projectId")
            .and_then(Value::as_str)
            .map(str::to_string);
        if project_id.is_none() {
            tracing::warn!("Unable to capture project ID");
        }

        // The zone arrives path-like: projects/<num>/zones/<zone>.
        let zone = tree
            .pointer("/instance/zone")
            .and_then(Value::as_str)
            .and_then(|path| path.rsplit('/').next())
            .map(str::to_string);
        if zone.is_none() {
            tracing::warn!("Unable to capture zone");
        }

        // Only set when running on a cluster.
        let cluster_name = tree
            .pointer("/instance/attributes/cluster-name")
            .and_then(Value::as_str)
            .map(str::to_string);
        if cluster_name.is_none() {
            tracing::warn!("Unable to capture cluster name");
        }

        // Numeric on GCE, alphanumeric on some platforms; kept as a string.
        let instance_id = tree.pointer("/instance/id").and_then(|id| match id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        if instance_id.is_none() {
            tracing::warn!("Unable to capture instance ID");
        }

        let service_account = tree
            .pointer("/instance/serviceAccounts/default/email")
            .and_then(Value::as_str)
            .map(str::to_string);
        if service_account.is_none() {
            tracing::warn!("Unable to capture default service account");
        }

        let instance_hostname = tree
            .pointer("/instance/hostname")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            project_id,
            zone,
            cluster_name,
            instance_id,
            service_account,
            instance_hostname,
        }
    }
}

/// Client for the local metadata endpoint.
pub struct MetadataClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: u32,
    base_backoff: Duration,
}

impl MetadataClient {
    /// Client against the well-known endpoint with default retry policy.
    pub fn new() -> Self {
        Self::with_base_url(METADATA_BASE_URL)
    }

    /// Client against an alternate endpoint (tests point this at a mock).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: DEFAULT_BASE_BACKOFF,
        }
    }

    /// Override the retry policy. Tests shrink the backoff to milliseconds.
    pub fn with_retry(mut self, max_attempts: u32, base_backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.base_backoff = base_backoff;
        self
    }

    /// Fetch and extract the metadata. Infallible: on retry exhaustion or a
    /// malformed response this returns an empty [`CachedMetadata`].
    pub async fn fetch(&self) -> CachedMetadata {
        match self.fetch_tree().await {
            Some(tree) => {
                tracing::info!("Successfully accessed metadata endpoint");
                CachedMetadata::from_tree(&tree)
            }
            None => {
                tracing::warn!("Metadata endpoint unavailable");
                CachedMetadata::default()
            }
        }
    }

    /// Retry loop around the recursive GET. Only this idempotent read is
    /// retried, regardless of which transient failure occurred.
    async fn fetch_tree(&self) -> Option<Value> {
        let url = format!("{}?recursive=true", self.base_url);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self
                .http
                .get(&url)
                .header(METADATA_FLAVOR, METADATA_FLAVOR_VALUE)
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    match response.json().await {
                        Ok(tree) => return Some(tree),
                        Err(e) => {
                            tracing::warn!(attempt, error = %e, "Metadata response was not valid JSON");
                        }
                    }
                }
                Ok(response) => {
                    tracing::warn!(attempt, status = %response.status(), "Metadata endpoint returned non-success status");
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Metadata endpoint unreachable");
                }
            }

            if attempt >= self.max_attempts {
                return None;
            }

            let delay = backoff_delay(attempt, self.base_backoff);
            tracing::debug!(attempt, delay = ?delay, "Retrying metadata fetch");
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for MetadataClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Exponential backoff with jitter (0 to 10% of the delay).
fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    let exponential = 2u32.saturating_pow(attempt.saturating_sub(1));
    let delay = base.saturating_mul(exponential);

    let jitter_range = delay.as_millis() as u64 / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    delay + Duration::from_millis(jitter)
}
