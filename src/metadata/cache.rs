//! Process-lifetime metadata cache.
//!
//! The only cross-request shared state in the service. Populated at most once
//! (eagerly at startup, or lazily on first access) and read concurrently by
//! every request afterwards.

use tokio::sync::OnceCell;

use crate::metadata::client::{CachedMetadata, MetadataClient};

/// Single-initialization cache around [`MetadataClient::fetch`].
///
/// Concurrent first accesses collapse into one fetch; whatever that fetch
/// resolves to — populated or empty — is returned for the process lifetime.
pub struct MetadataCache {
    client: MetadataClient,
    cell: OnceCell<CachedMetadata>,
}

impl MetadataCache {
    pub fn new(client: MetadataClient) -> Self {
        Self {
            client,
            cell: OnceCell::new(),
        }
    }

    /// The cached metadata, fetching on first call.
    pub async fn get(&self) -> &CachedMetadata {
        self.cell
            .get_or_init(|| async { self.client.fetch().await })
            .await
    }
}
