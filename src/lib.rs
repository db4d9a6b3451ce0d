//! Whereami: environment identity probe for Kubernetes and GCE workloads.

pub mod config;
pub mod metadata;
pub mod observability;
pub mod payload;
pub mod proto;
pub mod relay;
pub mod server;

pub use config::schema::AppConfig;
pub use metadata::cache::MetadataCache;
pub use payload::builder::PayloadBuilder;
pub use payload::record::IdentityRecord;
