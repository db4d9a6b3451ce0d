//! Cloud metadata subsystem.
//!
//! # Data Flow
//! ```text
//! first request (or startup prefetch)
//!     → client.rs (recursive GET, bounded retry with backoff)
//!     → CachedMetadata (per-field extraction from the JSON tree)
//!     → cache.rs (single-initialization cell, read-only thereafter)
//! ```
//!
//! # Design Decisions
//! - The fetch never fails: retry exhaustion or a malformed tree yields an
//!   empty CachedMetadata, and each field is extracted independently
//! - The cache is sticky for the process lifetime, populated or not; there
//!   is no periodic re-fetch
//! - Retries cover metadata-endpoint startup latency on managed nodes

pub mod cache;
pub mod client;

pub use cache::MetadataCache;
pub use client::{CachedMetadata, MetadataClient};
