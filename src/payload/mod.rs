//! Payload subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request (headers optional)
//!     → builder.rs (gather each fact best-effort, relay if configured)
//!     → record.rs (typed IdentityRecord, optional fields)
//!     → boundary layer serializes (JSON or gRPC message)
//! ```
//!
//! # Design Decisions
//! - Every field is gathered independently; one lookup's failure never
//!   short-circuits another
//! - Absent fields are omitted from the serialized record, never null
//! - pod_name and timestamp are the only guaranteed fields

pub mod builder;
pub mod emoji;
pub mod record;

pub use builder::PayloadBuilder;
pub use record::IdentityRecord;
