//! Backend relay subsystem.
//!
//! # Data Flow
//! ```text
//! inbound header map
//!     → headers.rs (allow-list filter → forwarded header set)
//!     → dispatcher.rs (one HTTP GET or one unary gRPC call)
//!     → backend IdentityRecord, or absence on any failure
//! ```
//!
//! # Design Decisions
//! - Protocol comes from configuration, never sniffed from the address
//! - A backend failure is expected and tolerated: it yields absence, not
//!   an error, and the inbound response still succeeds
//! - Trace-correlation headers are forwarded verbatim; nothing is rewritten

pub mod dispatcher;
pub mod headers;

pub use dispatcher::{BackendDispatcher, BackendProtocol};
pub use headers::forwarded_headers;
