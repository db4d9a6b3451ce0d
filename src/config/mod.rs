//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → schema.rs (parse & type env vars once at startup)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to the builder and boundary layers
//! ```
//!
//! # Design Decisions
//! - Configuration comes exclusively from environment variables; an absent
//!   variable disables the corresponding feature rather than erroring
//! - Boolean flags parse tolerantly ("True", "true", "1")
//! - Only a malformed typed value (e.g. PORT) is a startup error

pub mod schema;

pub use schema::AppConfig;
pub use schema::ConfigError;
