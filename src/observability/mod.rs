//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; every best-effort lookup that comes up
//!   empty logs a warning and moves on
//! - Log filtering configurable through RUST_LOG
//! - No metrics endpoint: the service is itself a diagnostic probe

pub mod logging;
