#![deny(missing_docs)]

//! Core library for the Rusty Roster student registry.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Student record types shared across layers.
pub mod model;
/// In-memory record store.
pub mod store;
/// Profile summaries generated by a local text-generation runtime.
pub mod summarization;
/// Field validation for incoming records.
pub mod validation;
