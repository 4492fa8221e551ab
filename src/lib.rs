//! mirrorseed - static-mirror content extraction pipeline.
//!
//! Reads a local HTML mirror of the legacy laser storefront and emits one
//! JSON array per entity type for the database seeding step. One-shot,
//! single-process, fully re-derivable: re-running a job replaces its output
//! file.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod mirror;
pub mod models;
pub mod report;
pub mod resolve;
pub mod sanitize;
pub mod taxonomy;
