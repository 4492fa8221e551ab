//! Command-line interface.

pub mod commands;
pub mod helpers;

pub use commands::{is_verbose, run};
