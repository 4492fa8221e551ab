//! Error types for the extraction pipeline.

use std::path::PathBuf;

/// Errors that abort a job. Data-quality problems (missing pages, fields
/// that fail every strategy) are warnings, not errors; only environment
/// failures end up here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A page that must exist in the mirror is absent.
    #[error("required page missing from mirror: {0}")]
    MissingPage(PathBuf),

    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
