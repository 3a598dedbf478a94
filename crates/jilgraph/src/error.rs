//! Error types for jilgraph operations.
//!
//! Parsing never produces these: malformed input lines become
//! [`jilgraph_formats::Warning`]s. Errors only arise at the edges, when
//! reading files, loading configuration, or naming a job that does not exist.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for jilgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An input file could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Job not found in the definitions.
    #[error("Job not found: {0}")]
    JobNotFound(String),
}

/// A specialized Result type for jilgraph operations.
pub type Result<T> = std::result::Result<T, Error>;
