//! Error types for agentmeta-cli

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for agentmeta-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in agentmeta-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from agentmeta-core or agentmeta-content
    #[error(transparent)]
    Core(#[from] agentmeta_core::Error),

    /// Writing to the terminal failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// JSON rendering failed
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML rendering failed
    #[error("YAML encoding error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A file that must describe an agent has no metadata block
    #[error("No metadata block in {}", .path.display())]
    NoMetadata {
        /// The file that was read
        path: PathBuf,
    },

    /// One or more files failed `check`
    #[error("{failed} of {total} files failed")]
    CheckFailed {
        /// Number of failing files
        failed: usize,
        /// Number of files checked
        total: usize,
    },
}
