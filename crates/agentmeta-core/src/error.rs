//! Error types for agentmeta-core.
//!
//! "No metadata block" is not an error: parsers report it as `Ok(None)`.
//! Every variant here is fatal to the call that produced it.

use std::path::{Path, PathBuf};

/// Result type alias for agentmeta operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting document metadata.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The document could not be read.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// An opening `---` delimiter was found but never closed.
    #[error("Malformed metadata block in {}: opening delimiter has no closing delimiter", .path.display())]
    MalformedBlock {
        /// Document containing the unterminated block
        path: PathBuf,
    },

    /// A metadata key was rejected by the key validator.
    #[error("Invalid metadata key '{key}' in {}", .path.display())]
    InvalidKey {
        /// The first offending key, in document order
        key: String,
        /// Document containing the key
        path: PathBuf,
    },

    /// The markup decoder could not parse the metadata block.
    #[error("Decode error: {message}")]
    Decode {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An agent definition field is missing or has the wrong shape.
    #[error("Invalid agent field '{field}': {message}")]
    InvalidField {
        /// Field name
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

impl Error {
    /// Creates an I/O error tagged with the path being accessed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a malformed-block error for the given document.
    pub fn malformed_block(path: impl AsRef<Path>) -> Self {
        Error::MalformedBlock {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates an invalid-key error.
    pub fn invalid_key<K: Into<String>>(key: K, path: impl AsRef<Path>) -> Self {
        Error::InvalidKey {
            key: key.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a decode error with a message.
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Error::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a decode error with a message and source error.
    pub fn decode_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an invalid-field error.
    pub fn invalid_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Returns the offending key for [`Error::InvalidKey`].
    pub fn invalid_key_name(&self) -> Option<&str> {
        match self {
            Error::InvalidKey { key, .. } => Some(key),
            _ => None,
        }
    }
}
