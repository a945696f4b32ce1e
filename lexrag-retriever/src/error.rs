//! Error types for document loading and retrieval

use lexrag_context::ChunkingError;
use std::path::PathBuf;

/// Result type for retriever operations.
///
/// This is a convenience type alias that uses [`RetrieverError`] as the error type.
pub type Result<T> = std::result::Result<T, RetrieverError>;

/// Error type for everything that can go wrong before the first query is served.
///
/// Queries themselves never fail: an empty corpus or a query that matches nothing
/// is reported through [`crate::retrieval::RetrievedContext::NoMatch`], not here.
///
/// # Error Categories
///
/// - **Configuration Errors**: Invalid chunking parameters or result limits
/// - **Document Errors**: The source document is missing or cannot be read
/// - **Config File Errors**: The TOML configuration cannot be read or parsed
#[derive(Debug, thiserror::Error)]
pub enum RetrieverError {
    /// Error when the configuration is invalid
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Error when the chunking parameters cannot make progress
    #[error("Invalid chunking configuration: {source}")]
    Chunking {
        #[from]
        source: ChunkingError,
    },

    /// Error when the source document does not exist
    #[error("Document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    /// Error when the source document exists but cannot be read as UTF-8 text
    #[error("Failed to read document {path}: {source}")]
    DocumentUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error when the configuration file cannot be read
    #[error("Failed to read config file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error when the configuration file is not valid TOML for [`crate::config::RetrieverConfig`]
    #[error("Failed to parse config: {source}")]
    ConfigParse {
        #[from]
        source: toml::de::Error,
    },
}

impl RetrieverError {
    /// Create an invalid configuration error with a custom message.
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
