//! Configuration for chunking and retrieval
//!
//! Settings can be read from a TOML file. Every field is optional and falls back to
//! the reference defaults (400-character chunks, 100 characters of overlap, 3 results):
//!
//! ```toml
//! document = "docs/handbook.txt"
//! top_k = 5
//!
//! [chunking]
//! chunk_size = 400
//! overlap = 100
//! ```

use crate::error::{Result, RetrieverError};
use crate::retrieval::DEFAULT_TOP_K;
use lexrag_context::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, FixedWindowChunker};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for splitting the document into chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChunkingConfig {
    /// Maximum size of each chunk in characters
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Build the chunker described by this configuration.
    pub fn chunker(&self) -> Result<FixedWindowChunker> {
        Ok(FixedWindowChunker::new(self.chunk_size, self.overlap)?)
    }
}

/// Top-level retriever configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrieverConfig {
    /// Path of the document to load
    pub document: Option<PathBuf>,
    /// Chunking parameters
    pub chunking: ChunkingConfig,
    /// Maximum number of chunks included in a context
    pub top_k: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            document: None,
            chunking: ChunkingConfig::default(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl RetrieverConfig {
    /// Read and validate a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| RetrieverError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_document(mut self, document: impl Into<PathBuf>) -> Self {
        self.document = Some(document.into());
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunking.chunk_size = chunk_size;
        self
    }

    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.chunking.overlap = overlap;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Check that the chunking parameters can make progress and that at least one
    /// result may be returned.
    pub fn validate(&self) -> Result<()> {
        self.chunking.chunker()?;
        if self.top_k == 0 {
            return Err(RetrieverError::invalid_config("top_k must be at least 1"));
        }
        Ok(())
    }
}
