//! Loading the source document and building a retriever over it.

use super::retriever::Retriever;
use crate::config::ChunkingConfig;
use crate::error::{Result, RetrieverError};
use std::path::Path;

/// Read the source document as UTF-8 text.
///
/// A path that does not exist (or is not a regular file) is reported as
/// [`RetrieverError::DocumentNotFound`]; any other read or decoding failure as
/// [`RetrieverError::DocumentUnreadable`].
pub async fn load_document(path: &Path) -> Result<String> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RetrieverError::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(RetrieverError::DocumentUnreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if !metadata.is_file() {
        return Err(RetrieverError::DocumentNotFound {
            path: path.to_path_buf(),
        });
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RetrieverError::DocumentUnreadable {
            path: path.to_path_buf(),
            source,
        })
}

/// Load the document at `path`, chunk it, and build a [`Retriever`] over it.
///
/// The chunking parameters are checked before the file is touched.
pub async fn load_retriever(path: &Path, chunking: &ChunkingConfig) -> Result<Retriever> {
    let chunker = chunking.chunker()?;
    let text = load_document(path).await?;
    let chunks = chunker.chunk(&text);

    tracing::info!(
        "Split {} into {} chunks (size {}, overlap {})",
        path.display(),
        chunks.len(),
        chunker.chunk_size(),
        chunker.overlap()
    );
    if chunks.is_empty() {
        tracing::warn!("{} is empty, every query will find no context", path.display());
    }

    Ok(Retriever::new(chunks))
}
