//! This module splits a document into overlapping, fixed-size windows ("chunks")
//! for lexical retrieval.
//!
//! The document is walked from the first character to the last. Each window is at
//! most `chunk_size` characters long and shares `overlap` characters with its
//! successor, so the window start advances by `chunk_size - overlap` (the stride)
//! every step. The final window may be shorter than `chunk_size`.
//!
//! The module defines three main items:
//! - [`FixedWindowChunker`]: Holds a validated `(chunk_size, overlap)` pair and
//!   produces chunks from text.
//! - [`Chunk`]: A single window with its origin offset in the document.
//! - [`ChunkSet`]: The ordered, immutable sequence of chunks for one document.
//!
//! Sizes and offsets are measured in characters (Unicode scalar values), never in
//! bytes, so a window never cuts a multi-byte character in half.
//!
//! # Usage
//!
//! ```
//! use lexrag_context::text::FixedWindowChunker;
//!
//! let chunker = FixedWindowChunker::new(20, 5).unwrap();
//! let chunks = chunker.chunk("the cat sat on the mat. the dog ran in the park.");
//!
//! let offsets: Vec<usize> = chunks.iter().map(|c| c.offset).collect();
//! assert_eq!(offsets, vec![0, 15, 30, 45]);
//! assert_eq!(chunks.get(0).unwrap().text, "the cat sat on the m");
//! assert_eq!(chunks.get(3).unwrap().text, "rk.");
//! ```
use serde::Serialize;
use std::ops::Range;

/// Window length used by the reference behaviour when nothing is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 400;

/// Characters shared by consecutive windows when nothing is configured.
pub const DEFAULT_OVERLAP: usize = 100;

/// Invalid chunking parameters.
///
/// Both variants are raised by [`FixedWindowChunker::new`], before any text is
/// looked at, because either one would stop the window from advancing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkingError {
    /// `chunk_size` was zero
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,

    /// `overlap` was not strictly less than `chunk_size`
    #[error("overlap ({overlap}) must be smaller than chunk size ({chunk_size})")]
    OverlapTooLarge { overlap: usize, chunk_size: usize },
}

/// A contiguous window of the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// The position of this chunk within its [`ChunkSet`] (0-indexed).
    pub sequence: usize,
    /// Character index of the first character of this chunk in the document.
    pub offset: usize,
    /// The text content of this chunk.
    pub text: String,
}

impl Chunk {
    /// Number of characters in this chunk.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Character range of the document covered by this chunk.
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.char_len()
    }
}

/// The ordered chunks of a single document, in ascending offset order.
///
/// A `ChunkSet` cannot be modified once built. It is empty only when the
/// document was empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChunkSet {
    chunks: Vec<Chunk>,
}

impl ChunkSet {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn get(&self, sequence: usize) -> Option<&Chunk> {
        self.chunks.get(sequence)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    pub fn as_slice(&self) -> &[Chunk] {
        &self.chunks
    }
}

impl<'a> IntoIterator for &'a ChunkSet {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

/// Splits text into overlapping windows of at most `chunk_size` characters.
///
/// Construction validates the parameters, so a chunker that exists can always
/// make progress through its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWindowChunker {
    chunk_size: usize,
    overlap: usize,
}

impl Default for FixedWindowChunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl FixedWindowChunker {
    /// Creates a new chunker.
    ///
    /// # Arguments
    ///
    /// *   `chunk_size` - Maximum number of characters in a chunk. Must be non-zero.
    /// *   `overlap` - Number of characters shared between a chunk and the next one.
    ///     Must be strictly smaller than `chunk_size`.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError`] if the parameters would produce a window that
    /// never advances.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexrag_context::text::{ChunkingError, FixedWindowChunker};
    ///
    /// assert!(FixedWindowChunker::new(400, 100).is_ok());
    /// assert_eq!(
    ///     FixedWindowChunker::new(10, 10),
    ///     Err(ChunkingError::OverlapTooLarge { overlap: 10, chunk_size: 10 })
    /// );
    /// ```
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ChunkingError> {
        if chunk_size == 0 {
            return Err(ChunkingError::ZeroChunkSize);
        }
        if overlap >= chunk_size {
            return Err(ChunkingError::OverlapTooLarge {
                overlap,
                chunk_size,
            });
        }

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance in characters between the starts of two consecutive chunks.
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// Splits `text` into a [`ChunkSet`].
    ///
    /// Windows start at character offsets `0, stride, 2 * stride, ...` and stop once
    /// the start reaches the end of the text. An empty text gives an empty set, and
    /// a text no longer than `chunk_size` gives a single chunk holding all of it.
    pub fn chunk(&self, text: &str) -> ChunkSet {
        // Byte position of every character boundary, including the end of the text,
        // so character offsets can be turned into slices without re-scanning.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        let mut chunks = Vec::with_capacity(char_count.div_ceil(self.stride()));
        let mut start = 0;
        while start < char_count {
            let end = (start + self.chunk_size).min(char_count);
            chunks.push(Chunk {
                sequence: chunks.len(),
                offset: start,
                text: text[boundaries[start]..boundaries[end]].to_string(),
            });
            start += self.stride();
        }

        ChunkSet { chunks }
    }
}

/// Splits `text` with a freshly validated [`FixedWindowChunker`].
///
/// ```
/// let chunks = lexrag_context::chunk("abcdefghij", 4, 1).unwrap();
/// let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
/// assert_eq!(texts, vec!["abcd", "defg", "ghij", "j"]);
/// ```
pub fn chunk(text: &str, chunk_size: usize, overlap: usize) -> Result<ChunkSet, ChunkingError> {
    Ok(FixedWindowChunker::new(chunk_size, overlap)?.chunk(text))
}
