//! Lexical overlap retrieval over a single document's chunks.
//!
//! A [`Retriever`] owns the [`ChunkSet`] built once at load time and answers
//! queries against it without ever mutating it. For each query:
//!
//! 1. The query and every chunk are reduced to sets of lowercase words.
//! 2. A chunk's score is the number of distinct words it shares with the query.
//! 3. Chunks are ordered by score (highest first), ties by document order.
//! 4. Chunks scoring zero are dropped, then at most `top_k` are kept.
//! 5. The kept chunks are joined with newlines into one context string.
//!
//! When nothing scores above zero the result is [`NO_CONTEXT_SENTINEL`].
//!
//! Word sets are rebuilt for every chunk on every query, so a query costs time
//! proportional to the document length. This is fine for one modest document but
//! would need precomputed word sets or an inverted index for large corpora.

use super::tokenize::word_set;
use crate::config::ChunkingConfig;
use crate::error::Result;
use lexrag_context::{Chunk, ChunkSet};
use serde::Serialize;

/// Returned by [`Retriever::query`] when no chunk shares a word with the query.
pub const NO_CONTEXT_SENTINEL: &str = "No relevant context found.";

/// Number of chunks included in a context when the caller does not choose.
pub const DEFAULT_TOP_K: usize = 3;

/// Placed between chunks in a composed context.
pub const CONTEXT_SEPARATOR: &str = "\n";

/// A chunk paired with its overlap score for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    /// Number of distinct words shared with the query
    pub score: usize,
}

/// The outcome of a retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RetrievedContext {
    /// At least one chunk matched.
    Found {
        /// The selected chunks joined by [`CONTEXT_SEPARATOR`]
        text: String,
        /// Origin offsets of the selected chunks, in ranked order
        offsets: Vec<usize>,
    },
    /// The document is empty or no chunk shares a word with the query.
    NoMatch,
}

impl RetrievedContext {
    /// Compose the context from chunks already ranked best first.
    pub fn from_ranked(ranked: &[ScoredChunk<'_>]) -> Self {
        if ranked.is_empty() {
            return RetrievedContext::NoMatch;
        }

        let offsets = ranked.iter().map(|s| s.chunk.offset).collect();
        let text = ranked
            .iter()
            .map(|s| s.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);

        RetrievedContext::Found { text, offsets }
    }

    /// The context text, or [`NO_CONTEXT_SENTINEL`] when nothing matched.
    pub fn as_str(&self) -> &str {
        match self {
            RetrievedContext::Found { text, .. } => text,
            RetrievedContext::NoMatch => NO_CONTEXT_SENTINEL,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RetrievedContext::Found { .. })
    }

    pub fn into_string(self) -> String {
        match self {
            RetrievedContext::Found { text, .. } => text,
            RetrievedContext::NoMatch => NO_CONTEXT_SENTINEL.to_string(),
        }
    }
}

impl std::fmt::Display for RetrievedContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranks the chunks of one document by word overlap with a query.
///
/// The chunk set is never modified after construction, so a `Retriever` can be
/// shared between threads (for example behind an `Arc`) and queried concurrently.
///
/// # Examples
///
/// ```
/// use lexrag_retriever::config::ChunkingConfig;
/// use lexrag_retriever::retrieval::{NO_CONTEXT_SENTINEL, Retriever};
///
/// let retriever = Retriever::from_text(
///     "the cat sat on the mat. the dog ran in the park.",
///     &ChunkingConfig::new(20, 5),
/// )
/// .unwrap();
///
/// assert_eq!(retriever.query("cat and dog", 3), "the cat sat on the m\nthe mat. the dog ran");
/// assert_eq!(retriever.query("zebra", 3), NO_CONTEXT_SENTINEL);
/// ```
#[derive(Debug, Clone)]
pub struct Retriever {
    chunks: ChunkSet,
}

impl Retriever {
    /// Wrap an already built chunk set.
    pub fn new(chunks: ChunkSet) -> Self {
        Self { chunks }
    }

    /// Chunk `text` and build a retriever over the result.
    pub fn from_text(text: &str, chunking: &ChunkingConfig) -> Result<Self> {
        let chunks = chunking.chunker()?.chunk(text);
        Ok(Self::new(chunks))
    }

    pub fn chunks(&self) -> &ChunkSet {
        &self.chunks
    }

    /// Score every chunk against `query`, in document order.
    pub fn score(&self, query: &str) -> Vec<ScoredChunk<'_>> {
        let query_words = word_set(query);
        if query_words.is_empty() {
            return self
                .chunks
                .iter()
                .map(|chunk| ScoredChunk { chunk, score: 0 })
                .collect();
        }

        self.chunks
            .iter()
            .map(|chunk| {
                let chunk_words = word_set(&chunk.text);
                let score = query_words.intersection(&chunk_words).count();
                ScoredChunk { chunk, score }
            })
            .collect()
    }

    /// The chunks that make up the context for `query`, best first.
    ///
    /// Zero-score chunks are removed before the list is cut to `top_k`, so the
    /// result holds at most `min(top_k, matching chunks)` entries.
    pub fn rank(&self, query: &str, top_k: usize) -> Vec<ScoredChunk<'_>> {
        let mut scored = self.score(query);
        scored.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.chunk.offset.cmp(&b.chunk.offset))
        });
        scored.retain(|s| s.score > 0);
        scored.truncate(top_k);
        scored
    }

    /// Build the context for `query` from at most `top_k` chunks.
    pub fn retrieve(&self, query: &str, top_k: usize) -> RetrievedContext {
        let ranked = self.rank(query, top_k);

        tracing::debug!(
            "Query of {} chars matched {} of {} chunks (top_k {})",
            query.chars().count(),
            ranked.len(),
            self.chunks.len(),
            top_k
        );

        RetrievedContext::from_ranked(&ranked)
    }

    /// Build the context string for `query`, or [`NO_CONTEXT_SENTINEL`] if nothing matched.
    pub fn query(&self, query: &str, top_k: usize) -> String {
        self.retrieve(query, top_k).into_string()
    }
}
