//! lexrag-retriever: Keyword-overlap context retrieval over a single document
//!
//! This crate loads one text document, splits it into overlapping windows with
//! [`lexrag_context`], and answers free-text queries with the windows that share
//! the most words with the query. The result is a single context string ready to
//! be placed in front of a language model.
//!
//! ## Key Modules
//!
//! - **[`retrieval`]**: Document loading, tokenization, scoring and ranking
//! - **[`config`]**: Chunking and result-count settings, loadable from TOML
//! - **[`prompt`]**: Wrapping a context into chat messages
//! - **[`error`]**: Error types for loading and configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lexrag_retriever::config::RetrieverConfig;
//! use lexrag_retriever::retrieval::load_retriever;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = RetrieverConfig::default();
//! let retriever = load_retriever(Path::new("handbook.txt"), &config.chunking).await?;
//!
//! let context = retriever.query("how do refunds work", config.top_k);
//! println!("{context}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Document → Chunker → ChunkSet (built once) → Retriever::query → context
//! ```

pub mod config;
pub mod error;
pub mod prompt;
pub mod retrieval;

pub use error::{Result, RetrieverError};
