pub mod loader;
pub mod retriever;
pub mod tokenize;

pub use loader::{load_document, load_retriever};
pub use retriever::{
    CONTEXT_SEPARATOR, DEFAULT_TOP_K, NO_CONTEXT_SENTINEL, RetrievedContext, Retriever,
    ScoredChunk,
};
pub use tokenize::word_set;
