pub mod text;

// Re-export the chunking entry points for external use
pub use text::{
    Chunk, ChunkSet, ChunkingError, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, FixedWindowChunker, chunk,
};
