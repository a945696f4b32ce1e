//! Integration tests covering the load-once, query-many flow:
//! - Loading a document from disk and chunking it
//! - Ranking, tie-breaking and the no-context sentinel
//! - Sharing one retriever across concurrent queries
//! - Building prompt messages from retrieved context

use anyhow::Result;
use lexrag_retriever::{
    RetrieverError,
    config::{ChunkingConfig, RetrieverConfig},
    prompt::messages_for_query,
    retrieval::{NO_CONTEXT_SENTINEL, RetrievedContext, Retriever, load_retriever},
};
use std::sync::Arc;
use tempfile::tempdir;

const PETS: &str = "the cat sat on the mat. the dog ran in the park.";

/// Scenario: overlapping windows and a query that hits two of them
#[tokio::test]
async fn test_cat_and_dog_document() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("pets.txt");
    std::fs::write(&path, PETS)?;

    let retriever = load_retriever(&path, &ChunkingConfig::new(20, 5)).await?;

    let offsets: Vec<usize> = retriever.chunks().iter().map(|c| c.offset).collect();
    assert_eq!(offsets, vec![0, 15, 30, 45]);

    let ranked = retriever.rank("cat and dog", 3);
    assert_eq!(ranked.len(), 2);
    assert!(ranked.iter().all(|s| s.score >= 1));
    assert!(ranked[0].chunk.text.contains("cat"));
    assert!(ranked[1].chunk.text.contains("dog"));

    assert_eq!(
        retriever.query("cat and dog", 3),
        "the cat sat on the m\nthe mat. the dog ran"
    );
    Ok(())
}

/// Scenario: an empty document answers every query with the sentinel
#[tokio::test]
async fn test_empty_document() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("empty.txt");
    std::fs::write(&path, "")?;

    let retriever = load_retriever(&path, &ChunkingConfig::default()).await?;
    assert!(retriever.chunks().is_empty());
    for query in ["cat", "", "anything at all"] {
        assert_eq!(retriever.query(query, 3), NO_CONTEXT_SENTINEL);
    }
    Ok(())
}

/// Scenario: an empty query matches nothing
#[test]
fn test_empty_query() -> Result<()> {
    let retriever = Retriever::from_text(PETS, &ChunkingConfig::new(20, 5))?;
    assert_eq!(retriever.retrieve("", 3), RetrievedContext::NoMatch);
    assert_eq!(retriever.query("", 3), NO_CONTEXT_SENTINEL);
    Ok(())
}

/// Scenario: overlap equal to chunk size is rejected before chunking
#[test]
fn test_overlap_equal_to_chunk_size() {
    let err = Retriever::from_text(PETS, &ChunkingConfig::new(10, 10)).unwrap_err();
    assert!(matches!(err, RetrieverError::Chunking { .. }));

    let err = RetrieverConfig::default()
        .with_chunk_size(10)
        .with_overlap(10)
        .validate()
        .unwrap_err();
    assert!(matches!(err, RetrieverError::Chunking { .. }));
}

/// Scenario: two chunks tie, the earlier one comes first
#[test]
fn test_tie_break_by_offset() -> Result<()> {
    // Windows of 12: "orange kiwi " | "banana pear " | "orange kiwi "
    let text = "orange kiwi banana pear orange kiwi ";
    let retriever = Retriever::from_text(text, &ChunkingConfig::new(12, 0))?;

    let ranked = retriever.rank("kiwi orange", 3);
    let order: Vec<(usize, usize)> = ranked.iter().map(|s| (s.chunk.offset, s.score)).collect();
    assert_eq!(order, vec![(0, 2), (24, 2)]);

    assert_eq!(
        retriever.query("kiwi orange", 3),
        "orange kiwi \norange kiwi "
    );
    Ok(())
}

/// Missing documents fail before a retriever exists
#[tokio::test]
async fn test_missing_document() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("nope.txt");

    let err = load_retriever(&path, &ChunkingConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RetrieverError::DocumentNotFound { .. }));
    assert!(err.to_string().contains("nope.txt"));
    Ok(())
}

/// One retriever answers many concurrent queries identically
#[tokio::test]
async fn test_concurrent_queries() -> Result<()> {
    let retriever = Arc::new(Retriever::from_text(PETS, &ChunkingConfig::new(20, 5))?);
    let expected = retriever.query("park dog mat", 2);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let retriever = Arc::clone(&retriever);
        handles.push(tokio::spawn(async move {
            retriever.query("park dog mat", 2)
        }));
    }

    for handle in handles {
        assert_eq!(handle.await?, expected);
    }
    Ok(())
}

/// Prompt messages carry the retrieved context
#[test]
fn test_prompt_messages() -> Result<()> {
    let retriever = Retriever::from_text(PETS, &ChunkingConfig::new(20, 5))?;
    let (context, messages) = messages_for_query(&retriever, "where did the dog run", 1);

    assert!(context.is_found());
    assert!(messages[0].content.contains(context.as_str()));
    assert!(messages[0].content.contains("### CONTEXT ###"));
    assert_eq!(messages[1].content, "where did the dog run");
    Ok(())
}
