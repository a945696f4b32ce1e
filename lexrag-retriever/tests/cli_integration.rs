use anyhow::Result;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const PETS: &str = "the cat sat on the mat. the dog ran in the park.";

/// Helper to run the CLI binary against a document with given args
fn run_cli(document: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_lexrag-retriever"))
        .arg("--document")
        .arg(document)
        .args(["--chunk-size", "20", "--overlap", "5"])
        .args(args)
        .output()?;
    Ok(output)
}

/// Helper to write the test document into a temp directory
fn write_document(temp_dir: &TempDir, content: &str) -> Result<std::path::PathBuf> {
    let path = temp_dir.path().join("doc.txt");
    std::fs::write(&path, content)?;
    Ok(path)
}

/// Test that the binary runs and lists its subcommands
#[test]
fn test_cli_help() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_lexrag-retriever"))
        .arg("--help")
        .output()?;
    assert!(
        output.status.success(),
        "CLI help command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("CLI tool to retrieve"));
    for command in ["query", "chunks", "stats", "prompt", "interactive"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
    Ok(())
}

#[test]
fn test_cli_query_text() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let document = write_document(&temp_dir, PETS)?;

    let output = run_cli(&document, &["query", "cat and dog"])?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "the cat sat on the m\nthe mat. the dog ran\n"
    );
    Ok(())
}

#[test]
fn test_cli_query_no_match() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let document = write_document(&temp_dir, PETS)?;

    let output = run_cli(&document, &["query", "zebra"])?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "No relevant context found.\n"
    );
    Ok(())
}

#[test]
fn test_cli_query_json() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let document = write_document(&temp_dir, PETS)?;

    let output = run_cli(&document, &["query", "park ran", "--format", "json"])?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["found"], true);
    assert_eq!(json["results"][0]["offset"], 30);
    assert_eq!(json["results"][0]["score"], 2);
    assert_eq!(json["results"][1]["offset"], 15);
    assert_eq!(json["top_k"], 3);
    Ok(())
}

#[test]
fn test_cli_stats() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let document = write_document(&temp_dir, PETS)?;

    let output = run_cli(&document, &["stats"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Document length: 48 chars"));
    assert!(stdout.contains("Total chunks: 4"));
    assert!(stdout.contains("Chunk size: 20 | Overlap: 5 | Stride: 15"));
    Ok(())
}

#[test]
fn test_cli_chunks_json() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let document = write_document(&temp_dir, PETS)?;

    let output = run_cli(&document, &["chunks", "--format", "json", "--limit", "2"])?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let chunks = json.as_array().expect("chunk list");
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[1]["offset"], 15);
    Ok(())
}

#[test]
fn test_cli_interactive() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let document = write_document(&temp_dir, PETS)?;

    let mut child = Command::new(env!("CARGO_BIN_EXE_lexrag-retriever"))
        .arg("--document")
        .arg(&document)
        .args(["--chunk-size", "20", "--overlap", "5", "interactive"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(b"cat\nzebra\n")?;
    let output = child.wait_with_output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "the cat sat on the m\n---\nNo relevant context found.\n---\n"
    );
    Ok(())
}

/// A missing document is reported before any query runs
#[test]
fn test_cli_missing_document() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let output = run_cli(&temp_dir.path().join("missing.txt"), &["query", "cat"])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("Document not found"));
    Ok(())
}

#[test]
fn test_cli_rejects_non_advancing_chunking() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let document = write_document(&temp_dir, PETS)?;

    let output = Command::new(env!("CARGO_BIN_EXE_lexrag-retriever"))
        .arg("--document")
        .arg(&document)
        .args(["--chunk-size", "10", "--overlap", "10", "query", "cat"])
        .output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("overlap (10) must be smaller"));
    Ok(())
}

#[test]
fn test_cli_config_file() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let document = write_document(&temp_dir, PETS)?;
    let config = temp_dir.path().join("lexrag.toml");
    std::fs::write(
        &config,
        format!(
            "document = {:?}\ntop_k = 1\n\n[chunking]\nchunk_size = 20\noverlap = 5\n",
            document.to_string_lossy()
        ),
    )?;

    let output = Command::new(env!("CARGO_BIN_EXE_lexrag-retriever"))
        .arg("--config")
        .arg(&config)
        .args(["query", "cat and dog"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "the cat sat on the m\n");
    Ok(())
}
