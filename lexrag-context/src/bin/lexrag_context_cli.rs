use clap::Parser;
use lexrag_context::text::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, FixedWindowChunker};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::process;

/// A CLI tool to split a text file into overlapping chunks, printed as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input text file. If not provided, reads from stdin.
    #[arg(short, long)]
    input: Option<String>,

    /// Maximum length of each chunk, in characters.
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Characters shared between consecutive chunks.
    #[arg(short, long, default_value_t = DEFAULT_OVERLAP)]
    overlap: usize,
}

#[derive(Serialize)]
struct ChunkReport<'a> {
    chunk_size: usize,
    overlap: usize,
    stride: usize,
    chunks: &'a lexrag_context::ChunkSet,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let chunker = FixedWindowChunker::new(args.chunk_size, args.overlap)?;

    let file_content = if let Some(input_path) = args.input {
        fs::read_to_string(input_path)?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let chunks = chunker.chunk(&file_content);

    let report = ChunkReport {
        chunk_size: chunker.chunk_size(),
        overlap: chunker.overlap(),
        stride: chunker.stride(),
        chunks: &chunks,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
