use clap::{Parser, Subcommand};
use lexrag_retriever::{
    config::RetrieverConfig,
    prompt::messages_for_query,
    retrieval::{RetrievedContext, Retriever, ScoredChunk, load_retriever},
};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A CLI tool to retrieve keyword-matched context from a text document.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Document to load (overrides the configuration file)
    #[arg(short, long, global = true)]
    document: Option<PathBuf>,

    /// Maximum chunk length in characters
    #[arg(long, global = true)]
    chunk_size: Option<usize>,

    /// Characters shared between consecutive chunks
    #[arg(long, global = true)]
    overlap: Option<usize>,

    /// Maximum number of chunks in a context
    #[arg(short = 'k', long, global = true)]
    top_k: Option<usize>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Retrieve the context for a query
    Query {
        /// Query text
        text: String,
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
    /// List the chunks of the document
    Chunks {
        /// Limit number of results
        #[arg(short, long, default_value_t = 100)]
        limit: usize,
        /// Output format
        #[arg(short, long, default_value = "summary")]
        format: OutputFormat,
    },
    /// Show document and chunking statistics
    Stats {
        /// Output format
        #[arg(short, long, default_value = "summary")]
        format: OutputFormat,
    },
    /// Print the chat messages built around the context for a query
    Prompt {
        /// User message
        text: String,
    },
    /// Answer one query per line read from stdin
    Interactive {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum OutputFormat {
    Text,
    Summary,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "summary" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {s}")),
        }
    }
}

#[derive(Serialize)]
struct RankedOutput<'a> {
    sequence: usize,
    offset: usize,
    score: usize,
    text: &'a str,
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    top_k: usize,
    found: bool,
    results: Vec<RankedOutput<'a>>,
    context: String,
}

#[derive(Serialize)]
struct StatsOutput {
    document: PathBuf,
    document_chars: usize,
    total_chunks: usize,
    chunk_size: usize,
    overlap: usize,
    stride: usize,
    top_k: usize,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn resolve_config(args: &Args) -> anyhow::Result<RetrieverConfig> {
    let mut config = match &args.config {
        Some(path) => RetrieverConfig::from_file(path)?,
        None => RetrieverConfig::default(),
    };

    if let Some(document) = &args.document {
        config = config.with_document(document);
    }
    if let Some(chunk_size) = args.chunk_size {
        config = config.with_chunk_size(chunk_size);
    }
    if let Some(overlap) = args.overlap {
        config = config.with_overlap(overlap);
    }
    if let Some(top_k) = args.top_k {
        config = config.with_top_k(top_k);
    }

    config.validate()?;
    Ok(config)
}

fn query_output<'a>(query: &'a str, top_k: usize, retriever: &'a Retriever) -> QueryOutput<'a> {
    let ranked: Vec<ScoredChunk<'a>> = retriever.rank(query, top_k);
    let context = RetrievedContext::from_ranked(&ranked);
    QueryOutput {
        query,
        top_k,
        found: context.is_found(),
        results: ranked
            .into_iter()
            .map(|s| RankedOutput {
                sequence: s.chunk.sequence,
                offset: s.chunk.offset,
                score: s.score,
                text: s.chunk.text.as_str(),
            })
            .collect(),
        context: context.into_string(),
    }
}

async fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&args)?;
    let document = config
        .document
        .clone()
        .ok_or_else(|| {
            anyhow::anyhow!("No document configured (use --document or a config file)")
        })?;
    let retriever = load_retriever(&document, &config.chunking).await?;

    match args.command {
        Commands::Query { text, format } => {
            match format {
                OutputFormat::Json => {
                    let output = query_output(&text, config.top_k, &retriever);
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text | OutputFormat::Summary => {
                    println!("{}", retriever.query(&text, config.top_k));
                }
            }
            Ok(())
        }
        Commands::Chunks { limit, format } => {
            let chunks = &retriever.chunks().as_slice()[..limit.min(retriever.chunks().len())];
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(chunks)?);
                }
                OutputFormat::Summary => {
                    println!("Found {} chunks:", retriever.chunks().len());
                    for chunk in chunks {
                        let span = chunk.span();
                        println!(
                            "  #{} | Chars: {}-{} | {:?}",
                            chunk.sequence,
                            span.start,
                            span.end,
                            chunk.text.chars().take(40).collect::<String>()
                        );
                    }
                }
                OutputFormat::Text => {
                    for chunk in chunks {
                        println!("--- chunk {} (offset {}) ---", chunk.sequence, chunk.offset);
                        println!("{}", chunk.text);
                    }
                }
            }
            Ok(())
        }
        Commands::Stats { format } => {
            let chunker = config.chunking.chunker()?;
            let document_chars = retriever.chunks().iter().last().map_or(0, |c| c.span().end);
            let stats = StatsOutput {
                document,
                document_chars,
                total_chunks: retriever.chunks().len(),
                chunk_size: chunker.chunk_size(),
                overlap: chunker.overlap(),
                stride: chunker.stride(),
                top_k: config.top_k,
            };
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            println!("Document: {}", stats.document.display());
            println!("Document length: {} chars", stats.document_chars);
            println!("Total chunks: {}", stats.total_chunks);
            println!(
                "Chunk size: {} | Overlap: {} | Stride: {}",
                stats.chunk_size, stats.overlap, stats.stride
            );
            println!("Top k: {}", stats.top_k);
            Ok(())
        }
        Commands::Prompt { text } => {
            let (_, messages) = messages_for_query(&retriever, &text, config.top_k);
            println!("{}", serde_json::to_string_pretty(&messages)?);
            Ok(())
        }
        Commands::Interactive { format } => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                match format {
                    OutputFormat::Json => {
                        let output = query_output(&line, config.top_k, &retriever);
                        println!("{}", serde_json::to_string(&output)?);
                    }
                    OutputFormat::Text | OutputFormat::Summary => {
                        println!("{}", retriever.query(&line, config.top_k));
                        println!("---");
                    }
                }
            }
            Ok(())
        }
    }
}
