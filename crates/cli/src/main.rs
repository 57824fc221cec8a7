//! `codebase-assistant` — ingest pre-chunked repositories and query them.
//!
//! The answer-generation step runs behind an HTTP service in production;
//! this binary drives the same ingestion pipeline and hybrid retriever
//! directly against a file-backed index, which is all the core needs for
//! local inspection and debugging.

mod chunk_file;

use anyhow::{bail, Context, Result};
use assistant_graph::DependencyGraph;
use assistant_indexer::IngestPipeline;
use assistant_retrieval::{HybridRetriever, Intent, RetrievalQuery};
use assistant_retrieval::{DEFAULT_EXPAND_DEPTH, DEFAULT_TOP_K};
use assistant_vector_store::{InMemoryIndex, TokenHashEmbedder};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "codebase-assistant", version, about = "Ask questions about ingested codebases")]
struct Cli {
    /// Directory holding the index and graph files
    #[arg(long, default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest a chunk file for a repository, superseding earlier chunks
    Ingest {
        /// Repository name the chunks belong to
        #[arg(long)]
        repo: String,

        /// JSON chunk file produced by the extraction front end
        #[arg(long)]
        chunks: PathBuf,
    },

    /// Retrieve ranked code fragments for a query
    Retrieve {
        /// Repository to search
        #[arg(long)]
        repo: String,

        /// The question text
        query: String,

        /// Intent label; omit to use the default strategy
        #[arg(long)]
        intent: Option<String>,

        /// Nearest-neighbor seeds for the semantic path
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,

        /// Graph expansion rounds
        #[arg(long, default_value_t = DEFAULT_EXPAND_DEPTH)]
        depth: usize,
    },

    /// List ingested repositories
    Repos,
}

fn index_path(data_dir: &Path) -> PathBuf {
    data_dir.join("index.json")
}

fn graph_path(data_dir: &Path) -> PathBuf {
    data_dir.join("graph").join("graph.json")
}

async fn open_index(data_dir: &Path) -> Result<InMemoryIndex> {
    let path = index_path(data_dir);
    if !path.exists() {
        bail!(
            "no index at {}; run `codebase-assistant ingest` first",
            path.display()
        );
    }
    InMemoryIndex::load(&path)
        .await
        .with_context(|| format!("load index {}", path.display()))
}

async fn run_ingest(data_dir: &Path, repo: &str, chunks: &Path) -> Result<()> {
    let records = chunk_file::load_chunks(chunks, repo).await?;

    let index = if index_path(data_dir).exists() {
        open_index(data_dir).await?
    } else {
        tokio::fs::create_dir_all(data_dir)
            .await
            .with_context(|| format!("create {}", data_dir.display()))?;
        InMemoryIndex::new()
    };
    let index = Arc::new(index);

    let pipeline = IngestPipeline::new(
        index.clone(),
        Arc::new(TokenHashEmbedder::default()),
        graph_path(data_dir),
    );
    let report = pipeline.ingest(repo, records).await?;
    index.save(index_path(data_dir)).await?;

    println!(
        "Ingested '{}': {} chunks stored, {} superseded, {} graph nodes",
        report.repo_name, report.stored, report.superseded, report.graph_nodes
    );
    Ok(())
}

async fn run_retrieve(
    data_dir: &Path,
    repo: &str,
    query_text: &str,
    intent: Option<&str>,
    top_k: usize,
    depth: usize,
) -> Result<()> {
    let intent = match intent {
        Some(label) => Intent::from_label(label).with_context(|| {
            format!(
                "unknown intent '{label}'; expected one of \
                 overview, api, flow, setup, specific, general, architecture, dependency"
            )
        })?,
        None => Intent::General,
    };

    let index = Arc::new(open_index(data_dir).await?);
    let graph = DependencyGraph::load_or_empty(graph_path(data_dir)).await;
    let retriever = HybridRetriever::new(index, Arc::new(TokenHashEmbedder::default()), graph);

    let query = RetrievalQuery::new(query_text, repo, intent)
        .top_k(top_k)
        .expand_depth(depth);
    let fragments = retriever.retrieve(&query).await?;

    if fragments.is_empty() {
        println!("No fragments found for repo '{repo}'");
        return Ok(());
    }

    for (i, fragment) in fragments.iter().enumerate() {
        println!("---- fragment {} ----", i + 1);
        println!("{fragment}");
    }
    Ok(())
}

async fn run_repos(data_dir: &Path) -> Result<()> {
    use assistant_vector_store::VectorIndex as _;

    let index = open_index(data_dir).await?;
    let repos = index.repos().await?;
    if repos.is_empty() {
        println!("No repositories ingested");
    } else {
        for repo in repos {
            println!("{repo}");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Ingest { repo, chunks } => run_ingest(&cli.data_dir, repo, chunks).await,
        Command::Retrieve {
            repo,
            query,
            intent,
            top_k,
            depth,
        } => {
            run_retrieve(
                &cli.data_dir,
                repo,
                query,
                intent.as_deref(),
                *top_k,
                *depth,
            )
            .await
        }
        Command::Repos => run_repos(&cli.data_dir).await,
    }
}
