use crate::error::{IndexerError, Result};
use crate::repo_lock::RepoLocks;
use assistant_chunks::Chunk;
use assistant_graph::GraphBuilder;
use assistant_vector_store::{Embedder, StoredChunk, VectorIndex};
use std::path::PathBuf;
use std::sync::Arc;

/// Outcome of one ingestion batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub repo_name: String,
    /// Chunks stored from this batch
    pub stored: usize,
    /// Chunks from an earlier ingestion of the same repo that were removed
    pub superseded: usize,
    /// Nodes in the rebuilt dependency graph
    pub graph_nodes: usize,
}

/// Makes an ingestion batch the current state of one repository.
pub struct IngestPipeline {
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn Embedder>,
    graph_path: PathBuf,
    locks: RepoLocks,
}

impl IngestPipeline {
    pub fn new(
        index: Arc<dyn VectorIndex>,
        embedder: Arc<dyn Embedder>,
        graph_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            index,
            embedder,
            graph_path: graph_path.into(),
            locks: RepoLocks::new(),
        }
    }

    /// Ingest one batch for one repository.
    ///
    /// Holds the repository's write lock for the whole delete-embed-upsert
    /// sequence. The dependency graph is rebuilt from this batch alone and
    /// persisted; a write failure there fails the batch.
    pub async fn ingest(&self, repo_name: &str, chunks: Vec<Chunk>) -> Result<IngestReport> {
        for chunk in &chunks {
            if chunk.repo_name != repo_name {
                return Err(IndexerError::RepoMismatch {
                    expected: repo_name.to_string(),
                    found: chunk.repo_name.clone(),
                });
            }
        }

        let _guard = self.locks.acquire(repo_name).await;
        log::info!("Ingesting {} chunks for repo '{repo_name}'", chunks.len());

        let superseded = self.index.delete_repo(repo_name).await?;

        let texts: Vec<String> = chunks.iter().map(|c| c.code.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let records: Vec<StoredChunk> = chunks
            .iter()
            .cloned()
            .zip(embeddings)
            .map(|(chunk, embedding)| StoredChunk { chunk, embedding })
            .collect();
        let stored = records.len();
        self.index.upsert(records).await?;

        let graph = GraphBuilder::build(&chunks);
        let graph_nodes = graph.len();
        graph.save(&self.graph_path).await?;

        log::info!(
            "Repo '{repo_name}' ingested: {stored} chunks stored, {superseded} superseded, {graph_nodes} graph nodes"
        );

        Ok(IngestReport {
            repo_name: repo_name.to_string(),
            stored,
            superseded,
            graph_nodes,
        })
    }

    /// Repositories with at least one stored chunk
    pub async fn repos(&self) -> Result<Vec<String>> {
        Ok(self.index.repos().await?)
    }
}
