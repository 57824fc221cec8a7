use crate::error::Result;
use crate::types::{QueryMatch, StoredChunk};
use assistant_chunks::Chunk;
use async_trait::async_trait;

/// Storage and nearest-neighbor search over embedded chunks.
///
/// Every read the retrieval core performs goes through this trait, so a
/// repository filter applied here is the cross-repo isolation boundary.
/// Implementations own their timeouts; callers treat any returned error as
/// fatal for the current request.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert or overwrite records by `chunk_id`. Idempotent.
    async fn upsert(&self, records: Vec<StoredChunk>) -> Result<()>;

    /// Ranked nearest-neighbor query, optionally scoped to one repository.
    async fn query(
        &self,
        embedding: &[f32],
        repo_name: Option<&str>,
        top_k: usize,
    ) -> Result<Vec<QueryMatch>>;

    /// Full scan of every stored chunk, in a stable order.
    ///
    /// The heuristic strategies and the graph-expansion fetch filter this
    /// scan client-side. A real deployment should replace those scans with
    /// an index over `repo_name`/`chunk_type` instead of paying O(corpus)
    /// per request.
    async fn scan_all(&self) -> Result<Vec<Chunk>>;

    /// Remove every chunk stored under a repository; returns how many were
    /// removed. Re-ingestion supersedes, it never merges.
    async fn delete_repo(&self, repo_name: &str) -> Result<usize>;

    /// Sorted list of repository names with at least one stored chunk.
    async fn repos(&self) -> Result<Vec<String>>;
}
