use crate::error::{Result, VectorStoreError};
use crate::index::VectorIndex;
use crate::types::{QueryMatch, StoredChunk};
use assistant_chunks::Chunk;
use async_trait::async_trait;
use ndarray::ArrayView1;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

/// In-memory reference implementation of [`VectorIndex`].
///
/// Records keep their insertion position across overwrites, so `scan_all`
/// order and ranking tie-breaks are stable for a fixed ingestion history.
/// Interior mutability lets one index serve concurrent requests; writes for
/// the same repository are serialized one level up, by the ingestion
/// pipeline.
pub struct InMemoryIndex {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    records: Vec<StoredChunk>,
    by_id: HashMap<String, usize>,
}

impl Inner {
    fn reindex(&mut self) {
        self.by_id = self
            .records
            .iter()
            .enumerate()
            .map(|(idx, record)| (record.chunk.chunk_id.clone(), idx))
            .collect();
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let a = ArrayView1::from(a);
    let b = ArrayView1::from(b);
    let denom = a.dot(&a).sqrt() * b.dot(&b).sqrt();
    if denom > 0.0 {
        a.dot(&b) / denom
    } else {
        0.0
    }
}

impl InMemoryIndex {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.inner.read().expect("index lock poisoned").records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Save the full record set to a JSON file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = {
            let inner = self.inner.read().expect("index lock poisoned");
            serde_json::to_string_pretty(&inner.records)?
        };
        tokio::fs::write(path.as_ref(), data).await?;
        log::info!("Vector index saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Load a record set previously written by [`Self::save`]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = tokio::fs::read_to_string(path.as_ref()).await?;
        let records: Vec<StoredChunk> = serde_json::from_str(&data)?;
        log::info!(
            "Loaded {} records from {}",
            records.len(),
            path.as_ref().display()
        );

        let mut inner = Inner {
            records,
            by_id: HashMap::new(),
        };
        inner.reindex();

        Ok(Self {
            inner: RwLock::new(inner),
        })
    }

    fn check_dimension(expected: Option<usize>, actual: usize) -> Result<()> {
        match expected {
            Some(expected) if expected != actual => {
                Err(VectorStoreError::InvalidDimension { expected, actual })
            }
            _ => Ok(()),
        }
    }
}

impl Default for InMemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn upsert(&self, records: Vec<StoredChunk>) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut inner = self.inner.write().expect("index lock poisoned");
        let expected = inner.records.first().map(|r| r.embedding.len());

        for record in records {
            Self::check_dimension(expected, record.embedding.len())?;

            match inner.by_id.get(&record.chunk.chunk_id).copied() {
                Some(idx) => inner.records[idx] = record,
                None => {
                    let idx = inner.records.len();
                    inner.by_id.insert(record.chunk.chunk_id.clone(), idx);
                    inner.records.push(record);
                }
            }
        }

        log::debug!("Index now holds {} records", inner.records.len());
        Ok(())
    }

    async fn query(
        &self,
        embedding: &[f32],
        repo_name: Option<&str>,
        top_k: usize,
    ) -> Result<Vec<QueryMatch>> {
        let inner = self.inner.read().expect("index lock poisoned");

        if let Some(expected) = inner.records.first().map(|r| r.embedding.len()) {
            Self::check_dimension(Some(expected), embedding.len())?;
        }

        let mut scored: Vec<(usize, f32)> = inner
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                repo_name.is_none_or(|repo| record.chunk.repo_name == repo)
            })
            .map(|(idx, record)| (idx, cosine(embedding, &record.embedding)))
            .collect();

        // Score descending, insertion order on ties, for reproducible ranking
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(idx, score)| QueryMatch {
                chunk: inner.records[idx].chunk.clone(),
                score,
            })
            .collect())
    }

    async fn scan_all(&self) -> Result<Vec<Chunk>> {
        let inner = self.inner.read().expect("index lock poisoned");
        Ok(inner.records.iter().map(|r| r.chunk.clone()).collect())
    }

    async fn delete_repo(&self, repo_name: &str) -> Result<usize> {
        let mut inner = self.inner.write().expect("index lock poisoned");
        let before = inner.records.len();
        inner.records.retain(|r| r.chunk.repo_name != repo_name);
        let removed = before - inner.records.len();
        if removed > 0 {
            inner.reindex();
            log::info!("Removed {removed} records for repo '{repo_name}'");
        }
        Ok(removed)
    }

    async fn repos(&self) -> Result<Vec<String>> {
        let inner = self.inner.read().expect("index lock poisoned");
        let mut repos: Vec<String> = inner
            .records
            .iter()
            .map(|r| r.chunk.repo_name.clone())
            .collect();
        repos.sort();
        repos.dedup();
        Ok(repos)
    }
}
