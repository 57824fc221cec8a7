//! # Assistant Indexer
//!
//! Per-repository ingestion of pre-chunked code.
//!
//! The file walking and chunk splitting happen upstream; this crate takes a
//! batch of [`assistant_chunks::Chunk`] records for one repository and makes
//! it the repository's current state: delete the old chunks (supersede, not
//! merge), embed and upsert the new ones, rebuild the dependency graph from
//! the new batch only, persist it. A graph write failure fails the batch.
//!
//! Ingestion for the same repository is serialized by [`RepoLocks`] so
//! concurrent re-ingestion cannot interleave the delete and the insert.
//! Readers of *other* repositories are unaffected throughout.

mod error;
mod pipeline;
mod repo_lock;

pub use error::{IndexerError, Result};
pub use pipeline::{IngestPipeline, IngestReport};
pub use repo_lock::RepoLocks;
