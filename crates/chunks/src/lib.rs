//! # Assistant Chunks
//!
//! The shared data model for retrievable code fragments.
//!
//! A [`Chunk`] is the atomic unit the whole pipeline moves around: a piece of
//! source text plus the metadata the ingestion front end attached to it
//! (repository, path, logical component, optional class/function names, API
//! route markers). Chunks are immutable once stored; re-ingesting a
//! repository supersedes its chunks rather than merging them.

mod error;
mod types;

pub use error::{ChunkError, Result};
pub use types::{ApiRoute, Chunk, ChunkType};
