use assistant_chunks::Chunk;
use serde::{Deserialize, Serialize};

/// A chunk plus its embedding, as held by a [`crate::VectorIndex`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChunk {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

/// A ranked nearest-neighbor hit
#[derive(Debug, Clone)]
pub struct QueryMatch {
    pub chunk: Chunk,
    pub score: f32,
}
