use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] assistant_vector_store::VectorStoreError),

    #[error("Graph error: {0}")]
    GraphError(#[from] assistant_graph::GraphError),

    #[error("Chunk belongs to repo '{found}', expected '{expected}'")]
    RepoMismatch { expected: String, found: String },

    #[error("{0}")]
    Other(String),
}
