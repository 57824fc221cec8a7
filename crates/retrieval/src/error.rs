use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetrievalError>;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] assistant_vector_store::VectorStoreError),

    #[error("{0}")]
    Other(String),
}
