use thiserror::Error;

pub type Result<T> = std::result::Result<T, LlmError>;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Retrieval error: {0}")]
    RetrievalError(#[from] assistant_retrieval::RetrievalError),

    #[error("Classification error: {0}")]
    ClassificationError(String),

    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("{0}")]
    Other(String),
}
