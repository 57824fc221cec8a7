use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChunkError>;

#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    Other(String),
}
