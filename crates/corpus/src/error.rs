use thiserror::Error;

pub type Result<T> = std::result::Result<T, CorpusError>;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("BibTeX parse error: {0}")]
    BibtexError(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported corpus format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}
