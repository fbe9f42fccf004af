use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Vocabulary error: {0}")]
    VocabularyError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// An operation that reads a derived result ran before that result existed
    #[error("Prerequisite not computed: {0}")]
    PrerequisiteNotComputed(&'static str),

    #[error("{0}")]
    Other(String),
}
