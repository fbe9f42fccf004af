use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Attribute source has no values to choose from")]
    EmptyAttributeSet,

    #[error("{0}")]
    Other(String),
}
