use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {0} not found")]
    NodeNotFound(String),

    #[error("relation from {0} to itself ignored")]
    SelfRelationIgnored(String),
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
