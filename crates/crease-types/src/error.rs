use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown ball kind: {0}")]
    UnknownKind(String),

    #[error("ball id must not be empty")]
    EmptyId,
}
