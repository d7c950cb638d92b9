use thiserror::Error;

/// Failure taxonomy shared by every workflow operation. Validation failures
/// abort before any write; the only write is a single atomic transaction, so
/// no compensating rollback exists anywhere.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("unexpected internal error")]
    Internal(#[from] diesel::result::Error),
}
