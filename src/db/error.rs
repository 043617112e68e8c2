use thiserror::Error;

/// Errors from the repository boundary. Grounded on the teacher's
/// `db::error::DbError` — a small enum of failure *kinds*, not one variant
/// per backend, since the backend is swappable behind the repo traits.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type DbResult<T> = Result<T, DbError>;
