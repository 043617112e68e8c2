use thiserror::Error;

use crate::db::DbError;
use crate::feed::{EmitError, FetchError};
use crate::translate::OrchestratorError;

#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("no engine configured named {0}")]
    UnknownEngine(String),

    #[error("disk I/O on {1:?}: {0}")]
    Io(#[source] std::io::Error, std::path::PathBuf),
}
