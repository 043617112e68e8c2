use thiserror::Error;

use crate::db::DbError;
use crate::engine::EngineError;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
