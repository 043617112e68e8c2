//! Top-level error type aggregating every subsystem's error enum.
//!
//! Individual modules define their own `thiserror` enum (`CacheError`,
//! `EngineError`, `FetchError`, ...) so call sites close to the failure can
//! match on specific variants. `PipelineError` exists for call sites that
//! only need "did the job succeed", such as the job queue's retry bookkeeping.

use thiserror::Error;

use crate::{
    db::DbError,
    engine::EngineError,
    feed::{EmitError, FetchError},
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("{0}")]
    Other(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
