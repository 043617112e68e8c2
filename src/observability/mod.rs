//! Logging and lightweight counters, grounded on the teacher's
//! `observability::tracing_init` / `observability::metrics`.

mod metrics;
mod tracing_init;

pub use metrics::Metrics;
pub use tracing_init::{TracingError, TracingGuard, init_tracing};
