//! Counters for the pipeline's own operational state, separate from
//! `tracing` spans. Grounded on the teacher's `observability::metrics`
//! helper functions (`record_cleanup_error`, `record_cleanup_deletion`);
//! this crate keeps the same style of small free functions wrapping
//! `tracing` events rather than pulling in a metrics exporter, since there's
//! no HTTP surface here to scrape a `/metrics` endpoint from.

pub struct Metrics;

impl Metrics {
    pub fn record_refresh_success(sid: &str) {
        tracing::debug!(sid, "source feed refreshed");
    }

    pub fn record_refresh_failure(sid: &str, error: &str) {
        tracing::warn!(sid, error, "source feed refresh failed");
    }

    pub fn record_engine_empty_result(sid: &str, kind: &str, attempt: u32) {
        tracing::warn!(sid, kind, attempt, "engine returned empty result, retrying");
    }

    pub fn record_cache_hit(sid: &str) {
        tracing::trace!(sid, "translation cache hit");
    }

    pub fn record_cache_miss(sid: &str) {
        tracing::trace!(sid, "translation cache miss");
    }
}
