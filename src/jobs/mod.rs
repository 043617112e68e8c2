//! Job orchestration (C7 refresher, C8 scheduler): turns the configured set
//! of `SourceFeed` rows into a running set of periodic refresh jobs, each of
//! which fans out into its dependent `TranslatedFeed` translation jobs on a
//! successful pull. Grounded on the teacher's `jobs::start_*_worker` loop
//! idiom (`jobs/vector_store_cleanup.rs`, `jobs/model_catalog_sync.rs`).

mod error;
mod queue;
mod refresher;
mod scheduler;

pub use error::JobError;
pub use queue::JobQueue;
pub use scheduler::run_scheduler;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Client;

use crate::cache::TranslationCacheRepo;
use crate::config::{SchedulerConfig, ServerConfig};
use crate::db::{SourceFeedRepo, TranslatedFeedRepo};
use crate::engine::Engine;

/// Everything a job needs to do its work, grouped the way the teacher
/// groups its worker arguments (`db`, `vector_store`, `config`) rather than
/// passing each repo/engine map as a separate parameter.
#[derive(Clone)]
pub struct PipelineContext {
    pub source_feeds: Arc<dyn SourceFeedRepo>,
    pub translated_feeds: Arc<dyn TranslatedFeedRepo>,
    pub cache: Arc<dyn TranslationCacheRepo>,
    pub engines: HashMap<String, Arc<dyn Engine>>,
    pub http: Client,
    pub server: ServerConfig,
    pub scheduler: SchedulerConfig,
    pub queue: JobQueue,
}

impl PipelineContext {
    pub fn engine(&self, name: &str) -> Result<Arc<dyn Engine>, JobError> {
        self.engines
            .get(name)
            .cloned()
            .ok_or_else(|| JobError::UnknownEngine(name.to_string()))
    }

    /// Where a source feed's raw pulled XML lives (§4.7 step 6).
    pub fn source_feeds_path(&self, sid: &str) -> PathBuf {
        self.server.feeds_dir().join(format!("{sid}.xml"))
    }

    /// Where a translated feed's emitted artifact of extension `ext`
    /// (`"xml"` or `"json"`) lives.
    pub fn translated_feed_path(&self, sid: &str, ext: &str) -> PathBuf {
        self.server.feeds_dir().join(format!("{sid}.{ext}"))
    }
}
