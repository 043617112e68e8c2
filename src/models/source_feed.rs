use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TriState;

/// A subscription to an upstream RSS/Atom URL (§3 `SourceFeed`).
///
/// Mutated only by the [`crate::jobs::refresher`]; created and destroyed by
/// whatever owns the administrative surface, which is out of scope here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFeed {
    /// Opaque stable identifier. Unique; used as the job queue's first argument.
    pub sid: String,
    pub url: String,
    /// Human display name. Starts as a placeholder ("Loading") until the
    /// first successful fetch supplies the feed's own title.
    pub name: String,
    /// Refresh cadence in minutes. Must be >= 1.
    pub update_period: u32,
    /// Opaque ETag echoed back verbatim from the last 200 response.
    pub etag: String,
    /// The feed's own `updated` timestamp, as reported by the source.
    pub last_updated: Option<DateTime<Utc>>,
    /// When we last attempted a fetch, regardless of outcome. Monotonic.
    pub last_pull: Option<DateTime<Utc>>,
    /// Size in bytes of the stored raw XML.
    pub size: u64,
    /// Outcome of the most recent fetch attempt.
    pub valid: TriState,
    /// Per-refresh cap on how many entries flow downstream to translation.
    pub max_posts: usize,
    /// Name of the engine used to translate titles/content for dependents.
    pub translator_ref: Option<String>,
    /// Name of the engine used to summarize, if any dependent wants summaries.
    pub summary_engine_ref: Option<String>,
    /// [0, 1] knob interpolating summarization detail.
    pub summary_detail: f64,
    pub translation_display: super::DisplayMode,
    /// Quality mode: chunked Markdown translation instead of per-tag.
    pub quality: bool,
    /// Replace entry content with the full linked article before translating.
    pub fetch_article: bool,
}

pub const PLACEHOLDER_NAMES: [&str; 2] = ["Loading", "Empty"];

impl SourceFeed {
    pub fn needs_name(&self) -> bool {
        self.name.is_empty() || PLACEHOLDER_NAMES.contains(&self.name.as_str())
    }
}
