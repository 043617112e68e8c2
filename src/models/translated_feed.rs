use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TriState;

/// A (source, target language, options) triple producing one translated
/// artifact (§3 `TranslatedFeed`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedFeed {
    pub sid: String,
    /// sid of the parent [`super::SourceFeed`].
    pub source_sid: String,
    pub target_language: String,
    pub translate_title: bool,
    pub translate_content: bool,
    pub summary: bool,
    pub status: TriState,
    /// Mirrors the parent's `last_pull` when this artifact was last
    /// successfully regenerated; `modified == parent.last_pull` means the
    /// artifact is current and the orchestrator can short-circuit.
    pub modified: Option<DateTime<Utc>>,
    pub size: u64,
    pub total_tokens: u64,
    pub total_characters: u64,
}

impl TranslatedFeed {
    /// §8: "`modified == parent.last_pull` implies the Orchestrator
    /// short-circuits and sets `status=true` without calling any engine."
    pub fn is_current(&self, parent_last_pull: Option<DateTime<Utc>>) -> bool {
        parent_last_pull.is_some() && self.modified == parent_last_pull
    }
}
