use serde::{Deserialize, Serialize};

/// A memoized translation of one atomic text unit (§3 `TranslatedContent`).
///
/// `hash` is a deterministic function of `(original_content,
/// translated_language)` — see [`crate::cache::content_hash`]. Rows are
/// never mutated after insert and never evicted; the cache is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub hash: String,
    pub original_content: String,
    pub translated_language: String,
    pub translated_content: String,
    pub tokens: u64,
    pub characters: u64,
}

impl CacheEntry {
    pub fn new(
        original_content: impl Into<String>,
        translated_language: impl Into<String>,
        translated_content: impl Into<String>,
        tokens: u64,
        characters: u64,
    ) -> Self {
        let original_content = original_content.into();
        let translated_language = translated_language.into();
        let hash = crate::cache::content_hash(&original_content, &translated_language);
        Self {
            hash,
            original_content,
            translated_language,
            translated_content: translated_content.into(),
            tokens,
            characters,
        }
    }

    /// Cache key used by the summarizer, per §4.6.2: `"Summary_" + original`.
    pub fn summary_key(original_content: &str) -> String {
        format!("Summary_{original_content}")
    }
}
