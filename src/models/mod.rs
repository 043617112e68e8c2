//! Persistent entity shapes (§3 of the design): [`SourceFeed`], [`TranslatedFeed`]
//! and the cache row [`CacheEntry`]. These are plain data, independent of how
//! they're stored — see [`crate::db`] for the repository traits that persist them.

mod cache_entry;
mod source_feed;
mod translated_feed;

pub use cache_entry::CacheEntry;
pub use source_feed::SourceFeed;
pub use translated_feed::TranslatedFeed;

/// Tri-state outcome of the last attempt at something: we haven't tried yet,
/// it worked, or it didn't. `Unknown` also means "needs re-evaluation" —
/// the refresher resets a translated feed's `status` to `Unknown` on every
/// successful parent pull to force the orchestrator to look at it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum TriState {
    #[default]
    Unknown,
    True,
    False,
}

impl TriState {
    pub fn from_bool(b: bool) -> Self {
        if b { TriState::True } else { TriState::False }
    }
}

/// Controls whether a translated feed shows only the translation, or both
/// languages side by side, and in which order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum DisplayMode {
    TranslationOnly = 0,
    TranslationThenOriginal = 1,
    OriginalThenTranslation = 2,
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::TranslationOnly
    }
}
