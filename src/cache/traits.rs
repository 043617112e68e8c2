//! The cache repository contract (C1). Grounded on the teacher's
//! `cache::traits` split between a narrow trait and swappable backends
//! (there, `memory` vs `redis`; here, an in-memory reference implementation
//! lives in [`crate::db::memory`] since the spec treats the persistent store
//! itself as out of scope).

use async_trait::async_trait;

use crate::{db::DbResult, models::CacheEntry};

/// What a cache hit gives back to the caller — just enough to skip the
/// engine call and still account tokens/characters correctly.
#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub translated: String,
    pub tokens: u64,
    pub characters: u64,
}

#[async_trait]
pub trait TranslationCacheRepo: Send + Sync {
    /// Deterministic lookup by `(text, target_language)`. Returns `Ok(None)`
    /// on a cache miss; any other failure propagates (§4.1).
    async fn lookup(&self, text: &str, target_language: &str) -> DbResult<Option<CacheLookup>>;

    /// Insert all entries. Duplicate-hash conflicts are swallowed by the
    /// implementation (another worker's write is authoritative) and never
    /// surface as an error to the caller — §4.1, §7 error kind 3.
    async fn bulk_put(&self, entries: Vec<CacheEntry>);
}
