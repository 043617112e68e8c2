//! In-memory repository implementations, backed by `dashmap` the way the
//! teacher keeps its own concurrent in-process registries (e.g. provider
//! health state) off a plain `Mutex<HashMap<_>>`.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{DbResult, SourceFeedRepo, TranslatedFeedRepo};
use crate::{
    cache::{CacheLookup, TranslationCacheRepo, content_hash},
    models::{CacheEntry, SourceFeed, TranslatedFeed},
};

/// In-memory [`SourceFeedRepo`].
#[derive(Default)]
pub struct MemorySourceFeedRepo {
    rows: DashMap<String, SourceFeed>,
}

#[async_trait]
impl SourceFeedRepo for MemorySourceFeedRepo {
    async fn get(&self, sid: &str) -> DbResult<Option<SourceFeed>> {
        Ok(self.rows.get(sid).map(|r| r.clone()))
    }

    async fn list(&self) -> DbResult<Vec<SourceFeed>> {
        Ok(self.rows.iter().map(|r| r.value().clone()).collect())
    }

    async fn save(&self, feed: SourceFeed) -> DbResult<()> {
        self.rows.insert(feed.sid.clone(), feed);
        Ok(())
    }

    async fn dependent_translated_sids(&self, _sid: &str) -> DbResult<Vec<String>> {
        // The source/translated relationship lives in MemoryTranslatedFeedRepo;
        // this method exists on the trait for backends that store the
        // relationship alongside the source row. Callers in this crate use
        // `TranslatedFeedRepo::dependents_of` instead.
        Ok(Vec::new())
    }
}

/// In-memory [`TranslatedFeedRepo`], indexed by sid with a secondary index
/// from source sid to dependent sids.
#[derive(Default)]
pub struct MemoryTranslatedFeedRepo {
    rows: DashMap<String, TranslatedFeed>,
}

#[async_trait]
impl TranslatedFeedRepo for MemoryTranslatedFeedRepo {
    async fn get(&self, sid: &str) -> DbResult<Option<TranslatedFeed>> {
        Ok(self.rows.get(sid).map(|r| r.clone()))
    }

    async fn save(&self, feed: TranslatedFeed) -> DbResult<()> {
        self.rows.insert(feed.sid.clone(), feed);
        Ok(())
    }

    async fn mark_dependents_unknown(&self, source_sid: &str) -> DbResult<()> {
        for mut row in self.rows.iter_mut() {
            if row.source_sid == source_sid {
                row.status = crate::models::TriState::Unknown;
            }
        }
        Ok(())
    }

    async fn dependents_of(&self, source_sid: &str) -> DbResult<Vec<String>> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.value().source_sid == source_sid)
            .map(|r| r.key().clone())
            .collect())
    }
}

/// In-memory [`TranslationCacheRepo`]. Writes are first-writer-wins, matching
/// the append-only, conflict-swallowing semantics of §4.1.
#[derive(Default)]
pub struct MemoryCacheRepo {
    rows: DashMap<String, CacheEntry>,
}

#[async_trait]
impl TranslationCacheRepo for MemoryCacheRepo {
    async fn lookup(&self, text: &str, target_language: &str) -> DbResult<Option<CacheLookup>> {
        let hash = content_hash(text, target_language);
        Ok(self.rows.get(&hash).map(|row| CacheLookup {
            translated: row.translated_content.clone(),
            tokens: row.tokens,
            characters: row.characters,
        }))
    }

    async fn bulk_put(&self, entries: Vec<CacheEntry>) {
        for entry in entries {
            // entry() + or_insert_with: first writer wins, later ones are
            // silently dropped rather than overwriting — the duplicate-key
            // conflict case of §4.1/§7.
            self.rows.entry(entry.hash.clone()).or_insert(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_after_put_returns_exactly_what_was_put() {
        let repo = MemoryCacheRepo::default();
        let entry = CacheEntry::new("Hello World", "zh", "你好，世界", 12, 11);
        repo.bulk_put(vec![entry]).await;

        let hit = repo.lookup("Hello World", "zh").await.unwrap().unwrap();
        assert_eq!(hit.translated, "你好，世界");
        assert_eq!(hit.tokens, 12);
    }

    #[tokio::test]
    async fn first_writer_wins_on_conflict() {
        let repo = MemoryCacheRepo::default();
        repo.bulk_put(vec![CacheEntry::new("Hello", "zh", "first", 1, 1)])
            .await;
        repo.bulk_put(vec![CacheEntry::new("Hello", "zh", "second", 2, 2)])
            .await;

        let hit = repo.lookup("Hello", "zh").await.unwrap().unwrap();
        assert_eq!(hit.translated, "first");
    }

    #[tokio::test]
    async fn miss_returns_none() {
        let repo = MemoryCacheRepo::default();
        assert!(repo.lookup("nope", "zh").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn translated_feed_dependents_reset_to_unknown() {
        let repo = MemoryTranslatedFeedRepo::default();
        repo.save(TranslatedFeed {
            sid: "t1".into(),
            source_sid: "s1".into(),
            target_language: "zh".into(),
            translate_title: true,
            translate_content: true,
            summary: false,
            status: crate::models::TriState::True,
            modified: None,
            size: 0,
            total_tokens: 0,
            total_characters: 0,
        })
        .await
        .unwrap();

        repo.mark_dependents_unknown("s1").await.unwrap();
        let row = repo.get("t1").await.unwrap().unwrap();
        assert_eq!(row.status, crate::models::TriState::Unknown);
    }
}
