use async_trait::async_trait;

use crate::{db::DbResult, models::TranslatedFeed};

/// Abstract repository for [`TranslatedFeed`] rows.
#[async_trait]
pub trait TranslatedFeedRepo: Send + Sync {
    async fn get(&self, sid: &str) -> DbResult<Option<TranslatedFeed>>;

    /// Full-row upsert; the orchestrator is the only writer.
    async fn save(&self, feed: TranslatedFeed) -> DbResult<()>;

    /// Reset `status` to `Unknown` on every dependent of `source_sid`
    /// (§4.7 step 9: a successful parent pull forces re-evaluation).
    async fn mark_dependents_unknown(&self, source_sid: &str) -> DbResult<()>;

    /// sids of every [`TranslatedFeed`] whose `source_sid == source_sid`,
    /// for the refresher's post-pull fan-out (§4.7 step 9).
    async fn dependents_of(&self, source_sid: &str) -> DbResult<Vec<String>>;
}
