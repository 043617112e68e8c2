use async_trait::async_trait;

use crate::{db::DbResult, models::SourceFeed};

/// Abstract repository for [`SourceFeed`] rows, grounded on the teacher's
/// one-trait-per-entity pattern (`db::repos::model_pricing::ModelPricingRepo`).
/// The persistent store backing this trait is out of scope for this crate;
/// a real deployment supplies its own (SQL, KV, ...) implementation.
#[async_trait]
pub trait SourceFeedRepo: Send + Sync {
    async fn get(&self, sid: &str) -> DbResult<Option<SourceFeed>>;

    async fn list(&self) -> DbResult<Vec<SourceFeed>>;

    /// Full-row upsert; the refresher is the only writer.
    async fn save(&self, feed: SourceFeed) -> DbResult<()>;

    /// List [`crate::models::TranslatedFeed`] sids whose `source_sid == sid`,
    /// without requiring the caller to issue one query per dependent
    /// (§9 open question on `prefetch_related`/`select_related`).
    async fn dependent_translated_sids(&self, sid: &str) -> DbResult<Vec<String>>;
}
