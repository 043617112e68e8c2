//! Scheduler (C8): maintains the invariant that every active `SourceFeed`
//! has exactly one refresh job scheduled-or-in-flight. Grounded on the
//! teacher's `start_*_worker` startup-reconciliation loop
//! (`jobs::model_catalog_sync::start_model_catalog_sync_worker`): log a
//! startup message, then loop forever, sleeping the feed's own cadence
//! between runs.

use std::time::Duration;

use super::{PipelineContext, refresher};

/// Spawns one recurring refresh task per `SourceFeed` currently in the
/// repository, each sleeping `update_period` minutes between runs (§4.8).
/// Returns once every feed has a task running; the tasks themselves run
/// until the process exits.
pub async fn run_scheduler(ctx: PipelineContext) -> Result<(), super::JobError> {
    let feeds = ctx.source_feeds.list().await?;

    tracing::info!(feeds = feeds.len(), "starting scheduler, one refresh task per source feed");

    for feed in feeds {
        let ctx = ctx.clone();
        tokio::spawn(async move {
            run_feed_loop(ctx, feed.sid, feed.update_period).await;
        });
    }

    Ok(())
}

async fn run_feed_loop(ctx: PipelineContext, sid: String, update_period: u32) {
    let interval = Duration::from_secs(u64::from(update_period) * 60);

    tracing::info!(%sid, update_period, "scheduling recurring refresh");

    loop {
        let skipped = !ctx
            .queue
            .run_exclusive(&sid, || async {
                if let Err(error) = refresher::refresh_source_feed(&ctx, &sid).await {
                    tracing::error!(%sid, %error, "refresh job failed");
                }
            })
            .await;

        if skipped {
            tracing::debug!(%sid, "refresh already in flight, waiting for next tick");
        }

        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{MemoryCacheRepo, MemorySourceFeedRepo, MemoryTranslatedFeedRepo};
    use crate::jobs::JobQueue;
    use crate::models::{SourceFeed, TriState};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn sample_context() -> PipelineContext {
        let source_feeds: Arc<dyn crate::db::SourceFeedRepo> = Arc::new(MemorySourceFeedRepo::default());
        PipelineContext {
            source_feeds,
            translated_feeds: Arc::new(MemoryTranslatedFeedRepo::default()),
            cache: Arc::new(MemoryCacheRepo::default()),
            engines: HashMap::new(),
            http: reqwest::Client::new(),
            server: crate::config::ServerConfig::default(),
            scheduler: crate::config::SchedulerConfig::default(),
            queue: JobQueue::new(),
        }
    }

    #[tokio::test]
    async fn run_scheduler_spawns_one_task_per_feed_without_panicking() {
        let feed = SourceFeed {
            sid: "s1".into(),
            url: "https://example.com/feed.xml".into(),
            name: "Loading".into(),
            update_period: 60,
            etag: String::new(),
            last_updated: None,
            last_pull: None,
            size: 0,
            valid: TriState::Unknown,
            max_posts: 10,
            translator_ref: None,
            summary_engine_ref: None,
            summary_detail: 0.3,
            translation_display: crate::models::DisplayMode::TranslationOnly,
            quality: false,
            fetch_article: false,
        };
        let ctx = sample_context();
        ctx.source_feeds.save(feed).await.unwrap();

        run_scheduler(ctx).await.unwrap();
    }
}
