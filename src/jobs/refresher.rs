//! Source-Feed Refresher (C7) and the per-dependent translation job it fans
//! out to. One call to [`refresh_source_feed`] is one pull-and-persist cycle
//! for a single [`SourceFeed`]; on success it schedules one translation job
//! per dependent [`TranslatedFeed`], mirroring the teacher's pattern of a
//! worker function doing one unit of work while the recurring loop lives
//! one layer up, in `scheduler.rs`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;

use super::{JobError, PipelineContext};
use crate::feed::{self, FetchOutcome, OutputEntry, ParsedEntry};
use crate::models::{SourceFeed, TranslatedFeed, TriState};
use crate::observability::Metrics;
use crate::translate::{TranslateOptions, translate_entry_with_summarizer};

/// Runs one refresh cycle for `sid`, retrying the fetch up to
/// `ctx.scheduler.job_retries` times before giving up (§4.8).
pub async fn refresh_source_feed(ctx: &PipelineContext, sid: &str) -> Result<(), JobError> {
    let Some(mut source) = ctx.source_feeds.get(sid).await? else {
        tracing::warn!(sid, "refresh requested for unknown source feed, skipping");
        return Ok(());
    };

    let outcome = fetch_with_retries(ctx, &source).await;
    let mut updated = false;

    match outcome {
        Ok(FetchOutcome::NotModified) => {
            Metrics::record_refresh_success(sid);
        }
        Ok(FetchOutcome::Fetched { entries: _, etag, size, title, raw }) => {
            write_raw_xml(&ctx.source_feeds_path(sid), &raw).await?;
            if let Some(etag) = etag {
                source.etag = etag;
            }
            source.size = size;
            source.last_updated = Some(Utc::now());
            if source.needs_name() {
                if let Some(title) = title {
                    source.name = title;
                }
            }
            source.valid = TriState::True;
            updated = true;
            Metrics::record_refresh_success(sid);
        }
        Err(error) => {
            tracing::error!(sid, %error, "source feed refresh failed");
            Metrics::record_refresh_failure(sid, &error.to_string());
            source.valid = TriState::False;
        }
    }

    source.last_pull = Some(Utc::now());
    ctx.source_feeds.save(source.clone()).await?;

    if updated {
        fan_out(ctx, &source).await?;
    }

    Ok(())
}

async fn fetch_with_retries(ctx: &PipelineContext, source: &SourceFeed) -> Result<FetchOutcome, JobError> {
    let etag = if source.etag.is_empty() { None } else { Some(source.etag.as_str()) };

    let mut last_error = None;
    for attempt in 0..=ctx.scheduler.job_retries {
        match feed::fetch_feed(&ctx.http, &source.url, etag).await {
            Ok(outcome) => return Ok(outcome),
            Err(error) => {
                tracing::warn!(sid = %source.sid, attempt, %error, "source feed fetch failed, retrying");
                last_error = Some(error);
            }
        }
    }
    Err(last_error.expect("loop runs at least once").into())
}

/// Atomic write: stage to a sibling `.tmp` file, then rename over the
/// target, so a reader never observes a partially-written feed.
async fn write_raw_xml(path: &Path, raw: &[u8]) -> Result<(), JobError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| JobError::Io(e, parent.to_path_buf()))?;
    }
    let tmp = path.with_extension("xml.tmp");
    tokio::fs::write(&tmp, raw)
        .await
        .map_err(|e| JobError::Io(e, tmp.clone()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| JobError::Io(e, path.to_path_buf()))?;
    Ok(())
}

/// Resets every dependent's status and enqueues one translation job per
/// dependent, delayed by `fanout_delay_secs` (§4.7 step 9).
async fn fan_out(ctx: &PipelineContext, source: &SourceFeed) -> Result<(), JobError> {
    ctx.translated_feeds.mark_dependents_unknown(&source.sid).await?;
    let dependents = ctx.translated_feeds.dependents_of(&source.sid).await?;

    for dependent_sid in dependents {
        let ctx = ctx.clone();
        let source_sid = source.sid.clone();
        ctx.queue.spawn_delayed(
            dependent_sid.clone(),
            Duration::from_secs(ctx.scheduler.fanout_delay_secs),
            move || async move {
                if let Err(error) = translate_dependent(&ctx, &source_sid, &dependent_sid).await {
                    tracing::error!(%dependent_sid, %error, "translated feed orchestration failed");
                }
            },
        );
    }

    Ok(())
}

/// Orchestrator job (C6) for one `TranslatedFeed`: re-parses the just-pulled
/// source XML, translates up to `max_posts` entries, emits Atom and JSON
/// Feed artifacts, and updates the `TranslatedFeed` row.
pub async fn translate_dependent(ctx: &PipelineContext, source_sid: &str, dependent_sid: &str) -> Result<(), JobError> {
    let Some(source) = ctx.source_feeds.get(source_sid).await? else {
        return Ok(());
    };
    let Some(mut dependent) = ctx.translated_feeds.get(dependent_sid).await? else {
        return Ok(());
    };

    if dependent.is_current(source.last_pull) {
        dependent.status = TriState::True;
        ctx.translated_feeds.save(dependent).await?;
        return Ok(());
    }

    let result = run_orchestration(ctx, &source, &dependent).await;

    match result {
        Ok((output_path_xml, output_path_json, tokens, characters, size)) => {
            dependent.status = TriState::True;
            dependent.modified = source.last_pull;
            dependent.size = size;
            dependent.total_tokens = tokens;
            dependent.total_characters = characters;
            tracing::info!(sid = dependent_sid, xml = %output_path_xml.display(), json = %output_path_json.display(), "translated feed regenerated");
        }
        Err(error) => {
            tracing::error!(sid = dependent_sid, %error, "orchestration failed");
            dependent.status = TriState::False;
        }
    }

    ctx.translated_feeds.save(dependent).await?;
    Ok(())
}

async fn run_orchestration(
    ctx: &PipelineContext,
    source: &SourceFeed,
    dependent: &TranslatedFeed,
) -> Result<(PathBuf, PathBuf, u64, u64, u64), JobError> {
    let raw = tokio::fs::read(ctx.source_feeds_path(&source.sid))
        .await
        .map_err(|e| JobError::Io(e, ctx.source_feeds_path(&source.sid)))?;
    let (entries, _title) = feed::parse_feed_bytes(&raw, &source.url)?;

    let translator = source
        .translator_ref
        .as_deref()
        .map(|name| ctx.engine(name))
        .transpose()?;

    let mut output_entries = Vec::new();
    let mut tokens = 0u64;
    let mut characters = 0u64;

    for entry in entries.into_iter().take(source.max_posts) {
        let ParsedEntry { id, title, link, summary, content, published } = entry;

        let body = if source.fetch_article {
            if let Some(link) = &link {
                crate::translate::fetch_article_body(&ctx.http, link).await.or(content).or(summary.clone())
            } else {
                content.or(summary.clone())
            }
        } else {
            content.or(summary.clone())
        };

        let translated = if let Some(engine) = &translator {
            let summarize_engine = dependent
                .summary
                .then(|| source.summary_engine_ref.as_deref())
                .flatten()
                .map(|name| ctx.engine(name))
                .transpose()?;
            let can_summarize = summarize_engine.is_some();
            let summarize_engine = summarize_engine.unwrap_or_else(|| engine.clone());

            let options = TranslateOptions {
                target_language: &dependent.target_language,
                translate_title: dependent.translate_title,
                translate_content: dependent.translate_content,
                quality: source.quality,
                summarize: dependent.summary && can_summarize,
                summary_detail: source.summary_detail,
                display: source.translation_display,
                display_separator: "<br />---------------<br />",
            };

            match translate_entry_with_summarizer(
                engine.clone(),
                summarize_engine,
                ctx.cache.clone(),
                &id,
                &title,
                link.as_deref(),
                body.as_deref(),
                ctx.scheduler.call_retries,
                &options,
            )
            .await
            {
                Ok(translated) => {
                    tokens += translated.tokens;
                    characters += translated.characters;
                    translated
                }
                Err(error) => {
                    tracing::warn!(entry = %id, %error, "entry translation failed, keeping original");
                    crate::translate::TranslatedEntry {
                        id,
                        title,
                        link: link.clone(),
                        content: body.clone(),
                        tokens: 0,
                        characters: 0,
                    }
                }
            }
        } else {
            crate::translate::TranslatedEntry { id, title, link: link.clone(), content: body.clone(), tokens: 0, characters: 0 }
        };

        output_entries.push(OutputEntry {
            id: translated.id,
            title: translated.title,
            link: translated.link,
            summary: translated.content.clone(),
            content: translated.content,
            published,
        });
    }

    let atom_xml = feed::generate_atom_feed(&source.name, &format!("urn:linguafeed:{}", dependent.sid), &output_entries)?;
    let json_feed = feed::to_json_feed(&source.name, &output_entries)?;

    let xml_path = ctx.translated_feed_path(&dependent.sid, "xml");
    let json_path = ctx.translated_feed_path(&dependent.sid, "json");
    write_raw_xml(&xml_path, atom_xml.as_bytes()).await?;
    if let Some(parent) = json_path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| JobError::Io(e, parent.to_path_buf()))?;
    }
    tokio::fs::write(&json_path, json_feed.as_bytes())
        .await
        .map_err(|e| JobError::Io(e, json_path.clone()))?;

    let size = atom_xml.len() as u64;
    Ok((xml_path, json_path, tokens, characters, size))
}
