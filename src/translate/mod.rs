//! Orchestrator (C6): turns one fetched `SourceFeed` entry plus one
//! `TranslatedFeed` configuration into translated output, choosing between
//! tag-mode and chunk-mode per `SourceFeed::quality`, with hierarchical
//! summarization layered on top when `TranslatedFeed::summary` is set. This
//! is the one module that calls into every other module in the crate.

mod article;
mod chunk_mode;
mod error;
mod summarize;
mod tag_mode;

pub use article::fetch_article_body;
pub use error::OrchestratorError;

use std::sync::Arc;

use crate::cache::TranslationCacheRepo;
use crate::engine::{Engine, EngineOutput, TranslateKind};
use crate::models::DisplayMode;
use crate::text::detect_language;

/// One entry translated (and optionally summarized), ready for the feed
/// emitter. Mirrors `ParsedEntry` plus the bookkeeping the emitter and the
/// `TranslatedFeed` size/token counters need.
pub struct TranslatedEntry {
    pub id: String,
    pub title: String,
    pub link: Option<String>,
    pub content: Option<String>,
    pub tokens: u64,
    pub characters: u64,
}

pub struct TranslateOptions<'a> {
    pub target_language: &'a str,
    pub translate_title: bool,
    pub translate_content: bool,
    /// `quality=true` selects chunk mode (whole-document Markdown
    /// translation); `false` selects tag mode (per-text-node). §4.6.1.
    pub quality: bool,
    pub summarize: bool,
    pub summary_detail: f64,
    pub display: DisplayMode,
    pub display_separator: &'a str,
}

/// Translates (and optionally summarizes) one entry, consulting the
/// translation cache before calling the engine and writing through it
/// afterward (§4.1 caching contract).
pub async fn translate_entry(
    engine: Arc<dyn Engine>,
    cache: Arc<dyn TranslationCacheRepo>,
    entry_id: &str,
    title: &str,
    link: Option<&str>,
    content: Option<&str>,
    call_retries: u32,
    options: &TranslateOptions<'_>,
) -> Result<TranslatedEntry, OrchestratorError> {
    translate_entry_with_summarizer(engine.clone(), engine, cache, entry_id, title, link, content, call_retries, options).await
}

/// Same as [`translate_entry`], but summarization (§4.6 step 5) uses
/// `summarize_engine` instead of `engine` — a `TranslatedFeed` can name a
/// distinct `summary_engine_ref` from its `translator_ref`.
///
/// Title and content translation fail independently (§4.6/§8 Scenario 5): a
/// successful title survives even if content translation's stage returns an
/// error, since only a cache `DbError` or a malformed-document error can
/// surface that far — engine-layer failures are absorbed by
/// [`translate_with_cache`]'s own retry-then-fallback.
pub async fn translate_entry_with_summarizer(
    engine: Arc<dyn Engine>,
    summarize_engine: Arc<dyn Engine>,
    cache: Arc<dyn TranslationCacheRepo>,
    entry_id: &str,
    title: &str,
    link: Option<&str>,
    content: Option<&str>,
    call_retries: u32,
    options: &TranslateOptions<'_>,
) -> Result<TranslatedEntry, OrchestratorError> {
    let source = detect_language(title, content.unwrap_or(""));

    let mut tokens = 0u64;
    let mut characters = 0u64;

    let translated_title = if options.translate_title {
        let translated = translate_with_cache(
            &engine,
            &cache,
            title,
            options.target_language,
            &source,
            TranslateKind::Title,
            None,
            call_retries,
        )
        .await?;
        tokens += translated.tokens;
        characters += translated.characters;
        crate::text::set_translation_display(title, &translated.text, options.display, options.display_separator)
    } else {
        title.to_string()
    };

    let translated_content = match (options.translate_content, content) {
        (true, Some(body)) if !body.trim().is_empty() => {
            match translate_and_summarize_content(&engine, &summarize_engine, &cache, body, &source, title, call_retries, options, &mut tokens, &mut characters).await {
                Ok(final_body) => Some(crate::text::set_translation_display(body, &final_body, options.display, options.display_separator)),
                Err(error) => {
                    tracing::warn!(entry_id, %error, "content translation stage failed, keeping original content");
                    Some(body.to_string())
                }
            }
        }
        (_, Some(body)) => Some(body.to_string()),
        (_, None) => None,
    };

    Ok(TranslatedEntry {
        id: entry_id.to_string(),
        title: translated_title,
        link: link.map(str::to_string),
        content: translated_content,
        tokens,
        characters,
    })
}

/// Runs tag-mode/chunk-mode translation plus optional summarization for one
/// entry's content, isolated from the title so its own `DbError`/structural
/// failures can be caught by the caller without discarding the title result.
#[allow(clippy::too_many_arguments)]
async fn translate_and_summarize_content(
    engine: &Arc<dyn Engine>,
    summarize_engine: &Arc<dyn Engine>,
    cache: &Arc<dyn TranslationCacheRepo>,
    body: &str,
    source: &str,
    title: &str,
    call_retries: u32,
    options: &TranslateOptions<'_>,
    tokens: &mut u64,
    characters: &mut u64,
) -> Result<String, OrchestratorError> {
    let translated_body = if options.quality {
        let markdown = chunk_mode::translate_chunked(
            engine,
            cache,
            body,
            options.target_language,
            source,
            Some(title),
            engine.max_size(),
            call_retries,
            tokens,
            characters,
        )
        .await?;
        crate::text::render_markdown_to_html(&markdown)
    } else {
        tag_mode::translate_tagged(engine, cache, body, options.target_language, source, Some(title), call_retries, tokens, characters).await?
    };

    if options.summarize {
        summarize::summarize(
            summarize_engine,
            cache,
            &translated_body,
            options.target_language,
            options.summary_detail,
            summarize_engine.max_size(),
            call_retries,
            tokens,
            characters,
        )
        .await
    } else {
        Ok(translated_body)
    }
}

/// Looks up the cache first; on a miss, retries the engine up to
/// `call_retries` times for a non-empty result. Engine-layer failures and
/// empty completions are never propagated as errors (§4.3, §7 error kind
/// 2) — after the last attempt this falls back to the original `text`,
/// still carrying whatever tokens/characters were metered along the way.
/// The only `Err` this can return is a genuine `DbError` from the cache
/// lookup.
#[allow(clippy::too_many_arguments)]
pub(super) async fn translate_with_cache(
    engine: &Arc<dyn Engine>,
    cache: &Arc<dyn TranslationCacheRepo>,
    text: &str,
    target_language: &str,
    source: &str,
    kind: TranslateKind,
    translate_title_ctx: Option<&str>,
    call_retries: u32,
) -> Result<EngineOutput, OrchestratorError> {
    if let Some(hit) = cache.lookup(text, target_language).await? {
        return Ok(EngineOutput { text: hit.translated, tokens: hit.tokens, characters: hit.characters });
    }

    let mut tokens = 0u64;
    let mut characters = 0u64;

    for attempt in 0..call_retries {
        match engine.translate(text, target_language, source, kind, translate_title_ctx).await {
            Ok(output) if !output.text.is_empty() => {
                tokens += output.tokens;
                characters += output.characters;
                cache
                    .bulk_put(vec![crate::models::CacheEntry::new(
                        text.to_string(),
                        target_language.to_string(),
                        output.text.clone(),
                        tokens,
                        characters,
                    )])
                    .await;
                return Ok(EngineOutput { text: output.text, tokens, characters });
            }
            Ok(output) => {
                tokens += output.tokens;
                characters += output.characters;
                tracing::warn!(attempt, "empty translation, retrying");
            }
            Err(error) => {
                tracing::warn!(attempt, %error, "engine call failed, retrying");
            }
        }
    }

    tracing::warn!("translation failed after retries, keeping original text");
    Ok(EngineOutput { text: text.to_string(), tokens, characters })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryCacheRepo;
    use crate::engine::EchoEngine;

    #[tokio::test]
    async fn translates_title_and_content_with_display_mode() {
        let engine: Arc<dyn Engine> = Arc::new(EchoEngine::new("test", 2000));
        let cache: Arc<dyn TranslationCacheRepo> = Arc::new(MemoryCacheRepo::default());

        let options = TranslateOptions {
            target_language: "fr",
            translate_title: true,
            translate_content: true,
            quality: false,
            summarize: false,
            summary_detail: 0.3,
            display: DisplayMode::TranslationOnly,
            display_separator: "\n---\n",
        };

        let result = translate_entry(
            engine,
            cache,
            "entry-1",
            "Good morning",
            Some("https://example.com"),
            Some("<p>Have a nice day.</p>"),
            1,
            &options,
        )
        .await
        .unwrap();

        assert_eq!(result.title, "[fr] Good morning");
        assert!(result.content.unwrap().contains("Have a nice day"));
        assert!(result.tokens > 0);
    }

    #[tokio::test]
    async fn leaves_content_untouched_when_translate_content_is_off() {
        let engine: Arc<dyn Engine> = Arc::new(EchoEngine::new("test", 2000));
        let cache: Arc<dyn TranslationCacheRepo> = Arc::new(MemoryCacheRepo::default());

        let options = TranslateOptions {
            target_language: "fr",
            translate_title: false,
            translate_content: false,
            quality: false,
            summarize: false,
            summary_detail: 0.3,
            display: DisplayMode::TranslationOnly,
            display_separator: "\n---\n",
        };

        let result = translate_entry(engine, cache, "entry-1", "Title", None, Some("body"), 1, &options)
            .await
            .unwrap();

        assert_eq!(result.title, "Title");
        assert_eq!(result.content.as_deref(), Some("body"));
    }

    /// A cache whose `lookup` errors for any text containing `"Body"`,
    /// standing in for a content-stage `DbError` while the title's lookup
    /// still succeeds normally — isolates the two stages' failure paths.
    struct FailsOnBodyLookupCache;

    #[async_trait::async_trait]
    impl crate::cache::TranslationCacheRepo for FailsOnBodyLookupCache {
        async fn lookup(&self, text: &str, _target_language: &str) -> crate::db::DbResult<Option<crate::cache::CacheLookup>> {
            if text.contains("Body") {
                Err(crate::db::DbError::Internal("forced test failure".to_string()))
            } else {
                Ok(None)
            }
        }

        async fn bulk_put(&self, _entries: Vec<crate::models::CacheEntry>) {}
    }

    #[tokio::test]
    async fn title_translation_survives_when_content_translation_errors() {
        let engine: Arc<dyn Engine> = Arc::new(EchoEngine::new("test", 2000));
        let cache: Arc<dyn TranslationCacheRepo> = Arc::new(FailsOnBodyLookupCache);

        let options = TranslateOptions {
            target_language: "fr",
            translate_title: true,
            translate_content: true,
            quality: false,
            summarize: false,
            summary_detail: 0.3,
            display: DisplayMode::TranslationOnly,
            display_separator: "\n---\n",
        };

        let result = translate_entry(engine, cache, "entry-1", "Good morning", None, Some("<p>Body.</p>"), 1, &options)
            .await
            .unwrap();

        assert_eq!(result.title, "[fr] Good morning");
        assert_eq!(result.content.as_deref(), Some("<p>Body.</p>"));
    }

    #[tokio::test]
    async fn translate_with_cache_falls_back_to_original_text_after_exhausting_retries() {
        let engine: Arc<dyn Engine> = Arc::new(crate::engine::EchoEngine::failing("test"));
        let cache: Arc<dyn TranslationCacheRepo> = Arc::new(MemoryCacheRepo::default());

        let out = translate_with_cache(&engine, &cache, "hello", "fr", "auto", TranslateKind::Title, None, 3)
            .await
            .unwrap();

        assert_eq!(out.text, "hello");
    }
}
