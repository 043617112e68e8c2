//! Hierarchical summarizer (§4.6.2): interpolates a target chunk count from
//! `detail∈[0,1]`, re-splits the cleaned content at that chunk size, and
//! summarizes the chunks in sequence — each call after the first is given
//! every prior partial summary as context. Grounded on
//! `original_source/core/tasks.py::content_summarize` /
//! `original_source/utils/text_handler.py`'s `chunk_on_delimiter`.

use std::sync::Arc;

use super::OrchestratorError;
use crate::cache::TranslationCacheRepo;
use crate::engine::Engine;
use crate::models::CacheEntry;
use crate::text::{chunk_on_delimiter, clean_content, token_count};

const DELIMITER: &str = ".";

/// `html` here is whatever the caller wants summarized as a unit — per
/// §4.6 step 5 this is the entry's (possibly already translated) content,
/// not necessarily raw source HTML. `min_chunk_size` is the summarizing
/// engine's `max_size()`, per the reference call site.
#[allow(clippy::too_many_arguments)]
pub async fn summarize(
    engine: &Arc<dyn Engine>,
    cache: &Arc<dyn TranslationCacheRepo>,
    html: &str,
    target_language: &str,
    detail: f64,
    min_chunk_size: usize,
    call_retries: u32,
    tokens: &mut u64,
    characters: &mut u64,
) -> Result<String, OrchestratorError> {
    let detail = detail.clamp(0.0, 1.0);
    let cache_key = CacheEntry::summary_key(html);

    if let Some(hit) = cache.lookup(&cache_key, target_language).await? {
        return Ok(hit.translated);
    }

    let text = clean_content(html);
    let min_chunk_size = min_chunk_size.max(1);

    // Interpolate how many chunks to split into: detail=0 summarizes the
    // whole document in one call, detail=1 summarizes at `max_chunks`
    // (the finest granularity `min_chunk_size` allows).
    let max_chunks = chunk_on_delimiter(&text, min_chunk_size, DELIMITER).len().max(1);
    let num_chunks = (1.0 + detail * (max_chunks as f64 - 1.0)).floor().max(1.0) as usize;

    let document_tokens = token_count(&text);
    let chunk_size = min_chunk_size.max(document_tokens / num_chunks);
    let text_chunks = chunk_on_delimiter(&text, chunk_size, DELIMITER);

    let mut accumulated_summaries: Vec<String> = Vec::new();
    for chunk in &text_chunks {
        let prompt = if accumulated_summaries.is_empty() {
            chunk.clone()
        } else {
            format!(
                "Previous summaries:\n\n{}\n\nText to summarize next:\n\n{chunk}",
                accumulated_summaries.join("\n\n")
            )
        };

        let summary = summarize_one(engine, &prompt, target_language, detail, call_retries, tokens, characters).await?;
        accumulated_summaries.push(summary);
    }

    let final_summary = accumulated_summaries.join("<br/>");

    cache
        .bulk_put(vec![CacheEntry::new(cache_key, target_language.to_string(), final_summary.clone(), *tokens, *characters)])
        .await;

    Ok(final_summary)
}

/// Per-chunk retry: up to `call_retries` attempts for a non-empty summary,
/// falling back to the chunk's own text on exhaustion (§7 error kind 2).
async fn summarize_one(
    engine: &Arc<dyn Engine>,
    text: &str,
    target_language: &str,
    detail: f64,
    call_retries: u32,
    tokens: &mut u64,
    characters: &mut u64,
) -> Result<String, OrchestratorError> {
    for attempt in 0..call_retries {
        match engine.summarize(text, target_language, detail).await {
            Ok(output) if !output.text.is_empty() => {
                *tokens += output.tokens;
                *characters += output.characters;
                return Ok(output.text);
            }
            Ok(output) => {
                *tokens += output.tokens;
                *characters += output.characters;
                tracing::warn!(attempt, "empty summary, retrying");
            }
            Err(error) => {
                tracing::warn!(attempt, %error, "summarize call failed, retrying");
            }
        }
    }

    tracing::warn!("summary failed after retries, keeping chunk text");
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryCacheRepo;
    use crate::engine::EchoEngine;

    #[tokio::test]
    async fn summarizes_content_that_fits_in_one_call() {
        let engine: Arc<dyn Engine> = Arc::new(EchoEngine::new("test", 2000));
        let cache: Arc<dyn TranslationCacheRepo> = Arc::new(MemoryCacheRepo::default());
        let mut tokens = 0;
        let mut characters = 0;

        let out = summarize(&engine, &cache, "<p>Short article body.</p>", "es", 0.0, 2000, 1, &mut tokens, &mut characters)
            .await
            .unwrap();

        assert!(out.contains("es summary"));
    }

    #[tokio::test]
    async fn detail_zero_makes_exactly_one_engine_call() {
        let engine: Arc<dyn Engine> = Arc::new(EchoEngine::new("test", 2000));
        let cache: Arc<dyn TranslationCacheRepo> = Arc::new(MemoryCacheRepo::default());
        let mut tokens = 0;
        let mut characters = 0;

        let html = "One sentence. Two sentence. Three sentence. Four sentence. Five sentence.";
        let out = summarize(&engine, &cache, html, "it", 0.0, 5, 1, &mut tokens, &mut characters)
            .await
            .unwrap();

        // detail=0 -> num_chunks=1 -> one "<br/>"-joined summary, no separator.
        assert!(!out.contains("<br/>"));
    }

    #[tokio::test]
    async fn higher_detail_produces_more_chunks_and_calls() {
        let engine: Arc<dyn Engine> = Arc::new(EchoEngine::new("test", 2000));
        let cache: Arc<dyn TranslationCacheRepo> = Arc::new(MemoryCacheRepo::default());
        let mut tokens = 0;
        let mut characters = 0;

        let html = "One sentence. Two sentence. Three sentence. Four sentence. Five sentence.";
        let out = summarize(&engine, &cache, html, "it", 1.0, 5, 1, &mut tokens, &mut characters)
            .await
            .unwrap();

        assert!(out.contains("<br/>"));
    }

    #[tokio::test]
    async fn second_call_with_same_input_hits_cache() {
        let engine: Arc<dyn Engine> = Arc::new(EchoEngine::new("test", 2000));
        let cache: Arc<dyn TranslationCacheRepo> = Arc::new(MemoryCacheRepo::default());
        let mut tokens = 0;
        let mut characters = 0;

        let html = "<p>Short article body.</p>";
        let first = summarize(&engine, &cache, html, "es", 0.0, 2000, 1, &mut tokens, &mut characters).await.unwrap();
        let tokens_after_first = tokens;
        let second = summarize(&engine, &cache, html, "es", 0.0, 2000, 1, &mut tokens, &mut characters).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(tokens, tokens_after_first);
    }
}
