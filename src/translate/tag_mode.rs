//! Tag-mode translation (§4.6.1): for entries small enough to stay under
//! one engine call's budget, translate each eligible text node of the DOM
//! in place rather than flattening the whole entry to Markdown and back —
//! this preserves links, images, and block structure exactly as the
//! source had them.

use std::sync::Arc;

use kuchikiki::traits::TendrilSink;

use super::OrchestratorError;
use super::translate_with_cache;
use crate::cache::TranslationCacheRepo;
use crate::engine::{Engine, TranslateKind};
use crate::text::{should_skip, unwrap_tags};

#[allow(clippy::too_many_arguments)]
pub async fn translate_tagged(
    engine: &Arc<dyn Engine>,
    cache: &Arc<dyn TranslationCacheRepo>,
    html: &str,
    target_language: &str,
    source: &str,
    translate_title_ctx: Option<&str>,
    call_retries: u32,
    tokens: &mut u64,
    characters: &mut u64,
) -> Result<String, OrchestratorError> {
    let document = kuchikiki::parse_html().one(format!("<html><body>{html}</body></html>"));
    unwrap_tags(&document);

    let text_nodes: Vec<_> = document
        .inclusive_descendants()
        .filter(|node| node.as_text().is_some())
        .collect();

    for node in text_nodes {
        if should_skip(&node) {
            continue;
        }

        let original = node.as_text().map(|t| t.borrow().clone()).unwrap_or_default();
        if original.trim().is_empty() {
            continue;
        }

        let output = translate_with_cache(
            engine,
            cache,
            &original,
            target_language,
            source,
            TranslateKind::Content,
            translate_title_ctx,
            call_retries,
        )
        .await?;
        *tokens += output.tokens;
        *characters += output.characters;

        if let Some(text_cell) = node.as_text() {
            *text_cell.borrow_mut() = output.text;
        }
    }

    let body = document.select_first("body").map_err(|_| {
        OrchestratorError::Engine(crate::engine::EngineError::Malformed(
            engine.name().to_string(),
            "parsed document has no body element".to_string(),
        ))
    })?;

    let mut out = Vec::new();
    for child in body.as_node().children() {
        let _ = child.serialize(&mut out);
    }
    Ok(String::from_utf8(out).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryCacheRepo;
    use crate::engine::EchoEngine;

    #[tokio::test]
    async fn translates_prose_and_leaves_code_blocks_alone() {
        let engine: Arc<dyn Engine> = Arc::new(EchoEngine::new("test", 2000));
        let cache: Arc<dyn TranslationCacheRepo> = Arc::new(MemoryCacheRepo::default());
        let mut tokens = 0;
        let mut characters = 0;

        let html = "<p>Good morning.</p><pre><code>let x = 1;</code></pre>";
        let out = translate_tagged(&engine, &cache, html, "fr", "auto", Some("Title"), 1, &mut tokens, &mut characters)
            .await
            .unwrap();

        assert!(out.contains("[fr] Good morning."));
        assert!(out.contains("let x = 1;"));
    }
}
