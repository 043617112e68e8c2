//! Chunk-mode translation (§4.6.1): for entries too large for a single
//! engine call, split the Markdown rendering into token/character-budgeted
//! groups (`content_split` + `group_chunks`) and translate each group
//! independently, then rejoin. Used whenever tag-mode's single-call budget
//! would be exceeded.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use super::OrchestratorError;
use super::translate_with_cache;
use crate::cache::TranslationCacheRepo;
use crate::engine::{Engine, TranslateKind};
use crate::text::{content_split, group_chunks};

/// The model tends to inject a heading on each grouped chunk; §4.6.1
/// requires stripping a leading `"## "` from every result before rejoining.
fn heading_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^##\s+").unwrap())
}

#[allow(clippy::too_many_arguments)]
pub async fn translate_chunked(
    engine: &Arc<dyn Engine>,
    cache: &Arc<dyn TranslationCacheRepo>,
    html: &str,
    target_language: &str,
    source: &str,
    translate_title_ctx: Option<&str>,
    max_size: usize,
    call_retries: u32,
    tokens: &mut u64,
    characters: &mut u64,
) -> Result<String, OrchestratorError> {
    let split = content_split(html);
    let metric = if engine.meters_tokens() { &split.tokens } else { &split.characters };
    let groups = group_chunks(&split.chunks, metric, max_size);

    let mut translated_groups = Vec::with_capacity(groups.len());
    for group in groups {
        if group.trim().is_empty() {
            continue;
        }
        let output = translate_with_cache(
            engine,
            cache,
            &group,
            target_language,
            source,
            TranslateKind::Content,
            translate_title_ctx,
            call_retries,
        )
        .await?;
        *tokens += output.tokens;
        *characters += output.characters;
        translated_groups.push(heading_prefix_re().replace(&output.text, "").into_owned());
    }

    Ok(translated_groups.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryCacheRepo;
    use crate::engine::EchoEngine;

    #[tokio::test]
    async fn splits_and_rejoins_large_content() {
        let engine: Arc<dyn Engine> = Arc::new(EchoEngine::new("test", 10));
        let cache: Arc<dyn TranslationCacheRepo> = Arc::new(MemoryCacheRepo::default());
        let mut tokens = 0;
        let mut characters = 0;

        let html = "<p>Paragraph one.</p><p>Paragraph two.</p><p>Paragraph three.</p>";
        let out = translate_chunked(
            &engine,
            &cache,
            html,
            "de",
            "auto",
            Some("Title"),
            10,
            1,
            &mut tokens,
            &mut characters,
        )
        .await
        .unwrap();

        assert!(out.contains("[de]"));
        assert!(characters > 0);
    }

    #[test]
    fn heading_prefix_regex_strips_leading_atx_heading() {
        let stripped = heading_prefix_re().replace("## Heading\nBody text.", "");
        assert_eq!(stripped, "Heading\nBody text.");
        assert_eq!(heading_prefix_re().replace("No heading here.", ""), "No heading here.");
    }
}
