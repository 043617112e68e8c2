//! Engine API contract (C3): a single generic chat-completion client
//! parameterized by [`EngineConfig`](crate::config::EngineConfig), standing
//! in for the many per-vendor translator classes of the reference
//! implementation (§9 "Dynamic engine dispatch").

mod chat;
mod error;
mod test_engine;

use std::{collections::HashMap, sync::Arc};

pub use chat::ChatEngine;
pub use error::EngineError;
pub use test_engine::EchoEngine;

use async_trait::async_trait;

use crate::config::EnginesConfig;

/// Result of a single translate/summarize call: the text plus the metered
/// cost, so callers can accumulate `TranslatedFeed::total_tokens` /
/// `total_characters` without re-deriving it.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub text: String,
    pub tokens: u64,
    pub characters: u64,
}

/// Which unit is being translated — a chat-style engine builds a single
/// user message for a title but two (title-as-context, then the paragraph
/// text) for content (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateKind {
    Title,
    Content,
}

/// One configured translation/summarization backend. AI engines meter
/// tokens and call out over HTTP; rule-based engines (§9 "non-AI engines")
/// meter characters and can answer synchronously, but still go through
/// this async contract so the orchestrator doesn't need to know which kind
/// it's holding.
#[async_trait]
pub trait Engine: Send + Sync {
    fn name(&self) -> &str;

    /// Token (AI) or character (non-AI) budget per call — also the
    /// chunk-mode grouping budget (§4.2 `group_chunks`).
    fn max_size(&self) -> usize;

    fn meters_tokens(&self) -> bool;

    /// Translates `text` into `target_language`. `source` is the detected
    /// source language ("auto" if undetectable); `kind` selects the prompt
    /// and message shape; `translate_title_ctx` is the entry's original
    /// title, supplied as context when `kind == Content`. Failures inside
    /// the engine call MUST NOT propagate as an error — an empty or
    /// unobtainable completion comes back as `{text: "", ...}`, leaving
    /// retry decisions to the caller (§4.3, §7 error kind 2).
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source: &str,
        kind: TranslateKind,
        translate_title_ctx: Option<&str>,
    ) -> Result<EngineOutput, EngineError>;

    async fn summarize(
        &self,
        text: &str,
        target_language: &str,
        detail: f64,
    ) -> Result<EngineOutput, EngineError>;
}

/// Builds one [`ChatEngine`] per entry in `config`, keyed by name — the
/// lookup table `SourceFeed::translator_ref` / `summary_engine_ref` index
/// into.
pub fn build_engines(config: &EnginesConfig) -> HashMap<String, Arc<dyn Engine>> {
    config
        .0
        .iter()
        .map(|(name, engine_config)| {
            let engine: Arc<dyn Engine> = Arc::new(ChatEngine::new(name.clone(), engine_config.clone()));
            (name.clone(), engine)
        })
        .collect()
}
