//! An in-process, non-AI engine for tests and library embedders that don't
//! want to configure a real chat-completion backend, grounded on the
//! teacher's `provider-test` feature: a stand-in that satisfies the trait
//! contract without making network calls.

use async_trait::async_trait;

use super::{Engine, EngineError, EngineOutput, TranslateKind};

/// Echoes its input back, tagged with the target language, metering
/// characters rather than tokens (`meters_tokens() == false`).
pub struct EchoEngine {
    name: String,
    max_size: usize,
    always_fail: bool,
}

impl EchoEngine {
    pub fn new(name: impl Into<String>, max_size: usize) -> Self {
        Self { name: name.into(), max_size, always_fail: false }
    }

    /// An engine whose every call errors — for exercising the orchestrator's
    /// retry-then-fallback path.
    pub fn failing(name: impl Into<String>) -> Self {
        Self { name: name.into(), max_size: 2000, always_fail: true }
    }
}

#[async_trait]
impl Engine for EchoEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_size(&self) -> usize {
        self.max_size
    }

    fn meters_tokens(&self) -> bool {
        false
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        _source: &str,
        _kind: TranslateKind,
        _translate_title_ctx: Option<&str>,
    ) -> Result<EngineOutput, EngineError> {
        if self.always_fail {
            return Err(EngineError::Malformed(self.name.clone(), "forced test failure".to_string()));
        }
        let output = format!("[{target_language}] {text}");
        Ok(EngineOutput { characters: output.chars().count() as u64, tokens: 0, text: output })
    }

    async fn summarize(
        &self,
        text: &str,
        target_language: &str,
        detail: f64,
    ) -> Result<EngineOutput, EngineError> {
        if self.always_fail {
            return Err(EngineError::Malformed(self.name.clone(), "forced test failure".to_string()));
        }
        let keep = ((text.chars().count() as f64) * detail.clamp(0.0, 1.0)).ceil() as usize;
        let truncated: String = text.chars().take(keep.max(1)).collect();
        let output = format!("[{target_language} summary] {truncated}");
        Ok(EngineOutput { characters: output.chars().count() as u64, tokens: 0, text: output })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn translate_tags_with_target_language() {
        let engine = EchoEngine::new("test", 2000);
        let out = engine.translate("hello", "fr", "auto", TranslateKind::Title, None).await.unwrap();
        assert_eq!(out.text, "[fr] hello");
        assert!(!engine.meters_tokens());
    }

    #[tokio::test]
    async fn summarize_shrinks_by_detail() {
        let engine = EchoEngine::new("test", 2000);
        let out = engine.summarize("0123456789", "en", 0.5).await.unwrap();
        assert!(out.text.len() < "0123456789".len() + 20);
    }
}
