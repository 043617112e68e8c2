use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Named map of engine definitions, keyed by the name referenced from
/// `SourceFeed::translator_ref` / `summary_engine_ref`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnginesConfig(pub HashMap<String, EngineConfig>);

/// One configured chat-completion engine (§4.3, §6 "Engine API contract").
///
/// Per §9 ("Dynamic engine dispatch"), the many per-vendor engine classes of
/// the reference implementation collapse to configuration records
/// parameterizing a single generic chat-completion client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Reserved for future non-chat engine kinds; only "chat" exists today.
    #[serde(rename = "type", default = "default_engine_type")]
    pub kind: String,

    pub base_url: String,

    /// Name of the environment variable holding the API key. Never the key
    /// itself — credential encryption at rest is out of scope, but the
    /// config file never holds a plaintext secret either.
    pub api_key_env: String,

    pub model: String,

    #[serde(default = "default_title_prompt")]
    pub translate_prompt: String,
    #[serde(default = "default_content_prompt")]
    pub content_translate_prompt: String,
    #[serde(default = "default_summary_prompt")]
    pub summary_prompt: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default)]
    pub frequency_penalty: f32,
    #[serde(default)]
    pub presence_penalty: f32,

    /// Max tokens per completion **and** the `max_size()` budget used by
    /// chunk-mode grouping (§4.2 `group_chunks`). AI engines meter tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Non-AI (rule-based) engines meter characters instead of tokens.
    #[serde(default)]
    pub is_ai: Option<bool>,
}

impl EngineConfig {
    pub fn meters_tokens(&self) -> bool {
        self.is_ai.unwrap_or(true)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must be set".into());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be > 0".into());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be in [0, 2]".into());
        }
        Ok(())
    }
}

fn default_engine_type() -> String {
    "chat".to_string()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_top_p() -> f32 {
    0.2
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_title_prompt() -> String {
    "You are a professional translator. Translate the following title into \
     {target_language}. Output only the translation."
        .to_string()
}
fn default_content_prompt() -> String {
    "You are a professional translator. Translate the following article \
     paragraph into {target_language}, preserving meaning and tone. Output \
     only the translation."
        .to_string()
}
fn default_summary_prompt() -> String {
    "Summarize the following text in {target_language}, preserving the key \
     points. Output only the summary."
        .to_string()
}
