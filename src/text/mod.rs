//! Text Utilities (C2): pure, no-I/O operations used by the orchestrator —
//! language detection, HTML/Markdown conversion, tokenization, chunking,
//! DOM skip-rules and tag-unwrapping, and bilingual display composition.

mod chunk;
mod display;
mod dom;
mod language;
mod markdown;
mod tokenize;

pub use chunk::{chunk_on_delimiter, group_chunks};
pub use display::set_translation_display;
pub use dom::{should_skip, unwrap_tags};
pub use language::detect_language;
pub use markdown::{ContentSplit, clean_content, content_split, render_markdown_to_html};
pub use tokenize::{token_count, tokenize};
