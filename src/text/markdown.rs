//! HTML → Markdown conversion for the two shapes the orchestrator needs:
//! `clean_content` (stripped down to prose, for summarization and language
//! detection) and `content_split` (full-fidelity, for chunk-mode
//! translation where inline images and headings must survive the split).
//! Grounded on `original_source/utils/text_handler.py`'s `clean_content`
//! and `content_split`, re-expressed with `html2md` doing the HTML→MD walk
//! that the Python version hand-rolled with BeautifulSoup.

use regex::Regex;
use std::sync::OnceLock;

use super::tokenize::token_count;

fn image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap())
}

fn mailto_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[^\]]*\]\(mailto:[^)]*\)").unwrap())
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap())
}

fn table_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\|.*\|$|^[-:|\s]+$").unwrap())
}

fn blank_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").unwrap())
}

/// Strips links, images, tables, and emphasis markers down to plain prose,
/// then collapses runs of blank lines. Used before language detection and
/// before feeding content to the summarizer, where markup only costs tokens.
pub fn clean_content(html: &str) -> String {
    let markdown = html2md::parse_html(html);
    let without_images = image_re().replace_all(&markdown, "");
    let without_mailto = mailto_link_re().replace_all(&without_images, "");
    let without_links = link_re().replace_all(&without_mailto, "$1");

    let without_tables: String = without_links
        .lines()
        .filter(|line| !table_row_re().is_match(line.trim()))
        .collect::<Vec<_>>()
        .join("\n");

    let without_emphasis = without_tables.replace(['*', '_', '`'], "");
    blank_run_re().replace_all(&without_emphasis, "\n").trim().to_string()
}

/// Renders Markdown to HTML — used to turn chunk-mode's joined Markdown
/// translation back into the HTML the feed emitter and display composition
/// expect (§4.6 step 4, quality mode).
pub fn render_markdown_to_html(markdown: &str) -> String {
    let parser = pulldown_cmark::Parser::new(markdown);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

pub struct ContentSplit {
    pub chunks: Vec<String>,
    pub tokens: Vec<usize>,
    pub characters: Vec<usize>,
}

/// Converts `html` to Markdown without stripping anything, then splits on
/// runs of newlines — preserving inline images and ATX headings as their
/// own chunk boundaries, since those are the structural landmarks
/// tag-mode and chunk-mode translation need to stay aligned to.
pub fn content_split(html: &str) -> ContentSplit {
    let markdown = html2md::parse_html(html);
    let newline_run = Regex::new(r"\n+").unwrap();
    let chunks: Vec<String> = newline_run
        .split(markdown.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect();

    let tokens: Vec<usize> = chunks.iter().map(|c| token_count(c)).collect();
    let characters: Vec<usize> = chunks.iter().map(|c| c.chars().count()).collect();

    ContentSplit { chunks, tokens, characters }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_content_strips_links_but_keeps_text() {
        let html = r#"<p>See <a href="https://example.com">the docs</a> for details.</p>"#;
        let cleaned = clean_content(html);
        assert!(cleaned.contains("the docs"));
        assert!(!cleaned.contains("https://example.com"));
    }

    #[test]
    fn clean_content_drops_mailto_links_entirely() {
        let html = r#"<p>Contact <a href="mailto:a@b.com">us</a> today.</p>"#;
        let cleaned = clean_content(html);
        assert!(!cleaned.contains("mailto"));
        assert!(!cleaned.contains("us"));
    }

    #[test]
    fn clean_content_strips_images() {
        let html = r#"<p>Look:</p><img src="pic.png" alt="a cat">"#;
        let cleaned = clean_content(html);
        assert!(!cleaned.contains("pic.png"));
    }

    #[test]
    fn clean_content_collapses_blank_lines() {
        let cleaned = clean_content("<p>one</p>\n\n\n\n<p>two</p>");
        assert!(!cleaned.contains("\n\n"));
    }

    #[test]
    fn content_split_produces_non_empty_chunks() {
        let split = content_split("<p>Good morning.</p><p>Have a nice day.</p>");
        assert!(!split.chunks.is_empty());
        assert_eq!(split.chunks.len(), split.tokens.len());
        assert_eq!(split.chunks.len(), split.characters.len());
    }

    #[test]
    fn render_markdown_to_html_wraps_paragraphs() {
        let html = render_markdown_to_html("Good morning.\n\nHave a nice day.");
        assert!(html.contains("<p>Good morning.</p>"));
        assert!(html.contains("<p>Have a nice day.</p>"));
    }
}
