//! Tag-mode DOM walking: deciding which text nodes are worth sending to an
//! engine (`should_skip`) and flattening inline formatting tags down to
//! their text content (`unwrap_tags`) so translation doesn't have to
//! thread markup through a chat completion. Grounded on
//! `original_source/utils/text_handler.py`'s `TAGS_TO_SKIP` /
//! `TAGS_TO_UNWRAP` tables, rebuilt on top of `kuchikiki`'s mutable DOM —
//! `scraper`'s `ego-tree` is read-only and can't support the in-place
//! unwrap this needs.

use std::sync::OnceLock;

use kuchikiki::NodeRef;
use kuchikiki::traits::TendrilSink;
use regex::Regex;

const SKIP_ANCESTOR_TAGS: &[&str] = &[
    "pre", "code", "script", "style", "head", "title", "meta", "abbr", "address", "samp", "kbd",
    "bdo", "cite", "dfn", "iframe",
];

const UNWRAP_TAGS: &[&str] = &[
    "i", "a", "strong", "b", "em", "span", "sup", "sub", "mark", "del", "ins", "u", "s", "small",
];

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

fn numeric_only_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d\s\W]+$").unwrap())
}

/// True if this text node carries nothing worth translating: it sits
/// under a skip-tag ancestor (code, script, a `<title>`, ...), or its own
/// content is blank, a bare URL, an email address, or made up entirely of
/// digits and punctuation.
pub fn should_skip(node: &NodeRef) -> bool {
    let Some(text) = node.as_text() else {
        return true;
    };

    let under_skip_ancestor = node.ancestors().any(|ancestor| {
        ancestor
            .as_element()
            .map(|el| SKIP_ANCESTOR_TAGS.contains(&el.name.local.as_ref()))
            .unwrap_or(false)
    });
    if under_skip_ancestor {
        return true;
    }

    let content = text.borrow();
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return true;
    }
    if email_re().is_match(trimmed) {
        return true;
    }
    if numeric_only_re().is_match(trimmed) {
        return true;
    }

    false
}

/// Replaces every occurrence of an inline formatting tag with its own
/// children, preserving their order and position, so `<p>Hello <b>world</b>!</p>`
/// becomes `<p>Hello world!</p>` with the block structure untouched.
pub fn unwrap_tags(document: &NodeRef) {
    let selector = UNWRAP_TAGS.join(", ");
    let Ok(matches) = document.select(&selector) else {
        return;
    };

    let targets: Vec<NodeRef> = matches.map(|m| m.as_node().clone()).collect();
    for node in targets {
        let children: Vec<NodeRef> = node.children().collect();
        for child in children {
            node.insert_before(child);
        }
        node.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(html: &str) -> NodeRef {
        kuchikiki::parse_html().one(format!("<html><body>{html}</body></html>"))
    }

    fn body_html(document: &NodeRef) -> String {
        let body = document.select_first("body").expect("body exists");
        let mut out = Vec::new();
        for child in body.as_node().children() {
            let _ = child.serialize(&mut out);
        }
        String::from_utf8(out).unwrap_or_default()
    }

    #[test]
    fn skips_code_block_text() {
        let doc = fragment("<pre><code>let x = 1;</code></pre>");
        let text_node = doc
            .descendants()
            .find(|n| n.as_text().is_some())
            .expect("text node present");
        assert!(should_skip(&text_node));
    }

    #[test]
    fn skips_bare_url_text() {
        let doc = fragment("<p>https://example.com/path</p>");
        let text_node = doc
            .descendants()
            .find(|n| n.as_text().is_some())
            .expect("text node present");
        assert!(should_skip(&text_node));
    }

    #[test]
    fn does_not_skip_ordinary_prose() {
        let doc = fragment("<p>Good morning, everyone.</p>");
        let text_node = doc
            .descendants()
            .find(|n| n.as_text().is_some())
            .expect("text node present");
        assert!(!should_skip(&text_node));
    }

    #[test]
    fn unwrap_tags_flattens_inline_formatting() {
        let doc = fragment("<p>Hello <b>brave</b> <i>new</i> world.</p>");
        unwrap_tags(&doc);
        let html = body_html(&doc);
        assert!(!html.contains("<b>"));
        assert!(!html.contains("<i>"));
        assert!(html.contains("brave"));
        assert!(html.contains("new"));
    }
}
