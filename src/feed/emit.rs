//! Atom emission (§4.5) and a JSON Feed projection of the same entries.
//! `original_source/` emits Atom via `feedgen`; `atom_syndication`'s
//! builder API plays the same role here. JSON Feed has no matching crate
//! in the pack, so it's a direct `serde` struct — the format is just
//! `{version, title, items: [...]}`, not complex enough to need one.

use atom_syndication::{
    Content, ContentBuilder, Entry, EntryBuilder, Feed, FeedBuilder, Link, LinkBuilder, Text,
};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use super::error::EmitError;

/// One already-translated entry, ready to be rendered into either output
/// format. The orchestrator builds these; this module only lays them out.
pub struct OutputEntry {
    pub id: String,
    pub title: String,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

pub fn generate_atom_feed(feed_title: &str, feed_id: &str, entries: &[OutputEntry]) -> Result<String, EmitError> {
    let atom_entries: Vec<Entry> = entries.iter().map(atom_entry).collect();

    let feed: Feed = FeedBuilder::default()
        .title(Text::plain(feed_title))
        .id(feed_id)
        .updated(Utc::now().fixed_offset())
        .entries(atom_entries)
        .build();

    Ok(feed.to_string())
}

fn atom_entry(entry: &OutputEntry) -> Entry {
    let updated: DateTime<FixedOffset> = entry.published.unwrap_or_else(Utc::now).fixed_offset();

    let links: Vec<Link> = entry
        .link
        .as_ref()
        .map(|href| vec![LinkBuilder::default().href(href.clone()).build()])
        .unwrap_or_default();

    let content: Option<Content> = entry.content.as_ref().map(|body| {
        ContentBuilder::default()
            .value(Some(body.clone()))
            .content_type(Some("html".to_string()))
            .build()
    });

    EntryBuilder::default()
        .title(Text::plain(entry.title.clone()))
        .id(entry.id.clone())
        .updated(updated)
        .links(links)
        .summary(entry.summary.clone().map(Text::plain))
        .content(content)
        .build()
}

#[derive(Debug, Serialize)]
pub struct JsonFeedItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
}

#[derive(Debug, Serialize)]
struct JsonFeedDocument {
    version: &'static str,
    title: String,
    items: Vec<JsonFeedItem>,
}

/// Projects the same entries into the JSON Feed 1.1 shape (`jsonfeed.org`),
/// a cheap second output format since the data is already assembled.
pub fn to_json_feed(feed_title: &str, entries: &[OutputEntry]) -> Result<String, EmitError> {
    let items = entries
        .iter()
        .map(|entry| JsonFeedItem {
            id: entry.id.clone(),
            title: entry.title.clone(),
            url: entry.link.clone(),
            summary: entry.summary.clone(),
            content_html: entry.content.clone(),
            date_published: entry.published.map(|d| d.to_rfc3339()),
        })
        .collect();

    let document = JsonFeedDocument { version: "https://jsonfeed.org/version/1.1", title: feed_title.to_string(), items };

    serde_json::to_string_pretty(&document).map_err(EmitError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> OutputEntry {
        OutputEntry {
            id: "urn:1".to_string(),
            title: "Bonjour".to_string(),
            link: Some("https://example.com/1".to_string()),
            summary: Some("Un resume".to_string()),
            content: Some("<p>Corps</p>".to_string()),
            published: Some(Utc::now()),
        }
    }

    #[test]
    fn generates_well_formed_atom_xml() {
        let xml = generate_atom_feed("Mon Flux", "urn:feed:1", &[sample_entry()]).unwrap();
        assert!(xml.contains("<feed"));
        assert!(xml.contains("Bonjour"));
    }

    #[test]
    fn generates_json_feed_with_expected_shape() {
        let json = to_json_feed("Mon Flux", &[sample_entry()]).unwrap();
        assert!(json.contains("\"version\": \"https://jsonfeed.org/version/1.1\""));
        assert!(json.contains("Bonjour"));
    }
}
