//! Conditional GET against a source feed URL (§4.4), grounded on the
//! `reqwest::Client::get` + header inspection pattern used throughout the
//! teacher's provider clients, plus `feed_rs::parser::parse` for turning
//! the response body into a format-agnostic entry list (RSS and Atom both
//! decode to the same `feed_rs::model::Feed`).

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, header};

use super::error::FetchError;

pub struct ParsedEntry {
    pub id: String,
    pub title: String,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

pub enum FetchOutcome {
    /// Server answered 304 against the `etag` we sent; nothing to do.
    NotModified,
    /// New content, with the etag to persist on `SourceFeed` for next time.
    Fetched {
        entries: Vec<ParsedEntry>,
        etag: Option<String>,
        size: u64,
        title: Option<String>,
        /// Raw response bytes, written verbatim to `<data_dir>/feeds/<sid>.xml`
        /// by the refresher (§4.7 step 6).
        raw: Vec<u8>,
    },
}

/// Fetches `url`, sending `If-None-Match: etag` when one is known, and
/// parses a successful response with `feed-rs`. A non-2xx/304 status or an
/// unparseable body is a [`FetchError`]; the caller (the refresher) decides
/// whether that's retryable.
pub async fn fetch_feed(client: &Client, url: &str, etag: Option<&str>) -> Result<FetchOutcome, FetchError> {
    let mut request = client.get(url);
    if let Some(etag) = etag {
        request = request.header(header::IF_NONE_MATCH, etag);
    }

    let response = request
        .send()
        .await
        .map_err(|e| FetchError::Request(url.to_string(), e))?;

    if response.status() == StatusCode::NOT_MODIFIED {
        return Ok(FetchOutcome::NotModified);
    }
    if !response.status().is_success() {
        return Err(FetchError::Status(url.to_string(), response.status().as_u16()));
    }

    let new_etag = response
        .headers()
        .get(header::ETAG)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Request(url.to_string(), e))?;
    let size = bytes.len() as u64;

    let (entries, title) = parse_feed_bytes(&bytes, url)?;

    Ok(FetchOutcome::Fetched { entries, etag: new_etag, size, title, raw: bytes.to_vec() })
}

/// Parses raw RSS/Atom bytes into entries plus the feed's own title, shared
/// between a live HTTP fetch and the refresher re-reading its own persisted
/// `<sid>.xml` for the orchestrator (§4.6, §4.7 step 6).
pub fn parse_feed_bytes(bytes: &[u8], source: &str) -> Result<(Vec<ParsedEntry>, Option<String>), FetchError> {
    let parsed = feed_rs::parser::parse(bytes).map_err(|e| FetchError::Parse(source.to_string(), e))?;
    let title = parsed.title.map(|t| t.content);

    let entries = parsed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry.title.map(|t| t.content).unwrap_or_else(|| "Untitled".to_string());
            let link = entry.links.first().map(|l| l.href.clone());
            let summary = entry.summary.map(|s| s.content);
            let content = entry.content.and_then(|c| c.body);
            let published = entry.published.or(entry.updated);
            ParsedEntry { id: entry.id, title, link, summary, content, published }
        })
        .collect();

    Ok((entries, title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE_RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>Test</title>
<item><title>Hello</title><link>https://example.com/1</link><guid>1</guid><description>World</description></item>
</channel></rss>"#;

    #[tokio::test]
    async fn fetches_and_parses_new_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_RSS).insert_header("ETag", "\"abc\""))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/feed.xml", server.uri());
        let outcome = fetch_feed(&client, &url, None).await.unwrap();

        match outcome {
            FetchOutcome::Fetched { entries, etag, .. } => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].title, "Hello");
                assert_eq!(etag.as_deref(), Some("\"abc\""));
            }
            FetchOutcome::NotModified => panic!("expected fresh content"),
        }
    }

    #[tokio::test]
    async fn returns_not_modified_on_304() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .and(header("If-None-Match", "\"abc\""))
            .respond_with(ResponseTemplate::new(304))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/feed.xml", server.uri());
        let outcome = fetch_feed(&client, &url, Some("\"abc\"")).await.unwrap();
        assert!(matches!(outcome, FetchOutcome::NotModified));
    }

    #[tokio::test]
    async fn propagates_server_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/feed.xml", server.uri());
        let result = fetch_feed(&client, &url, None).await;
        assert!(matches!(result, Err(FetchError::Status(_, 500))));
    }
}
