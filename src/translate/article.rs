//! Best-effort full-article fetch (§4.6, `SourceFeed::fetch_article`): when
//! a feed only publishes a summary, entries can optionally be expanded by
//! fetching the linked page and pulling its `<body>` HTML. Failure here
//! never aborts the pipeline — it just means the entry falls back to
//! whatever the feed itself provided.

use reqwest::Client;

/// Fetches `url` and returns its body's inner HTML, or `None` on any
/// failure (network error, non-2xx status, no `<body>` in the response).
pub async fn fetch_article_body(client: &Client, url: &str) -> Option<String> {
    let response = client.get(url).send().await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    let html = response.text().await.ok()?;

    use kuchikiki::traits::TendrilSink;
    let document = kuchikiki::parse_html().one(html);
    let body = document.select_first("body").ok()?;

    let mut out = Vec::new();
    for child in body.as_node().children() {
        let _ = child.serialize(&mut out);
    }
    let text = String::from_utf8(out).ok()?;
    if text.trim().is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn extracts_body_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/article"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body><p>Full text.</p></body></html>"))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/article", server.uri());
        let body = fetch_article_body(&client, &url).await.unwrap();
        assert!(body.contains("Full text."));
    }

    #[tokio::test]
    async fn returns_none_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/missing", server.uri());
        assert!(fetch_article_body(&client, &url).await.is_none());
    }
}
