use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {0} failed: {1}")]
    Request(String, #[source] reqwest::Error),

    #[error("{0} returned status {1}")]
    Status(String, u16),

    #[error("{0} did not parse as a feed: {1}")]
    Parse(String, feed_rs::parser::ParseFeedError),
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to build Atom feed: {0}")]
    Build(String),

    #[error("failed to serialize JSON Feed: {0}")]
    Json(#[from] serde_json::Error),
}
