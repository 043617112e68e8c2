use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine {0}: missing environment variable {1}")]
    MissingApiKey(String, String),

    #[error("engine {0} request failed: {1}")]
    Request(String, #[source] reqwest::Error),

    #[error("engine {0} returned an empty result after {1} attempts")]
    EmptyResult(String, u32),

    #[error("engine {0} returned status {1}: {2}")]
    Status(String, u16, String),

    #[error("engine {0} response could not be parsed: {1}")]
    Malformed(String, String),
}
