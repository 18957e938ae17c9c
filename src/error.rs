//! Error types for source fetching and extraction.
//!
//! Every adapter funnels its failures into [`FetchError`] so the aggregator
//! can log one typed cause per source and move on. Nothing in this module
//! escapes the aggregation boundary; see `aggregator.rs`.

use thiserror::Error;

/// A failure while fetching or extracting a single source or page.
///
/// Network, parse, and configuration failures are deliberately kept in one
/// enum: the recovery policy is identical (the source contributes nothing to
/// the run), only the log line differs.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection failure, timeout, or non-2xx response.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A source URL that does not parse as an absolute URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// A CSS selector string that does not compile.
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    /// A feed body that neither the RSS nor the Atom parser accepts.
    #[error("feed did not parse: {0}")]
    Feed(String),

    /// A response body that is not valid JSON.
    #[error("response was not valid json: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured JSON key is missing or its value is not a string.
    #[error("json key `{0}` is missing or not a string")]
    JsonKey(String),

    /// A source description that cannot be acted on.
    #[error("{0}")]
    Config(String),
}

impl FetchError {
    /// Build the configuration error for a source missing its selector.
    pub fn missing_selector(source_name: &str) -> Self {
        FetchError::Config(format!(
            "source `{source_name}` requires a selector for HTML extraction"
        ))
    }
}
