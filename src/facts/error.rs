//! Errors raised while fetching a fun fact

use std::time::Duration;
use thiserror::Error;

/// Failures talking to the numbers fact service
#[derive(Debug, Error)]
pub enum FactError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FactError {
    pub(super) fn from_request(url: &str, timeout: Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            Self::Request {
                url: url.to_string(),
                source,
            }
        }
    }

    pub(super) fn from_body(url: &str, timeout: Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            Self::Body {
                url: url.to_string(),
                source,
            }
        }
    }
}
