use std::time::Duration;

use thiserror::Error;

/// Failure of an outbound call to the search or language model provider.
///
/// The API layer masks every variant behind the same degraded response, the
/// distinction only matters for server-side logs and tests.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {provider} failed: {message}")]
    Http {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} responded with status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("malformed response from {provider}: {message}")]
    Malformed {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} did not respond within {timeout:?}")]
    Timeout {
        provider: &'static str,
        timeout: Duration,
    },
}

impl ProviderError {
    /// Map a transport error from reqwest, keeping client-side timeouts apart.
    pub fn from_reqwest(provider: &'static str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout { provider, timeout }
        } else if err.is_decode() {
            ProviderError::Malformed {
                provider,
                message: err.to_string(),
            }
        } else {
            ProviderError::Http {
                provider,
                message: err.to_string(),
            }
        }
    }

    pub fn provider(&self) -> &'static str {
        match self {
            ProviderError::Http { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::Malformed { provider, .. }
            | ProviderError::Timeout { provider, .. } => provider,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Query too short")]
    QuestionTooShort,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("rate limit of {limit} requests per {window:?} exceeded")]
pub struct RateLimitExceeded {
    pub limit: u32,
    pub window: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for environment variable {key}")]
    Invalid { key: &'static str, value: String },
}
