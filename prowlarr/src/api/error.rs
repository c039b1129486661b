use thiserror::Error;

use super::common::ValidationFailure;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("API rejected request (HTTP {status}): {}", format_failures(.message, .failures))]
    Rejected {
        status: u16,
        message: String,
        failures: Vec<ValidationFailure>,
    },

    #[error("API returned error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Authentication failed (HTTP {0})")]
    AuthError(u16),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Too many requests, rate limited")]
    RateLimited,

    #[error("Service unavailable, retry later")]
    ServiceUnavailable,
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

fn format_failures(message: &str, failures: &[ValidationFailure]) -> String {
    if failures.is_empty() {
        return message.to_string();
    }

    failures
        .iter()
        .map(|f| format!("{}: {}", f.property_name, f.error_message))
        .collect::<Vec<_>>()
        .join(", ")
}
