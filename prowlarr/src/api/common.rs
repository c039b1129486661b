//! Common types and utilities for the Prowlarr API

use serde::Deserialize;

/// One entry of the validation error list the server returns on 400
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    #[serde(default)]
    pub property_name: String,
    #[serde(default)]
    pub error_message: String,
}

/// Error body shape for everything that is not a validation list
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub message: Option<String>,
    pub description: Option<String>,
}

/// Pull a readable message and the validation list out of an error body.
/// Attempted values are dropped since they may echo secrets.
pub fn parse_error_body(text: &str) -> (String, Vec<ValidationFailure>) {
    if let Ok(failures) = serde_json::from_str::<Vec<ValidationFailure>>(text) {
        let message = failures
            .first()
            .map(|f| f.error_message.clone())
            .unwrap_or_default();
        return (message, failures);
    }

    if let Ok(body) = serde_json::from_str::<ApiErrorResponse>(text) {
        if let Some(message) = body.message.or(body.description) {
            return (message, vec![]);
        }
    }

    let message = if text.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        text.trim().to_string()
    };
    (message, vec![])
}
