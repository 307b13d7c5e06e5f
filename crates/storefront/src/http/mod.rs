//! HTTP adapters for the remote inventory service.

pub mod catalog;
pub mod dto;
pub mod purchase;

pub use catalog::HttpCatalog;
pub use dto::SweetDto;
pub use purchase::HttpPurchaseApi;

use std::time::Duration;

use crate::error::{Result, StorefrontError};

/// Builds the shared HTTP client.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Validates and normalizes a base URL, dropping any trailing slash.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(StorefrontError::InvalidUrl(base_url.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Pulls a human-readable message out of an error response body.
///
/// Prefers the `message` (or `error`) field of a JSON body and falls back
/// to the raw text.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "error"] {
            if let Some(message) = value.get(field).and_then(|v| v.as_str())
                && !message.is_empty()
            {
                return message.to_string();
            }
        }
    }
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8080/api/").unwrap(),
            "http://localhost:8080/api"
        );
        assert!(matches!(
            normalize_base_url("localhost:8080"),
            Err(StorefrontError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_error_message_prefers_json_field() {
        let body = r#"{"status":500,"error":"Internal Server Error","message":"Insufficient stock"}"#;
        assert_eq!(error_message(body), "Insufficient stock");
        assert_eq!(error_message(r#"{"error":"Forbidden"}"#), "Forbidden");
        assert_eq!(error_message(" plain text \n"), "plain text");
    }
}
