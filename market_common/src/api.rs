//! JSON envelopes and route payloads.
//!
//! Every route answers with a `success` flag. Successful payloads are flattened next to
//! it; failures carry a single `error` message.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::catalog::SearchCatalogEntry;
use crate::error::MarketError;
use crate::quote::{MarketIndex, TickerQuote};

/// Successful response: `{"success": true, ...payload}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` for this shape.
    pub success: bool,
    /// Route payload, flattened into the top-level object.
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in a successful envelope.
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data,
        }
    }
}

/// Failed response: `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false` for this shape.
    pub success: bool,
    /// Human-readable message.
    pub error: String,
}

impl ErrorResponse {
    /// Creates a failure envelope.
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            success: false,
            error: error.into(),
        }
    }
}

/// Payload of the market overview route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    /// Index cards in display order.
    pub market_data: Vec<MarketIndex>,
}

/// Payload of the stock search route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matching catalog entries in catalog order.
    pub results: Vec<SearchCatalogEntry>,
}

/// Payload of the ticker tape route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerTape {
    /// Tape entries in display order.
    pub tickers: Vec<TickerQuote>,
}

/// Payload of the health route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `healthy` while the process serves requests.
    pub status: String,
    /// Service name.
    pub service: String,
    /// RFC 3339 time of the check.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// Always `demo`: no live market feed is wired.
    pub mode: String,
    /// Names of the configured quote sources.
    pub data_sources: Vec<String>,
    /// Symbols of the search catalog.
    pub available_symbols: Vec<String>,
}

/// Decodes a response body, turning `success: false` into `MarketError::Provider`.
///
/// The provider message is used when present, `fallback` otherwise.
pub fn decode<T: DeserializeOwned>(body: &str, fallback: &str) -> Result<T, MarketError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if value.get("success").and_then(serde_json::Value::as_bool) == Some(true) {
        return Ok(serde_json::from_value(value)?);
    }
    let message = value
        .get("error")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback);
    Err(MarketError::Provider(String::from(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::Quote;

    #[test]
    fn success_envelope_flattens_payload() {
        let body = ApiResponse::ok(MarketOverview {
            market_data: vec![Quote::new("^GSPC", "S&P 500", 4567.89, 12.45, 0.27)],
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["market_data"][0]["name"], "S&P 500");
    }

    #[test]
    fn decode_reads_successful_payload() {
        let body = r#"{"success":true,"results":[]}"#;
        let parsed: SearchResults = decode(body, "fallback").unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn decode_surfaces_provider_message() {
        let body = r#"{"success":false,"error":"Failed to fetch data"}"#;
        let err = decode::<SearchResults>(body, "fallback").unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch data");
    }

    #[test]
    fn decode_uses_fallback_without_message() {
        let err = decode::<SearchResults>(r#"{"success":false}"#, "fallback").unwrap_err();
        assert!(matches!(err, MarketError::Provider(ref m) if m == "fallback"));
    }

    #[test]
    fn decode_rejects_non_json() {
        let err = decode::<SearchResults>("<html>", "fallback").unwrap_err();
        assert!(matches!(err, MarketError::SerdeJson(_)));
    }
}
