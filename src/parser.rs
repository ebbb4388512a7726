//! Receipt and label parsing - the client for the external OCR service.
//!
//! The service takes a publicly fetchable image URL and answers with the
//! recognized document: receipt scans yield line items, label scans may
//! yield a detected date. The service is a black box; anything it cannot
//! recognize surfaces as a [`Error::ParseFailure`] so the caller can offer
//! the retry / manual-entry path.

use crate::core::inventory::ScannedLineItem;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Request body sent to the parsing service.
#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    #[serde(rename = "imageUrl")]
    image_url: &'a str,
}

/// One recognized line item as the service reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLineItem {
    /// Recognized item text
    #[serde(default)]
    pub description: Option<String>,
    /// Line total
    #[serde(default)]
    pub total: Option<f64>,
    /// Unit price, reported by some document types instead of a total
    #[serde(default)]
    pub price: Option<f64>,
    /// Recognized quantity
    #[serde(default)]
    pub quantity: Option<f64>,
}

/// Parsing service response body.
///
/// The service multiplexes success and failure over one shape: failures
/// carry `status: "error"` and a message, successes carry the recognized
/// document fields.
#[derive(Debug, Clone, Deserialize)]
pub struct ParseResponse {
    /// "error" on failure
    #[serde(default)]
    pub status: Option<String>,
    /// Failure description when `status` is "error"
    #[serde(default)]
    pub message: Option<String>,
    /// Recognized receipt line items
    #[serde(default)]
    pub line_items: Option<Vec<RawLineItem>>,
    /// Recognized document date (expiry-label scans)
    #[serde(default)]
    pub date: Option<String>,
}

/// Client for the receipt/label parsing service.
#[derive(Debug, Clone)]
pub struct ReceiptParser {
    client: reqwest::Client,
    endpoint: String,
}

impl ReceiptParser {
    /// Creates a client for the service at `endpoint`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Submits a receipt image for parsing and returns its usable line items.
    ///
    /// # Errors
    /// Returns [`Error::Http`] when the service cannot be reached and
    /// [`Error::ParseFailure`] when it answers with an error or with nothing
    /// usable; the caller should offer retry or manual entry.
    pub async fn parse_receipt(&self, image_url: &str) -> Result<Vec<ScannedLineItem>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ParseRequest { image_url })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::ParseFailure {
                message: format!("parsing service returned {}", response.status()),
            });
        }

        let body: ParseResponse = response.json().await?;
        let items = line_items_from_response(&body)?;
        info!(count = items.len(), "receipt parsed");
        Ok(items)
    }

    /// Submits an expiry-label image and returns the detected date, if any.
    ///
    /// A label without a recognizable date is not an error - the edit form
    /// simply starts empty.
    ///
    /// # Errors
    /// Returns [`Error::Http`] when the service cannot be reached and
    /// [`Error::ParseFailure`] when it answers with an error.
    pub async fn read_expiry_label(&self, image_url: &str) -> Result<Option<String>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ParseRequest { image_url })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::ParseFailure {
                message: format!("parsing service returned {}", response.status()),
            });
        }

        let body: ParseResponse = response.json().await?;
        if let Some(message) = service_error(&body) {
            return Err(Error::ParseFailure { message });
        }
        Ok(body.date)
    }
}

fn service_error(response: &ParseResponse) -> Option<String> {
    if response.status.as_deref() == Some("error") {
        Some(
            response
                .message
                .clone()
                .unwrap_or_else(|| "unspecified service error".to_string()),
        )
    } else {
        None
    }
}

/// Maps a service response to usable line items.
///
/// Rows with a blank description are dropped; a missing quantity defaults
/// to 1 and the line price comes from `total`, falling back to `price`.
///
/// # Errors
/// Returns [`Error::ParseFailure`] for an error response or one with no
/// usable rows at all.
pub fn line_items_from_response(response: &ParseResponse) -> Result<Vec<ScannedLineItem>> {
    if let Some(message) = service_error(response) {
        return Err(Error::ParseFailure { message });
    }

    let raw = response.line_items.as_deref().unwrap_or_default();
    let mut items = Vec::new();
    for line in raw {
        let Some(description) = line.description.as_deref().map(str::trim) else {
            continue;
        };
        if description.is_empty() {
            continue;
        }

        let price = line.total.or(line.price).unwrap_or(0.0);
        if price < 0.0 {
            warn!(description, price, "dropping line item with negative price");
            continue;
        }

        items.push(ScannedLineItem {
            description: description.to_string(),
            price,
            quantity: line.quantity.unwrap_or(1.0),
        });
    }

    if items.is_empty() {
        return Err(Error::ParseFailure {
            message: "no usable line items recognized".to_string(),
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn response_from(json: &str) -> ParseResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_line_items_mapping() {
        let response = response_from(
            r#"{
                "line_items": [
                    {"description": "Fresh Milk", "total": 700.0, "quantity": 2},
                    {"description": "  Bread ", "total": 150.0},
                    {"description": "Cheese", "price": 420.5, "quantity": 1}
                ]
            }"#,
        );

        let items = line_items_from_response(&response).unwrap();
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].description, "Fresh Milk");
        assert_eq!(items[0].price, 700.0);
        assert_eq!(items[0].quantity, 2.0);

        // Description trimmed, quantity defaulted
        assert_eq!(items[1].description, "Bread");
        assert_eq!(items[1].quantity, 1.0);

        // `price` fills in when `total` is absent
        assert_eq!(items[2].price, 420.5);
    }

    #[test]
    fn test_unusable_rows_are_dropped() {
        let response = response_from(
            r#"{
                "line_items": [
                    {"total": 100.0},
                    {"description": "   ", "total": 50.0},
                    {"description": "Refund", "total": -10.0},
                    {"description": "Eggs", "total": 300.0}
                ]
            }"#,
        );

        let items = line_items_from_response(&response).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Eggs");
    }

    #[test]
    fn test_error_response_is_a_parse_failure() {
        let response = response_from(
            r#"{"status": "error", "message": "Veryfi Client Error: bad image"}"#,
        );

        let result = line_items_from_response(&response);
        let Err(Error::ParseFailure { message }) = result else {
            panic!("expected a parse failure");
        };
        assert!(message.contains("bad image"));
    }

    #[test]
    fn test_empty_recognition_is_a_parse_failure() {
        for json in [r#"{}"#, r#"{"line_items": []}"#] {
            let response = response_from(json);
            assert!(matches!(
                line_items_from_response(&response),
                Err(Error::ParseFailure { .. })
            ));
        }
    }

    #[test]
    fn test_label_date_passthrough() {
        let response = response_from(r#"{"date": "2025-06-01", "line_items": []}"#);
        assert!(service_error(&response).is_none());
        assert_eq!(response.date.as_deref(), Some("2025-06-01"));
    }
}
