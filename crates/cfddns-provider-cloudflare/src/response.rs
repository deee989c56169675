//! Cloudflare response envelope and its validation
//!
//! Every v4 endpoint wraps its payload in the same envelope:
//!
//! ```json
//! { "success": true, "errors": [], "messages": [], "result": { ... } }
//! ```
//!
//! A response is classified in a fixed order. The HTTP status is checked
//! first, before any attempt to read the body as JSON. Then the body must
//! parse as an envelope. Only then is `success` consulted.

use cfddns_core::{Error, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Cause reported when a failed envelope carries no errors
pub const UNEXPECTED_ERROR: &str = "unexpected error";

/// One entry of the envelope's `errors` or `messages` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Numeric in practice, but kept as sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// The provider's uniform response wrapper
///
/// Only `success` decides the outcome. The other fields are read leniently:
/// missing or `null` lists count as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ApiMessage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<ApiMessage>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Envelope {
    /// Human-readable cause of a failed envelope
    ///
    /// The first error's message, or [`UNEXPECTED_ERROR`] when there is none.
    pub fn failure_cause(&self) -> &str {
        self.errors
            .first()
            .map(|e| e.message.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or(UNEXPECTED_ERROR)
    }

    /// Deserialize the `result` payload into `T`
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        let result = self
            .result
            .ok_or_else(|| Error::invalid_response("response carries no result"))?;

        serde_json::from_value(result)
            .map_err(|e| Error::invalid_response_with("unexpected result shape", e))
    }
}

/// Classify a response given its status and raw body
pub fn validate(status: StatusCode, url: &str, body: &[u8]) -> Result<Envelope> {
    if !status.is_success() {
        return Err(Error::transport(format!(
            "HTTP status {} for url: {}",
            status, url
        )));
    }

    let envelope: Envelope = serde_json::from_slice(body).map_err(|e| {
        Error::invalid_response_with("response is not a valid JSON envelope", e)
    })?;

    if envelope.success {
        return Ok(envelope);
    }

    Err(Error::request_unsuccessful(envelope.failure_cause()))
}

/// Classify a live HTTP response
///
/// The body is not read as JSON unless the status is a success.
pub async fn parse_and_validate(response: reqwest::Response) -> Result<Envelope> {
    let status = response.status();
    let url = response.url().to_string();

    if let Err(e) = response.error_for_status_ref() {
        return Err(Error::transport_with(
            format!("HTTP status {} for url: {}", status, url),
            e,
        ));
    }

    tracing::debug!("Parsing the server response");
    let body = response
        .bytes()
        .await
        .map_err(|e| Error::transport_with("failed to read response body", e))?;

    validate(status, &url, &body)
}
