//! Response envelope validation
//!
//! Every network call in the crate funnels through here so transport-level
//! and application-level failures share one error taxonomy.

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, ThreadScrapeError};

/// Status codes accepted by default
pub const DEFAULT_EXPECTED_STATUS: &[StatusCode] = &[StatusCode::OK];

const UNKNOWN_ERROR: &str = "Unknown error";

/// Reads a response body and validates it as a GraphQL envelope
///
/// # Arguments
/// * `response` - Response returned by the transport
/// * `context` - Message attached to `UnexpectedStatus` errors
/// * `expected` - Accepted status codes
///
/// # Errors
/// - `HttpError` if the body cannot be read
/// - see [`validate_body`]
pub async fn validate_response(
    response: reqwest::Response,
    context: &str,
    expected: &[StatusCode],
) -> Result<Value> {
    let status = response.status();
    debug!(%status, url = %response.url(), "received response");

    if !expected.contains(&status) {
        warn!(%status, context, "unexpected response status");
        return Err(ThreadScrapeError::UnexpectedStatus {
            status,
            context: context.to_string(),
        });
    }

    let body = response.text().await?;
    validate_body(status, &body, context, expected)
}

/// Validates an already-read status and body
///
/// # Returns
/// The parsed JSON, unchanged
///
/// # Errors
/// - `UnexpectedStatus` if `status` is not in `expected` (body is not inspected)
/// - `MalformedResponse` if the body is not JSON
/// - `RemoteOperationError` if the body has a non-empty `errors` list;
///   the message joins each entry's `message` with newlines
pub fn validate_body(
    status: StatusCode,
    body: &str,
    context: &str,
    expected: &[StatusCode],
) -> Result<Value> {
    if !expected.contains(&status) {
        return Err(ThreadScrapeError::UnexpectedStatus {
            status,
            context: context.to_string(),
        });
    }

    let json: Value = serde_json::from_str(body)
        .map_err(|e| ThreadScrapeError::MalformedResponse(e.to_string()))?;

    if let Some(message) = remote_error_message(&json) {
        warn!(context, "remote operation reported errors");
        return Err(ThreadScrapeError::RemoteOperationError(message));
    }

    Ok(json)
}

/// Joins the `message` of every entry in a non-empty `errors` list
fn remote_error_message(json: &Value) -> Option<String> {
    let errors = json.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }

    let messages: Vec<String> = errors
        .iter()
        .map(|error| match error.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => UNKNOWN_ERROR.to_string(),
            Some(other) => other.to_string(),
        })
        .collect();
    Some(messages.join("\n"))
}
