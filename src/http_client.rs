use serde_json::Value;
use std::time::Duration;

use crate::error::{Error, RequestError, Result};

/// How long any single request (login included) may take by default.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the underlying reqwest client shared by login and every later request.
pub(crate) fn build(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|err| Error::Config(format!("unable to build HTTP client: {err}")))
}

/// Parses a response body as JSON.
///
/// Some endpoints answer with an empty body on success; we treat that as `null`
/// rather than as a decode failure.
pub(crate) fn parse_json(text: &str) -> std::result::Result<Value, RequestError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

/// Best-effort rendering of an error body: JSON when possible, otherwise the raw text.
pub(crate) fn error_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
