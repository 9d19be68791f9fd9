use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::Credentials;
use crate::error::AuthenticationError;

/// The login endpoint, relative to the console's base URL.
///
/// Both credential kinds are exchanged here, even username/password logins.
pub const LOGIN_ENDPOINT: &str = "/web/api/v2.0/users/login/by-api-token";

/// Exchanges our credentials for a session token.
///
/// This issues exactly one request, and we don't retry: if it fails,
/// the caller has to try constructing a client again.
pub(crate) async fn authenticate(
    client: &reqwest::Client,
    login_url: &str,
    credentials: &Credentials,
) -> Result<String, AuthenticationError> {
    debug!(url = %login_url, kind = credentials.kind(), "logging in");

    let response = client
        .post(login_url)
        .json(&credentials.login_request())
        .send()
        .await
        .map_err(AuthenticationError::Transport)?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(AuthenticationError::Transport)?;

    if !status.is_success() {
        warn!(%status, kind = credentials.kind(), "login rejected");
        return Err(AuthenticationError::Rejected { status, body: text });
    }

    let body: Value = serde_json::from_str(&text).map_err(AuthenticationError::Decode)?;
    let token = extract_token(&body)?;

    info!(kind = credentials.kind(), "logged in");
    Ok(token)
}

/// Pulls `data.token` out of a login response.
fn extract_token(body: &Value) -> Result<String, AuthenticationError> {
    match body.pointer("/data/token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(AuthenticationError::MissingToken),
    }
}

/// The headers attached to every request made after login.
pub(crate) fn session_headers(token: &str) -> Result<HeaderMap, AuthenticationError> {
    let mut authorization = HeaderValue::from_str(&format!("Token {token}"))
        .map_err(|_| AuthenticationError::InvalidToken)?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, authorization);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_token() {
        let body = json!({"data": {"token": "T", "userId": "42"}});
        assert_eq!(extract_token(&body).unwrap(), "T");
    }

    #[test]
    fn missing_data_is_missing_token() {
        let err = extract_token(&json!({"errors": [{"title": "Unauthorized"}]})).unwrap_err();
        assert!(matches!(err, AuthenticationError::MissingToken));
    }

    #[test]
    fn non_string_token_is_missing_token() {
        let err = extract_token(&json!({"data": {"token": 12}})).unwrap_err();
        assert!(matches!(err, AuthenticationError::MissingToken));

        let err = extract_token(&json!({"data": {"token": ""}})).unwrap_err();
        assert!(matches!(err, AuthenticationError::MissingToken));
    }

    #[test]
    fn session_headers_carry_token() {
        let headers = session_headers("T").unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Token T");
        assert!(headers[header::AUTHORIZATION].is_sensitive());
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let err = session_headers("T\nX-Injected: 1").unwrap_err();
        assert!(matches!(err, AuthenticationError::InvalidToken));
    }
}
