use serde::{Deserialize, Serialize};
use std::fmt;

/// The two ways of proving who we are to the management console.
///
/// When deserializing (e.g. from a config file), the shape decides the variant:
/// `{ "apiKey": "..." }` is an API token, `{ "username": "...", "password": "..." }`
/// is a console user login.
#[derive(Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Credentials {
    /// An API token generated from the console.
    ApiToken {
        #[serde(rename = "apiKey", alias = "api_key")]
        api_key: String,
    },
    /// A console user's username and password.
    Password { username: String, password: String },
}

impl Credentials {
    pub fn api_token(api_key: impl Into<String>) -> Self {
        Self::ApiToken {
            api_key: api_key.into(),
        }
    }

    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            username: username.into(),
            password: password.into(),
        }
    }

    /// A short, secret-free label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiToken { .. } => "api-token",
            Self::Password { .. } => "password",
        }
    }

    /// The body we POST to the login endpoint for these credentials.
    pub(crate) fn login_request(&self) -> LoginRequest<'_> {
        match self {
            Self::ApiToken { api_key } => LoginRequest::ApiToken { api_token: api_key },
            Self::Password { username, password } => LoginRequest::Password { username, password },
        }
    }
}

// Never let a secret end up in a log line or panic message.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiToken { .. } => f
                .debug_struct("ApiToken")
                .field("api_key", &"<redacted>")
                .finish(),
            Self::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Login request body. Both shapes go to the same endpoint.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub(crate) enum LoginRequest<'a> {
    ApiToken {
        #[serde(rename = "apiToken")]
        api_token: &'a str,
    },
    Password {
        username: &'a str,
        password: &'a str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_token_login_body() {
        let credentials = Credentials::api_token("K");
        let body = serde_json::to_value(credentials.login_request()).unwrap();
        assert_eq!(body, json!({"apiToken": "K"}));
    }

    #[test]
    fn password_login_body() {
        let credentials = Credentials::password("analyst", "hunter2");
        let body = serde_json::to_value(credentials.login_request()).unwrap();
        assert_eq!(body, json!({"username": "analyst", "password": "hunter2"}));
    }

    #[test]
    fn deserializes_by_shape() {
        let token: Credentials = serde_json::from_value(json!({"apiKey": "K"})).unwrap();
        assert_eq!(token, Credentials::api_token("K"));

        let snake: Credentials = serde_json::from_value(json!({"api_key": "K"})).unwrap();
        assert_eq!(snake, Credentials::api_token("K"));

        let login: Credentials =
            serde_json::from_value(json!({"username": "u", "password": "p"})).unwrap();
        assert_eq!(login, Credentials::password("u", "p"));
    }

    #[test]
    fn rejects_incomplete_password_credentials() {
        let result: Result<Credentials, _> = serde_json::from_value(json!({"username": "u"}));
        assert!(result.is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let rendered = format!("{:?}", Credentials::password("analyst", "hunter2"));
        assert!(rendered.contains("analyst"));
        assert!(!rendered.contains("hunter2"));

        let rendered = format!("{:?}", Credentials::api_token("very-secret"));
        assert!(!rendered.contains("very-secret"));
    }

    #[test]
    fn kind_labels() {
        assert_eq!(Credentials::api_token("K").kind(), "api-token");
        assert_eq!(Credentials::password("u", "p").kind(), "password");
    }
}
