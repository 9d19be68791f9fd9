use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while talking to the management API.
#[derive(Debug, Error)]
pub enum Error {
    /// The client was configured with values we can't build requests from.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Logging in failed, so no client was produced.
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthenticationError),

    /// A get/post/put round trip didn't produce a JSON body.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: RequestError,
    },

    /// The API answered with a non-2xx status.
    #[error("API returned HTTP {status} for {url}")]
    Api {
        url: String,
        status: StatusCode,
        /// The parsed response body, or the raw text if it wasn't JSON.
        body: Value,
    },
}

/// Reasons the login exchange can fail.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("login request could not be sent: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("login rejected with HTTP {status}")]
    Rejected { status: StatusCode, body: String },

    #[error("login response was not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("login response did not contain data.token")]
    MissingToken,

    #[error("login token cannot be used as a header value")]
    InvalidToken,
}

/// Reasons a single API request can fail before a status is even considered.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response body was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// The HTTP status behind this error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Authentication(AuthenticationError::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }
}
