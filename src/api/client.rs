use reqwest::{header::HeaderMap, Method};
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

use super::parameters::{query_pairs, Parameters};
use super::Console;
use crate::auth::{self, Credentials, LOGIN_ENDPOINT};
use crate::config::ClientBuilder;
use crate::error::{Error, Result};
use crate::http_client;

/// An authenticated session against a tenant's management console.
///
/// A `Client` only exists once login has succeeded, and nothing about it changes
/// afterwards: the token, headers and site scope are fixed for its lifetime.
/// There is no refresh; if the token expires, build a new client.
///
/// It's cheap to share between tasks, as every request only reads from it.
#[derive(Clone)]
pub struct Client {
    /// The tenant subdomain we were created for.
    subdomain: String,
    /// Sites every request is scoped to. Empty means unscoped.
    site_ids: Vec<String>,
    /// The token handed to us at login.
    auth_token: String,
    /// `Authorization` and `Content-Type`, attached to every request.
    headers: HeaderMap,
    console: Console,
    http: reqwest::Client,
}

impl Client {
    /// Logs in to `https://{subdomain}.sentinelone.net` and returns a ready client.
    ///
    /// Pass `None` (or an empty list) for an unscoped client.
    pub async fn new(
        subdomain: impl Into<String>,
        credentials: Credentials,
        site_ids: Option<Vec<String>>,
    ) -> Result<Self> {
        Self::builder(subdomain, credentials)
            .site_scope(site_ids)
            .connect()
            .await
    }

    /// Starts configuring a client with a custom timeout or base URL.
    pub fn builder(subdomain: impl Into<String>, credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(subdomain, credentials)
    }

    pub(crate) async fn connect(builder: ClientBuilder) -> Result<Self> {
        // Validate everything we can before making any network call.
        let console = builder.console()?;
        let http = http_client::build(builder.timeout)?;

        let login_url = console.url(LOGIN_ENDPOINT);
        let auth_token = auth::authenticate(&http, &login_url, &builder.credentials).await?;
        let headers = auth::session_headers(&auth_token)?;

        Ok(Self {
            subdomain: builder.subdomain,
            site_ids: builder.site_ids,
            auth_token,
            headers,
            console,
            http,
        })
    }

    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    pub fn site_ids(&self) -> &[String] {
        &self.site_ids
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The full URL for an endpoint path, e.g. `/web/api/v2.0/agents`.
    ///
    /// This is plain concatenation onto the console's base URL; `endpoint` is
    /// neither escaped nor validated.
    pub fn build_url(&self, endpoint: &str) -> String {
        self.console.url(endpoint)
    }

    /// Performs a GET against `endpoint` and returns the parsed JSON body.
    pub async fn get(&self, endpoint: &str, parameters: Option<&Parameters>) -> Result<Value> {
        self.send(Method::GET, endpoint, parameters, None).await
    }

    /// Performs a POST against `endpoint`, sending `body` as JSON, and returns the parsed JSON body.
    pub async fn post(
        &self,
        endpoint: &str,
        parameters: Option<&Parameters>,
        body: Option<&Value>,
    ) -> Result<Value> {
        self.send(Method::POST, endpoint, parameters, body).await
    }

    /// Performs a PUT against `endpoint`, sending `body` as JSON, and returns the parsed JSON body.
    pub async fn put(
        &self,
        endpoint: &str,
        parameters: Option<&Parameters>,
        body: Option<&Value>,
    ) -> Result<Value> {
        self.send(Method::PUT, endpoint, parameters, body).await
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        parameters: Option<&Parameters>,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.build_url(endpoint);
        let query = query_pairs(parameters, &self.site_ids);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .headers(self.headers.clone());
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, %url, "sending request");
        let request_error = |source: reqwest::Error| Error::Request {
            url: url.clone(),
            source: source.into(),
        };
        let response = request.send().await.map_err(request_error)?;
        let status = response.status();
        let text = response.text().await.map_err(request_error)?;
        debug!(%method, %url, %status, "received response");

        // The API reports failures in the body too, but we don't want callers
        // mistaking an error payload for data.
        if !status.is_success() {
            warn!(%method, %url, %status, "request failed");
            return Err(Error::Api {
                url,
                status,
                body: http_client::error_body(text),
            });
        }

        http_client::parse_json(&text).map_err(|source| Error::Request { url, source })
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("subdomain", &self.subdomain)
            .field("site_ids", &self.site_ids)
            .field("base_url", &self.console.base_url())
            .field("auth_token", &"<redacted>")
            .finish()
    }
}
