use serde::Deserialize;
use std::time::Duration;

use crate::api::{Client, Console};
use crate::auth::Credentials;
use crate::error::Result;
use crate::http_client::DEFAULT_TIMEOUT;

/// Everything needed to connect, in a form that can be loaded from a config file.
///
/// ```json
/// {
///     "subdomain": "acme",
///     "credentials": { "apiKey": "..." },
///     "site_ids": ["225494730938493804"],
///     "timeout_secs": 10
/// }
/// ```
#[derive(Deserialize, Debug, Clone)]
pub struct ClientConfig {
    pub subdomain: String,
    pub credentials: Credentials,
    #[serde(default, alias = "siteIds")]
    pub site_ids: Option<Vec<String>>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Overrides `https://{subdomain}.sentinelone.net`.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ClientConfig {
    /// Logs in with this configuration.
    pub async fn connect(self) -> Result<Client> {
        let mut builder =
            Client::builder(self.subdomain, self.credentials).site_scope(self.site_ids);
        if let Some(timeout_secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        builder.connect().await
    }
}

/// Builder for [`Client`]. Nothing touches the network until [`ClientBuilder::connect`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    pub(crate) subdomain: String,
    pub(crate) credentials: Credentials,
    pub(crate) site_ids: Vec<String>,
    pub(crate) timeout: Duration,
    pub(crate) base_url: Option<String>,
}

impl ClientBuilder {
    pub fn new(subdomain: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            subdomain: subdomain.into(),
            credentials,
            site_ids: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            base_url: None,
        }
    }

    /// Scopes every request to these sites. An empty list means no scoping.
    pub fn site_ids<I, S>(mut self, site_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.site_ids = site_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Like [`ClientBuilder::site_ids`], with `None` meaning no scoping.
    pub fn site_scope(self, site_ids: Option<Vec<String>>) -> Self {
        self.site_ids(site_ids.unwrap_or_default())
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Talks to this base URL instead of the subdomain's hosted console.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Resolves where requests go. The subdomain is validated even when overridden.
    pub(crate) fn console(&self) -> Result<Console> {
        let hosted = Console::for_subdomain(&self.subdomain)?;
        match &self.base_url {
            Some(base_url) => Console::at(base_url),
            None => Ok(hosted),
        }
    }

    /// Logs in and produces a ready-to-use client.
    pub async fn connect(self) -> Result<Client> {
        Client::connect(self).await
    }
}
