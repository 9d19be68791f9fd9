//! A small async client for the SentinelOne management API.
//!
//! Log in once, then call any endpoint with [`Client::get`], [`Client::post`]
//! or [`Client::put`]. Responses come back as untyped JSON in the server's key order.
//!
//! ```no_run
//! use sentinelone_api::{Client, Credentials, Parameters};
//! use serde_json::json;
//!
//! # async fn run() -> sentinelone_api::Result<()> {
//! let site_ids = vec!["225494730938493804".to_string()];
//! let client = Client::new("acme", Credentials::api_token("..."), Some(site_ids)).await?;
//!
//! let mut parameters = Parameters::new();
//! parameters.insert("limit".into(), json!(10));
//! let agents = client.get("/web/api/v2.0/agents", Some(&parameters)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! When a site scope is configured, every request carries a `siteIds` query
//! parameter of the form `"id1,id2"`, quotes included.

mod api;
mod auth;
mod config;
mod error;
mod http_client;

pub use api::{site_scope_value, Client, Console, Parameters, SITE_IDS_PARAMETER, VENDOR_DOMAIN};
pub use auth::{Credentials, LOGIN_ENDPOINT};
pub use config::{ClientBuilder, ClientConfig};
pub use error::{AuthenticationError, Error, RequestError, Result};
pub use http_client::DEFAULT_TIMEOUT;
