use url::Url;

use crate::error::{Error, Result};

/// Every tenant's console lives under this domain.
pub const VENDOR_DOMAIN: &str = "sentinelone.net";

/// Where a tenant's management console can be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Console {
    base_url: String,
}

impl Console {
    /// The hosted console for a subdomain, i.e. `https://{subdomain}.sentinelone.net`.
    pub fn for_subdomain(subdomain: &str) -> Result<Self> {
        if subdomain.trim().is_empty() {
            return Err(Error::Config("subdomain must not be empty".to_string()));
        }

        let base_url = format!("https://{subdomain}.{VENDOR_DOMAIN}");
        // The subdomain ends up in a host name; make sure it actually forms one.
        let parsed = Url::parse(&base_url)
            .map_err(|err| Error::Config(format!("invalid subdomain {subdomain:?}: {err}")))?;
        let expected_host = &base_url["https://".len()..];
        if !parsed
            .host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(expected_host))
        {
            return Err(Error::Config(format!(
                "invalid subdomain {subdomain:?}: not a plain host label"
            )));
        }

        Ok(Self { base_url })
    }

    /// A console at an explicit base URL (self-hosted consoles, test servers).
    pub fn at(base_url: &str) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|err| Error::Config(format!("invalid base URL {base_url:?}: {err}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The full URL for an endpoint path.
    ///
    /// This is plain concatenation. We don't escape or normalize `endpoint`,
    /// so it should start with `/`.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdomain_url_is_literal_concatenation() {
        let console = Console::for_subdomain("acme").unwrap();
        assert_eq!(
            console.url("/web/api/v2.0/agents"),
            "https://acme.sentinelone.net/web/api/v2.0/agents"
        );
        // No normalization whatsoever.
        assert_eq!(console.url("agents"), "https://acme.sentinelone.netagents");
        assert_eq!(console.url("//x?y=1"), "https://acme.sentinelone.net//x?y=1");
        assert_eq!(console.url(""), "https://acme.sentinelone.net");
    }

    #[test]
    fn rejects_empty_subdomain() {
        assert!(matches!(Console::for_subdomain(""), Err(Error::Config(_))));
        assert!(matches!(Console::for_subdomain("  "), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_subdomains_that_change_the_host() {
        assert!(Console::for_subdomain("acme/evil").is_err());
        assert!(Console::for_subdomain("user@evil.com#").is_err());
        assert!(Console::for_subdomain("ac me").is_err());
    }

    #[test]
    fn accepts_multi_label_subdomains() {
        let console = Console::for_subdomain("usea1-acme").unwrap();
        assert_eq!(console.base_url(), "https://usea1-acme.sentinelone.net");
    }

    #[test]
    fn explicit_base_url_drops_trailing_slash() {
        let console = Console::at("http://127.0.0.1:8080/").unwrap();
        assert_eq!(console.url("/web/api/v2.0/sites"), "http://127.0.0.1:8080/web/api/v2.0/sites");
    }

    #[test]
    fn explicit_base_url_must_parse() {
        assert!(matches!(Console::at("not a url"), Err(Error::Config(_))));
    }
}
