//! # roll-lookup
//!
//! Fetches a student registration page and reads the RA shown after the
//! configured marker label.
//!
//! The target URL comes from the caller. Only `http`/`https` URLs are
//! fetched, and `lookup.allowed_hosts` (when non-empty) restricts which hosts
//! may be reached.

mod error;
mod http;

pub use error::LookupError;
pub use http::parse_page_url;

use std::time::Duration;

use reqwest::Url;
use roll_config::LookupConfig;

/// HTTP client for RA lookups.
pub struct RaLookupClient {
    http: reqwest::Client,
    config: LookupConfig,
}

impl RaLookupClient {
    /// Build a client with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Http` if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Label text the RA follows.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.config.marker
    }

    /// Validate a caller-supplied URL against scheme and host rules.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::InvalidUrl` or `LookupError::HostNotAllowed`.
    pub fn check_url(&self, raw: &str) -> Result<Url, LookupError> {
        let url = parse_page_url(raw)?;
        let host = url.host_str().unwrap_or_default();
        if !self.config.allows_host(host) {
            return Err(LookupError::HostNotAllowed(host.to_string()));
        }
        Ok(url)
    }

    /// Fetch the page body as text.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Http` on transport failure or timeout and
    /// `LookupError::Api` on a non-success status.
    pub async fn fetch_page(&self, url: Url) -> Result<String, LookupError> {
        tracing::debug!(%url, "fetching registration page");
        let resp = self.http.get(url).send().await?;
        let resp = http::check_response(resp).await?;
        Ok(resp.text().await?)
    }

    /// Look up the RA on the page at `raw_url`.
    ///
    /// # Errors
    ///
    /// URL errors from [`Self::check_url`], fetch errors from
    /// [`Self::fetch_page`], and `LookupError::NotFound` when the page has no
    /// marker label followed by a label.
    pub async fn lookup_ra(&self, raw_url: &str) -> Result<String, LookupError> {
        let url = self.check_url(raw_url)?;
        let host = url.host_str().unwrap_or_default().to_string();
        let page = self.fetch_page(url).await?;
        match roll_parser::extract_ra(&page, &self.config.marker) {
            Some(ra) => {
                tracing::info!(%host, "RA found");
                Ok(ra)
            }
            None => {
                tracing::info!(%host, bytes = page.len(), "RA marker not found");
                Err(LookupError::NotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(allowed: &[&str]) -> RaLookupClient {
        let config = LookupConfig {
            allowed_hosts: allowed.iter().map(ToString::to_string).collect(),
            ..LookupConfig::default()
        };
        RaLookupClient::new(&config).unwrap()
    }

    #[test]
    fn open_allowlist_accepts_any_host() {
        let c = client(&[]);
        assert!(c.check_url("https://sed.educacao.example/ficha").is_ok());
        assert_eq!(c.marker(), "Número da RA:");
    }

    #[test]
    fn allowlist_blocks_other_hosts() {
        let c = client(&["sed.educacao.example"]);
        assert!(c.check_url("https://SED.educacao.example/ficha").is_ok());
        let err = c.check_url("http://169.254.169.254/latest").unwrap_err();
        assert!(matches!(err, LookupError::HostNotAllowed(ref h) if h == "169.254.169.254"));
    }

    #[tokio::test]
    async fn bad_url_fails_before_any_request() {
        let err = client(&[]).lookup_ra("gopher://x").await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidUrl(_)));
    }
}
