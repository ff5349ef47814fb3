//! HTTP pension lookup client.

use crate::error::{LookupError, Result};
use crate::lookup::PensionLookup;
use async_trait::async_trait;
use i2r_core::PensionConfig;
use reqwest::Client;
use std::time::Duration;

/// Pension lookup over plain HTTP GET.
///
/// Requests `{base_url}/{name}` with the name percent-encoded as a single
/// path segment, and treats the response body as the identifier. Names made
/// only of dots are refused before any request is sent, since URL parsers
/// collapse `.` and `..` segments even when percent-encoded.
pub struct HttpPensionLookup {
    client: Client,
    base_url: String,
}

impl HttpPensionLookup {
    /// Create a client for the given base address and per-request timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a client from the `[pension]` configuration section.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &PensionConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    /// Base address requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The URL requested for a given name.
    ///
    /// # Errors
    /// Returns `LookupError::UnaddressableName` for `.` and `..`.
    pub fn lookup_url(&self, name: &str) -> Result<String> {
        if is_dot_segment(name) {
            return Err(LookupError::UnaddressableName(name.to_string()));
        }
        Ok(format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(name)
        ))
    }
}

fn is_dot_segment(name: &str) -> bool {
    matches!(name, "." | "..")
}

#[async_trait]
impl PensionLookup for HttpPensionLookup {
    async fn fetch(&self, name: &str) -> Result<String> {
        let url = self.lookup_url(name)?;
        tracing::debug!("Requesting pension id from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
