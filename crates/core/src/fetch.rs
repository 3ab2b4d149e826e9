//! Page fetching from the booking site, local files, and stdin.
//!
//! Only URLs on an allowed domain are requested. There are no retries; a
//! failed request is returned to the caller as-is.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
use url::Url;

use crate::{KeretaError, Result};

/// Base URL of the booking site's schedule search.
pub const DEFAULT_BASE_URL: &str = "https://booking.kai.id/";

/// HTTP client configuration for fetching result pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Hosts that may be requested. Empty allows any host.
    pub allowed_domains: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Kereta/0.1)".to_string(),
            allowed_domains: vec!["booking.kai.id".to_string()],
        }
    }
}

impl FetchConfig {
    /// Checks that `url` is http(s) and its host is allowed.
    pub fn check_url(&self, url: &Url) -> Result<()> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(KeretaError::InvalidUrl(format!("Unsupported scheme: {}", url.scheme())));
        }

        let host = url
            .host_str()
            .ok_or_else(|| KeretaError::InvalidUrl("No domain found in URL".to_string()))?;

        if self.allowed_domains.is_empty() || self.allowed_domains.iter().any(|d| d.eq_ignore_ascii_case(host)) {
            Ok(())
        } else {
            Err(KeretaError::InvalidUrl(format!("Domain not allowed: {}", host)))
        }
    }
}

/// Fetches HTML content from a URL.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &Url, config: &FetchConfig) -> Result<String> {
    config.check_url(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(KeretaError::HttpError)?;

    tracing::info!(url = %url, "visiting");

    let response = client
        .get(url.clone())
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "id-ID,id;q=0.9,en;q=0.8")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                KeretaError::Timeout { timeout: config.timeout }
            } else {
                KeretaError::HttpError(e)
            }
        })?;

    let response = response.error_for_status()?;
    let content = response.text().await?;
    tracing::debug!(bytes = content.len(), "fetched page");

    Ok(content)
}

/// Reads HTML content from a local file, such as a saved results page.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(KeretaError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(KeretaError::from)
    }
}

/// Reads HTML content from standard input.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(KeretaError::from)?;

    Ok(buffer)
}
