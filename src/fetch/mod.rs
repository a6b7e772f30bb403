//! HTTP fetcher for catalog pages and image bytes
//!
//! This module owns all network I/O:
//! - Building the shared HTTP client from [`FetcherConfig`]
//! - Fetching pages as text with status classification
//! - Fetching image bytes
//!
//! The client is constructed once and passed explicitly to every function
//! that fetches; nothing in the crate keeps ambient network state. Retry and
//! timeout policy lives here — callers only see a [`FetchOutcome`].

use crate::config::FetcherConfig;
use crate::ScrapeError;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Result of fetching one catalog page
#[derive(Debug)]
pub enum FetchOutcome {
    /// Page fetched with a 2xx status
    Success {
        /// Final URL after any redirects
        final_url: Url,
        /// HTTP status code
        status: u16,
        /// Page body as text
        body: String,
    },

    /// HTTP 404 — the paginator uses this as an end-of-listing signal
    NotFound,

    /// Any other non-2xx status
    HttpError {
        /// The HTTP status code
        status: u16,
    },

    /// Connection refused, timeout, DNS failure, etc.
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds the shared HTTP client from fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and classifies the response
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | 2xx | `Success` with body text |
/// | 404 | `NotFound` |
/// | other non-2xx | `HttpError` |
/// | timeout / connect / DNS | `NetworkError` |
///
/// Body decode failures are reported as `NetworkError` since the bytes never
/// arrived intact.
pub async fn fetch_page(client: &Client, url: &Url) -> FetchOutcome {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().clone();

            if status == StatusCode::NOT_FOUND {
                return FetchOutcome::NotFound;
            }

            if !status.is_success() {
                return FetchOutcome::HttpError {
                    status: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Success {
                    final_url,
                    status: status.as_u16(),
                    body,
                },
                Err(e) => FetchOutcome::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchOutcome::NetworkError {
                    error: "request timeout".to_string(),
                }
            } else if e.is_connect() {
                FetchOutcome::NetworkError {
                    error: "connection refused".to_string(),
                }
            } else {
                FetchOutcome::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Fetches raw bytes (cover images); any non-2xx status is an error
pub async fn fetch_bytes(client: &Client, url: &Url) -> crate::Result<Vec<u8>> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| ScrapeError::Http {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::BadStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(|e| ScrapeError::Http {
        url: url.to_string(),
        source: e,
    })?;

    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetcherConfig;

    #[test]
    fn test_build_http_client() {
        let config = FetcherConfig::default();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_build_http_client_custom_agent() {
        let config = FetcherConfig {
            user_agent: "bookscrape-test/1.0".to_string(),
            ..FetcherConfig::default()
        };
        assert!(build_http_client(&config).is_ok());
    }

    // Response classification is covered by the wiremock integration tests,
    // which exercise fetch_page against 200/404/500 responses.
}
