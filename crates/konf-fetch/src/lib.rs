//! HTTP retrieval of the schedule document.
//!
//! The schedule is one externally-hosted YAML document fetched once per
//! run. Failure is always surfaced to the user: a bad HTTP status, a host
//! serving its HTML error page instead of the document, or a network error
//! never degrade into stale or empty data.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Default request timeout for the document fetch.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// The request itself failed (network, timeout, invalid URL).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("schedule fetch failed with status {status}")]
    Status { status: reqwest::StatusCode },
    /// The payload is an HTML page, not a schedule document.
    ///
    /// Static hosts commonly answer a missing file with their index or
    /// error page; the raw body is kept so the user can inspect what was
    /// actually served.
    #[error("received HTML instead of a schedule document")]
    HtmlPayload { body: String },
}

/// Schedule document fetcher.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { http })
    }

    /// Fetches the schedule document and returns the raw body.
    ///
    /// The body is returned verbatim; parsing is the caller's concern so
    /// that a parse failure can still show the fetched payload.
    pub async fn fetch_document(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url, "fetching schedule document");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let body = response.text().await?;
        if looks_like_html(&body) {
            return Err(FetchError::HtmlPayload { body });
        }
        Ok(body)
    }
}

/// Returns true if the payload is an HTML page rather than a document.
fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    let lowered = head
        .get(..head.len().min(256))
        .unwrap_or(head)
        .to_ascii_lowercase();
    lowered.starts_with("<!doctype html") || lowered.starts_with("<html")
}
