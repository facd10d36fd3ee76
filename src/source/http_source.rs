// source/http_source.rs
use crate::domain::Listing;
use crate::source::{FetchError, ListingSource};
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, ACCEPT};
use std::time::Duration;

const USER_AGENT: &str = concat!("assumable-listings/", env!("CARGO_PKG_VERSION"));

/// Fetches the recent-listings JSON array from the listings API.
///
/// One attempt per call. Retrying is left to the user reloading the page.
pub struct HttpListingSource {
    client: Client,
    url: String,
}

impl HttpListingSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ListingSource for HttpListingSource {
    fn fetch(&self) -> Result<Vec<Listing>, FetchError> {
        let start = std::time::Instant::now();

        let resp = self
            .client
            .get(&self.url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "listings request rejected");
            return Err(FetchError::Status(status.as_u16()));
        }

        let text = resp
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let listings: Vec<Listing> =
            serde_json::from_str(&text).map_err(|e| FetchError::Parse(e.to_string()))?;

        tracing::debug!(
            url = %self.url,
            count = listings.len(),
            elapsed = ?start.elapsed(),
            "listings fetched"
        );

        Ok(listings)
    }
}
