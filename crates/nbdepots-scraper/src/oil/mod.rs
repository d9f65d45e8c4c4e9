//! The oil collection-facility listing page.

mod parse;

use async_trait::async_trait;
use nbdepots_core::{ListingSource, LocateError, RawListing};
use reqwest::Client;

use crate::client::{build_client, endpoint, ensure_success};
use crate::error::ScraperError;

pub use parse::parse_listings;

const LISTING_PATH: &str = "/en/collection-facilities";

/// Fetches the facility search page for a term and extracts its listings.
pub struct OilListingSource {
    client: Client,
    listing_url: String,
}

impl OilListingSource {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] for an unusable `base_url`, or
    /// [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            listing_url: endpoint(base_url, LISTING_PATH)?,
        })
    }

    /// Downloads the listing page for `term`, returning the raw HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] on network failure and
    /// [`ScraperError::UnexpectedStatus`] on a non-2xx response.
    pub async fn fetch_page(&self, term: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(&self.listing_url)
            .query(&[("location", term)])
            .send()
            .await?;
        Ok(ensure_success(response)?.text().await?)
    }
}

#[async_trait]
impl ListingSource for OilListingSource {
    async fn fetch(&self, term: &str) -> Result<Vec<RawListing>, LocateError> {
        let html = self.fetch_page(term).await?;
        let listings = parse_listings(&html);
        if listings.is_empty() {
            tracing::debug!(term, bytes = html.len(), "oil page had no listings");
        }
        Ok(listings)
    }
}
