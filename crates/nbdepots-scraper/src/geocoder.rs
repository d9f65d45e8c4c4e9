//! Forward geocoding against a Nominatim-compatible `/search` endpoint.

use async_trait::async_trait;
use nbdepots_core::{Coordinate, Geocoder, LocateError};
use reqwest::Client;
use serde::Deserialize;

use crate::client::{build_client, endpoint, ensure_success};
use crate::error::ScraperError;

/// One search hit. Nominatim returns coordinates as decimal strings and a
/// great many other fields we ignore.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    #[serde(default)]
    lat: String,
    #[serde(default)]
    lon: String,
}

/// Client for the Nominatim search API.
///
/// Always asks for a single JSON result; a successful empty array means no
/// match.
pub struct NominatimClient {
    client: Client,
    search_url: String,
}

impl NominatimClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] for an unusable `base_url`, or
    /// [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            search_url: endpoint(base_url, "/search")?,
        })
    }

    /// Runs one search and returns the usable coordinates, best match first.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`]: network failure or timeout.
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx response.
    /// - [`ScraperError::Deserialize`]: the body is not a JSON array of places.
    pub async fn search(&self, query: &str) -> Result<Vec<Coordinate>, ScraperError> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;
        let body = ensure_success(response)?.text().await?;

        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|source| ScraperError::Deserialize {
                context: "nominatim search".to_string(),
                source,
            })?;

        let coordinates: Vec<Coordinate> = places
            .into_iter()
            .filter_map(|p| Coordinate::from_parts(Some(p.lat), Some(p.lon)))
            .collect();
        tracing::debug!(query, hits = coordinates.len(), "geocoded");
        Ok(coordinates)
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Vec<Coordinate>, LocateError> {
        self.search(query).await.map_err(LocateError::from)
    }
}
