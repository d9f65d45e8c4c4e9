//! The electronics drop-off store-search API (a `WordPress` store locator
//! `admin-ajax.php` endpoint).

use async_trait::async_trait;
use nbdepots_core::{Category, Coordinate, DepotRecord, ElectronicsSource, LocateError};
use reqwest::Client;
use serde::{Deserialize, Deserializer};

use crate::client::{build_client, endpoint, ensure_success};
use crate::error::ScraperError;

/// Upper bound on results requested per search; the API caps on its side.
const MAX_RESULTS: &str = "9999";

/// One store as returned by the search endpoint.
///
/// The plugin emits every field as a string, but some installs emit numbers
/// for ids and coordinates, so fields are read leniently.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ElectronicsStore {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub store: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(deserialize_with = "lenient_string")]
    pub zip: String,
    #[serde(deserialize_with = "lenient_string")]
    pub lat: String,
    #[serde(deserialize_with = "lenient_string")]
    pub lng: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub hours: String,
    #[serde(deserialize_with = "lenient_string")]
    pub terms: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

impl From<ElectronicsStore> for DepotRecord {
    fn from(store: ElectronicsStore) -> Self {
        let mut record = DepotRecord::new(Category::Electronics, store.store, store.address);
        record.external_id = Some(store.id).filter(|id| !id.is_empty());
        record.city = store.city;
        record.state = store.state;
        record.zip = store.zip;
        record.phone = store.phone;
        record.hours = store.hours;
        record.terms = store.terms;
        record.description = store.description;
        record.coordinate = Coordinate::from_parts(Some(store.lat), Some(store.lng));
        record
    }
}

/// Client for the province's electronics store search.
pub struct ElectronicsClient {
    client: Client,
    search_url: String,
    province_name: String,
    country: String,
}

impl ElectronicsClient {
    /// `province_code` selects the per-province site (`/nb/…`);
    /// `province_name` and `country` are forwarded as search statistics.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] for an unusable `base_url`, or
    /// [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        province_code: &str,
        province_name: &str,
        country: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let path = format!("/{}/wp-admin/admin-ajax.php", province_code.trim_matches('/'));
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            search_url: endpoint(base_url, &path)?,
            province_name: province_name.to_string(),
            country: country.to_string(),
        })
    }

    /// Searches for stores within `radius` of `origin`, forwarding `term`
    /// verbatim.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`]: network failure or timeout.
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx response.
    /// - [`ScraperError::Deserialize`]: the body is not a JSON array of stores.
    pub async fn fetch_stores(
        &self,
        origin: &Coordinate,
        radius: u32,
        term: &str,
    ) -> Result<Vec<ElectronicsStore>, ScraperError> {
        let radius = radius.to_string();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("action", "store_search"),
                ("lat", origin.lat.as_str()),
                ("lng", origin.lon.as_str()),
                ("max_results", MAX_RESULTS),
                ("search_radius", radius.as_str()),
                ("search", term),
                ("statistics[city]", term),
                ("statistics[region]", self.province_name.as_str()),
                ("statistics[country]", self.country.as_str()),
            ])
            .send()
            .await?;
        let body = ensure_success(response)?.text().await?;

        serde_json::from_str(&body).map_err(|source| ScraperError::Deserialize {
            context: "electronics store_search".to_string(),
            source,
        })
    }
}

#[async_trait]
impl ElectronicsSource for ElectronicsClient {
    async fn search(
        &self,
        origin: &Coordinate,
        radius: u32,
        term: &str,
    ) -> Result<Vec<DepotRecord>, LocateError> {
        let stores = self.fetch_stores(origin, radius, term).await?;
        tracing::debug!(term, count = stores.len(), "electronics stores fetched");
        Ok(stores.into_iter().map(DepotRecord::from).collect())
    }
}
