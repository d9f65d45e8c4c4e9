use std::time::Duration;

use nbdepots_core::AppConfig;

const DEFAULT_TIMEOUT_SECS: u64 = 3;
const DEFAULT_RADIUS_MILES: f64 = 25.0;
const DEFAULT_ELECTRONICS_RADIUS: u32 = 25;

/// Tunables for the resolver and aggregator.
#[derive(Debug, Clone)]
pub struct LocatorSettings {
    /// Appended to every search term before geocoding, e.g. `nb`.
    pub province_code: String,
    pub country: String,
    pub upstream_timeout: Duration,
    pub store_timeout: Duration,
    /// Oil listings processed at once; bounds simultaneous geocoder calls.
    pub max_concurrent_geocodes: usize,
    pub paint_radius_miles: f64,
    pub electronics_radius: u32,
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self {
            province_code: "nb".to_string(),
            country: "Canada".to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            store_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrent_geocodes: 1,
            paint_radius_miles: DEFAULT_RADIUS_MILES,
            electronics_radius: DEFAULT_ELECTRONICS_RADIUS,
        }
    }
}

impl LocatorSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            province_code: config.province_code.clone(),
            country: config.country.clone(),
            upstream_timeout: Duration::from_secs(config.upstream_timeout_secs),
            store_timeout: Duration::from_secs(config.store_timeout_secs),
            max_concurrent_geocodes: config.max_concurrent_geocodes.max(1),
            paint_radius_miles: config.paint_radius_miles,
            electronics_radius: config.electronics_radius,
        }
    }

    /// The free-text query sent to the geocoder for a search term.
    #[must_use]
    pub fn geocode_query(&self, term: &str) -> String {
        format!("{term} {} {}", self.province_code, self.country)
    }
}
