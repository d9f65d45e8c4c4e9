use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Static place-name list served to the front end's autocomplete.
    pub places_path: PathBuf,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub geocoder_url: String,
    pub oil_source_url: String,
    pub electronics_url: String,
    /// Short province code appended to geocoding queries, e.g. `nb`.
    pub province_code: String,
    /// Full province name forwarded to the electronics API, e.g. `New Brunswick`.
    pub province_name: String,
    pub country: String,
    pub user_agent: String,
    pub upstream_timeout_secs: u64,
    pub store_timeout_secs: u64,
    pub max_concurrent_geocodes: usize,
    pub paint_radius_miles: f64,
    pub electronics_radius: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("places_path", &self.places_path)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("geocoder_url", &self.geocoder_url)
            .field("oil_source_url", &self.oil_source_url)
            .field("electronics_url", &self.electronics_url)
            .field("province_code", &self.province_code)
            .field("province_name", &self.province_name)
            .field("country", &self.country)
            .field("user_agent", &self.user_agent)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("store_timeout_secs", &self.store_timeout_secs)
            .field("max_concurrent_geocodes", &self.max_concurrent_geocodes)
            .field("paint_radius_miles", &self.paint_radius_miles)
            .field("electronics_radius", &self.electronics_radius)
            .finish()
    }
}
