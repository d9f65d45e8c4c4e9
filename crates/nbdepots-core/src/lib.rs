//! Domain types, capability traits, and configuration shared by every
//! `nbdepots` crate.

pub mod app_config;
pub mod config;
pub mod distance;
pub mod error;
pub mod identity;
pub mod ports;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use distance::{distance_between, rank, EARTH_RADIUS_MILES};
pub use error::{ConfigError, LocateError};
pub use identity::DepotIdentity;
pub use ports::{DepotCache, ElectronicsSource, GeoCache, Geocoder, ListingSource, PaintStore};
pub use types::{
    CachedDepot, Category, Coordinate, DepotRecord, GeoCacheEntry, RawListing, SearchTerm,
};
