//! Outbound HTTP adapters: forward geocoding, the oil collection-facility
//! page, and the electronics store-search API.

pub mod client;
pub mod electronics;
pub mod error;
pub mod geocoder;
pub mod oil;

pub use electronics::{ElectronicsClient, ElectronicsStore};
pub use error::ScraperError;
pub use geocoder::NominatimClient;
pub use oil::{parse_listings, OilListingSource};
