//! Capability traits for the collaborators the depot pipeline depends on.
//!
//! Implementations live in `nbdepots-db` (Postgres) and `nbdepots-scraper`
//! (HTTP). Components receive them as `Arc<dyn …>` at construction.

use async_trait::async_trait;

use crate::distance::rank;
use crate::error::LocateError;
use crate::identity::DepotIdentity;
use crate::types::{CachedDepot, Coordinate, DepotRecord, RawListing};

/// Free-text forward geocoding.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `query` to candidate coordinates, best match first.
    ///
    /// An empty vector means the service answered but found nothing.
    async fn geocode(&self, query: &str) -> Result<Vec<Coordinate>, LocateError>;
}

/// Read-only postal-prefix → coordinate lookup.
#[async_trait]
pub trait GeoCache: Send + Sync {
    /// `prefix` is already lowercased by the caller.
    async fn get(&self, prefix: &str) -> Result<Option<Coordinate>, LocateError>;
}

/// Persistent cache of scraped oil depots keyed by identity.
#[async_trait]
pub trait DepotCache: Send + Sync {
    async fn find_by_identity(
        &self,
        identity: &DepotIdentity,
    ) -> Result<Option<CachedDepot>, LocateError>;

    /// Insert `record` or return the row already stored under its identity.
    ///
    /// The stored coordinate is authoritative: when a row already exists its
    /// coordinate is returned unchanged, whatever `record` carries.
    async fn insert(&self, record: &DepotRecord) -> Result<CachedDepot, LocateError>;
}

/// Province-scoped store of paint-accepting merchants.
#[async_trait]
pub trait PaintStore: Send + Sync {
    /// Every merchant, in storage order.
    async fn all_merchants(&self) -> Result<Vec<DepotRecord>, LocateError>;

    /// Merchants strictly within `radius` miles of `origin`, nearest first.
    async fn merchants_near(
        &self,
        origin: &Coordinate,
        radius: f64,
    ) -> Result<Vec<DepotRecord>, LocateError> {
        let all = self.all_merchants().await?;
        Ok(rank(origin, all, radius))
    }
}

/// Source of coordinate-less listings scraped for a search term.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch(&self, term: &str) -> Result<Vec<RawListing>, LocateError>;
}

/// Upstream search API that already returns geocoded electronics depots.
#[async_trait]
pub trait ElectronicsSource: Send + Sync {
    async fn search(
        &self,
        origin: &Coordinate,
        radius: u32,
        term: &str,
    ) -> Result<Vec<DepotRecord>, LocateError>;
}
