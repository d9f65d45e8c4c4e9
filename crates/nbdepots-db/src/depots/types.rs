//! Row types for the `oil_depots` table.

use chrono::{DateTime, Utc};
use nbdepots_core::{CachedDepot, Coordinate};

/// A row from the `oil_depots` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OilDepotRow {
    pub id: i64,
    pub identity_key: String,
    pub depot_name: String,
    pub physical_address: String,
    pub hours: String,
    pub products: String,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl OilDepotRow {
    /// Blank coordinate columns mean the depot was cached without a geocode.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.lat.clone(), self.lon.clone())
    }
}

impl From<OilDepotRow> for CachedDepot {
    fn from(row: OilDepotRow) -> Self {
        CachedDepot {
            coordinate: row.coordinate(),
            id: row.id,
        }
    }
}
