//! Postgres-backed implementations of the core storage ports.

use async_trait::async_trait;
use nbdepots_core::{
    CachedDepot, Coordinate, DepotCache, DepotIdentity, DepotRecord, GeoCache, LocateError,
    PaintStore,
};
use sqlx::PgPool;

use crate::{depots, paint, postal, DbError};

fn storage(err: sqlx::Error) -> LocateError {
    DbError::from(err).into()
}

/// Postal-prefix fallback cache.
#[derive(Clone)]
pub struct PgGeoCache {
    pool: PgPool,
}

impl PgGeoCache {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GeoCache for PgGeoCache {
    async fn get(&self, prefix: &str) -> Result<Option<Coordinate>, LocateError> {
        postal::get_postal_coordinate(&self.pool, prefix)
            .await
            .map_err(storage)
    }
}

/// Oil depot cache.
#[derive(Clone)]
pub struct PgDepotCache {
    pool: PgPool,
}

impl PgDepotCache {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepotCache for PgDepotCache {
    async fn find_by_identity(
        &self,
        identity: &DepotIdentity,
    ) -> Result<Option<CachedDepot>, LocateError> {
        let row = depots::find_oil_depot(&self.pool, identity)
            .await
            .map_err(storage)?;
        Ok(row.map(CachedDepot::from))
    }

    async fn insert(&self, record: &DepotRecord) -> Result<CachedDepot, LocateError> {
        let row = depots::insert_oil_depot(&self.pool, record)
            .await
            .map_err(storage)?;
        tracing::debug!(id = row.id, depot = %row.depot_name, "oil depot cached");
        Ok(CachedDepot::from(row))
    }
}

/// Paint merchant table; the near query runs in SQL.
#[derive(Clone)]
pub struct PgPaintStore {
    pool: PgPool,
}

impl PgPaintStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaintStore for PgPaintStore {
    async fn all_merchants(&self) -> Result<Vec<DepotRecord>, LocateError> {
        let rows = paint::list_paint_merchants(&self.pool)
            .await
            .map_err(storage)?;
        Ok(rows.into_iter().map(DepotRecord::from).collect())
    }

    async fn merchants_near(
        &self,
        origin: &Coordinate,
        radius: f64,
    ) -> Result<Vec<DepotRecord>, LocateError> {
        let Some((lat, lon)) = origin.to_degrees() else {
            tracing::warn!(lat = %origin.lat, lon = %origin.lon, "unparseable search origin");
            return Ok(Vec::new());
        };
        let rows = paint::list_paint_merchants_near(&self.pool, lat, lon, radius)
            .await
            .map_err(storage)?;
        Ok(rows.into_iter().map(DepotRecord::from).collect())
    }
}
