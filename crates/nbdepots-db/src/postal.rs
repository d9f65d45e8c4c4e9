//! Database operations for the `postal_prefixes` table.

use nbdepots_core::{Coordinate, GeoCacheEntry};
use sqlx::PgPool;

/// Look up the coordinate stored for a three-character postal prefix.
///
/// Matching is case-insensitive on both sides.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_postal_coordinate(
    pool: &PgPool,
    prefix: &str,
) -> Result<Option<Coordinate>, sqlx::Error> {
    let row = sqlx::query_as::<_, (String, String)>(
        "SELECT lat, lon FROM postal_prefixes WHERE lower(prefix) = lower($1) LIMIT 1",
    )
    .bind(prefix)
    .fetch_optional(pool)
    .await?;

    Ok(row.and_then(|(lat, lon)| Coordinate::from_parts(Some(lat), Some(lon))))
}

/// Insert or replace a postal-prefix seed row.
///
/// The core only reads this table; this exists for seeding and tests.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn upsert_postal_prefix(pool: &PgPool, entry: &GeoCacheEntry) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO postal_prefixes (prefix, lat, lon) VALUES ($1, $2, $3) \
         ON CONFLICT (prefix) DO UPDATE SET lat = EXCLUDED.lat, lon = EXCLUDED.lon",
    )
    .bind(&entry.prefix)
    .bind(&entry.coordinate.lat)
    .bind(&entry.coordinate.lon)
    .execute(pool)
    .await?;
    Ok(())
}
