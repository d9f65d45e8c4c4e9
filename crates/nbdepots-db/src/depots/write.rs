//! Write operations for the `oil_depots` table.

use nbdepots_core::DepotRecord;
use sqlx::PgPool;

use super::types::OilDepotRow;

/// Insert a scraped depot, or return the row already stored under the same
/// identity.
///
/// `ON CONFLICT … DO UPDATE` with a no-op assignment makes `RETURNING` yield
/// the existing row, so two requests racing on a first-seen depot end up with
/// the same id. Existing coordinates are never overwritten.
///
/// A missing coordinate is stored as `NULL` so a later lookup can tell
/// "cached without a geocode" apart from a real value.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn insert_oil_depot(
    pool: &PgPool,
    record: &DepotRecord,
) -> Result<OilDepotRow, sqlx::Error> {
    let identity = record.identity();
    let (lat, lon) = match &record.coordinate {
        Some(c) => (Some(c.lat.as_str()), Some(c.lon.as_str())),
        None => (None, None),
    };

    sqlx::query_as::<_, OilDepotRow>(
        "INSERT INTO oil_depots \
             (identity_key, depot_name, physical_address, hours, products, \
              terms, description, lat, lon) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         ON CONFLICT (identity_key) DO UPDATE SET \
             identity_key = EXCLUDED.identity_key \
         RETURNING id, identity_key, depot_name, physical_address, hours, products, \
                   lat, lon, created_at",
    )
    .bind(identity.key())
    .bind(record.name.trim())
    .bind(record.address.trim())
    .bind(record.hours.trim())
    .bind(record.products_display())
    .bind(&record.terms)
    .bind(&record.description)
    .bind(lat)
    .bind(lon)
    .fetch_one(pool)
    .await
}
