//! Read operations for the `oil_depots` table.

use nbdepots_core::DepotIdentity;
use sqlx::PgPool;

use super::types::OilDepotRow;

/// Find a cached depot by its normalized `(name, address)` identity.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn find_oil_depot(
    pool: &PgPool,
    identity: &DepotIdentity,
) -> Result<Option<OilDepotRow>, sqlx::Error> {
    sqlx::query_as::<_, OilDepotRow>(
        "SELECT id, identity_key, depot_name, physical_address, hours, products, \
                lat, lon, created_at \
         FROM oil_depots \
         WHERE identity_key = $1 \
         LIMIT 1",
    )
    .bind(identity.key())
    .fetch_optional(pool)
    .await
}
