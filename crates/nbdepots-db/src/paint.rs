//! Database operations for the `paint_merchants` table.

use nbdepots_core::{Category, Coordinate, DepotIdentity, DepotRecord, EARTH_RADIUS_MILES};
use sqlx::PgPool;

/// Decimal-degree text accepted by the distance query; anything else is
/// skipped rather than failing the cast.
const DECIMAL_PATTERN: &str = r"^\s*-?[0-9]+(\.[0-9]+)?\s*$";

/// A row from the `paint_merchants` table as read back for display.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaintMerchantRow {
    pub id: i64,
    pub store: String,
    pub lat: String,
    pub lon: String,
    pub address_line_1: String,
    pub city: String,
    pub province: String,
    pub phone: String,
    pub hours: String,
    pub products: String,
}

impl From<PaintMerchantRow> for DepotRecord {
    fn from(row: PaintMerchantRow) -> Self {
        let mut record = DepotRecord::new(Category::Paint, row.store, row.address_line_1);
        // The front end reads a paint merchant's id from `id`, not `myID`.
        record.id = Some(row.id);
        record.external_id = Some(row.id.to_string());
        record.city = row.city;
        record.state = row.province;
        record.phone = row.phone;
        record.hours = row.hours;
        record.products = row
            .products
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        record.coordinate = Coordinate::from_parts(Some(row.lat), Some(row.lon));
        record
    }
}

/// Input record for seeding a paint merchant.
#[derive(Debug, Clone, Default)]
pub struct NewPaintMerchant {
    pub store: String,
    pub lat: String,
    pub lon: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub province: String,
    pub phone: String,
    pub hours: String,
    pub products: Vec<String>,
}

/// List every paint merchant in storage order.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_paint_merchants(pool: &PgPool) -> Result<Vec<PaintMerchantRow>, sqlx::Error> {
    sqlx::query_as::<_, PaintMerchantRow>(
        "SELECT id, store, lat, lon, address_line_1, city, province, \
                phone, hours, products \
         FROM paint_merchants \
         ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
}

/// List merchants strictly within `radius_miles` of `(lat, lon)`, nearest
/// first.
///
/// Distance uses the spherical law of cosines with a 3959-mile Earth radius,
/// the same formula as [`nbdepots_core::rank`]. Ties fall back to storage
/// order. Rows whose coordinate text is not a plain decimal are skipped.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_paint_merchants_near(
    pool: &PgPool,
    lat: f64,
    lon: f64,
    radius_miles: f64,
) -> Result<Vec<PaintMerchantRow>, sqlx::Error> {
    sqlx::query_as::<_, PaintMerchantRow>(
        "SELECT id, store, lat, lon, address_line_1, city, province, \
                phone, hours, products \
         FROM ( \
             SELECT pm.*, \
                    CASE WHEN pm.lat ~ $5 AND pm.lon ~ $5 THEN \
                        $4 * acos(LEAST(1.0, GREATEST(-1.0, \
                            cos(radians($1)) * cos(radians(trim(pm.lat)::float8)) \
                              * cos(radians(trim(pm.lon)::float8) - radians($2)) \
                            + sin(radians($1)) * sin(radians(trim(pm.lat)::float8)) \
                        ))) \
                    END AS distance \
             FROM paint_merchants pm \
         ) ranked \
         WHERE distance < $3 \
         ORDER BY distance ASC, id ASC",
    )
    .bind(lat)
    .bind(lon)
    .bind(radius_miles)
    .bind(EARTH_RADIUS_MILES)
    .bind(DECIMAL_PATTERN)
    .fetch_all(pool)
    .await
}

/// Insert a paint merchant, or return the id of the one already stored under
/// the same `(store, address_line_1)` identity.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn upsert_paint_merchant(
    pool: &PgPool,
    merchant: &NewPaintMerchant,
) -> Result<i64, sqlx::Error> {
    let identity = DepotIdentity::new(&merchant.store, &merchant.address_line_1);

    sqlx::query_scalar::<_, i64>(
        "INSERT INTO paint_merchants \
             (identity_key, store, lat, lon, address_line_1, address_line_2, \
              city, province, phone, hours, products) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         ON CONFLICT (identity_key) DO UPDATE SET \
             identity_key = EXCLUDED.identity_key \
         RETURNING id",
    )
    .bind(identity.key())
    .bind(merchant.store.trim())
    .bind(merchant.lat.trim())
    .bind(merchant.lon.trim())
    .bind(merchant.address_line_1.trim())
    .bind(merchant.address_line_2.trim())
    .bind(merchant.city.trim())
    .bind(merchant.province.trim())
    .bind(merchant.phone.trim())
    .bind(merchant.hours.trim())
    .bind(merchant.products.join(", "))
    .fetch_one(pool)
    .await
}
