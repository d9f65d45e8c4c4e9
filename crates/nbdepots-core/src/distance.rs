//! Great-circle distance filtering and ordering.

use crate::types::{Coordinate, DepotRecord};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance between two `(lat, lon)` points in degrees, using
/// the spherical law of cosines. The result is in the unit of `earth_radius`.
#[must_use]
pub fn distance_between(a: (f64, f64), b: (f64, f64), earth_radius: f64) -> f64 {
    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());
    let cos_angle = lat1.cos() * lat2.cos() * (lon2 - lon1).cos() + lat1.sin() * lat2.sin();
    // Rounding can push the cosine a hair past ±1 for identical points.
    earth_radius * cos_angle.clamp(-1.0, 1.0).acos()
}

/// Keep candidates strictly closer than `radius` miles to `origin`, nearest
/// first.
///
/// The sort is stable, so equidistant records keep their input order.
/// Records whose coordinate is missing or unparseable are dropped, as is
/// everything when `origin` itself cannot be parsed.
#[must_use]
pub fn rank<I>(origin: &Coordinate, candidates: I, radius: f64) -> Vec<DepotRecord>
where
    I: IntoIterator<Item = DepotRecord>,
{
    let Some(origin) = origin.to_degrees() else {
        return Vec::new();
    };

    let mut measured: Vec<(f64, DepotRecord)> = candidates
        .into_iter()
        .filter_map(|record| {
            let point = record.coordinate.as_ref()?.to_degrees()?;
            let distance = distance_between(origin, point, EARTH_RADIUS_MILES);
            (distance < radius).then_some((distance, record))
        })
        .collect();

    measured.sort_by(|a, b| a.0.total_cmp(&b.0));
    measured.into_iter().map(|(_, record)| record).collect()
}
