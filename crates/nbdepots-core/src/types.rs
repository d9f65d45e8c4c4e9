//! Domain types for depot search.

use serde::{Deserialize, Serialize};

use crate::identity::DepotIdentity;

/// Length of the postal-code prefix used as a coarse geographic key.
pub const POSTAL_PREFIX_LEN: usize = 3;

/// A latitude/longitude pair kept as the decimal text the upstream supplied.
///
/// Values are only parsed to `f64` for distance math.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: String,
    pub lon: String,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
        }
    }

    /// Build a coordinate from optional text columns, treating blanks as absent.
    #[must_use]
    pub fn from_parts(lat: Option<String>, lon: Option<String>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) if !lat.trim().is_empty() && !lon.trim().is_empty() => {
                Some(Self::new(lat.trim(), lon.trim()))
            }
            _ => None,
        }
    }

    /// Parse both components as decimal degrees.
    ///
    /// Returns `None` when either component is not a finite number or lies
    /// outside the valid latitude/longitude range.
    #[must_use]
    pub fn to_degrees(&self) -> Option<(f64, f64)> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let lon = self.lon.trim().parse::<f64>().ok()?;
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some((lat, lon))
    }
}

/// Material category a depot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Oil,
    Paint,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Electronics => write!(f, "electronics"),
            Category::Oil => write!(f, "oil"),
            Category::Paint => write!(f, "paint"),
        }
    }
}

/// User-supplied place name or postal code.
///
/// Whether it is a place or a postal code is only decided by whether
/// geocoding succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Accept a raw query value, rejecting empty or whitespace-only input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First three characters, lowercased, for postal-prefix lookups.
    ///
    /// `None` when the term is shorter than a prefix.
    #[must_use]
    pub fn postal_prefix(&self) -> Option<String> {
        let prefix: String = self.0.chars().take(POSTAL_PREFIX_LEN).collect();
        if prefix.chars().count() < POSTAL_PREFIX_LEN {
            return None;
        }
        Some(prefix.to_lowercase())
    }
}

impl std::fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A postal-prefix → coordinate seed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoCacheEntry {
    pub prefix: String,
    pub coordinate: Coordinate,
}

impl GeoCacheEntry {
    /// Prefixes are stored lowercase so lookups can compare directly.
    #[must_use]
    pub fn new(prefix: &str, coordinate: Coordinate) -> Self {
        Self {
            prefix: prefix.trim().to_lowercase(),
            coordinate,
        }
    }
}

/// One listing as scraped from the oil collection-facility page, before any
/// geocoding or caching.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawListing {
    pub name: String,
    pub address: String,
    pub hours: String,
    /// Accepted-product labels in page order.
    pub products: Vec<String>,
}

/// A persisted depot's id and authoritative coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedDepot {
    pub id: i64,
    pub coordinate: Option<Coordinate>,
}

/// A normalized depot as returned to callers, regardless of category.
#[derive(Debug, Clone, PartialEq)]
pub struct DepotRecord {
    /// Id assigned by our own store, when persisted.
    pub id: Option<i64>,
    /// Id assigned by the upstream source (electronics only).
    pub external_id: Option<String>,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub hours: String,
    pub terms: String,
    pub description: String,
    pub products: Vec<String>,
    pub coordinate: Option<Coordinate>,
    pub category: Category,
    /// 1-based display position (oil only).
    pub result_number: Option<u32>,
}

impl DepotRecord {
    #[must_use]
    pub fn new(category: Category, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: None,
            external_id: None,
            name: name.into(),
            address: address.into(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            phone: String::new(),
            hours: String::new(),
            terms: String::new(),
            description: String::new(),
            products: Vec::new(),
            coordinate: None,
            category,
            result_number: None,
        }
    }

    /// Products joined for display, e.g. `"Batteries, Bulbs"`.
    #[must_use]
    pub fn products_display(&self) -> String {
        self.products.join(", ")
    }

    #[must_use]
    pub fn identity(&self) -> DepotIdentity {
        DepotIdentity::new(&self.name, &self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postal_prefix_lowercases_first_three_chars() {
        let term = SearchTerm::parse("E1A 1A1").unwrap();
        assert_eq!(term.postal_prefix().as_deref(), Some("e1a"));
    }

    #[test]
    fn postal_prefix_absent_for_short_terms() {
        let term = SearchTerm::parse("E1").unwrap();
        assert!(term.postal_prefix().is_none());
    }

    #[test]
    fn postal_prefix_counts_characters_not_bytes() {
        let term = SearchTerm::parse("Édm").unwrap();
        assert_eq!(term.postal_prefix().as_deref(), Some("édm"));
    }

    #[test]
    fn search_term_rejects_blank_input() {
        assert!(SearchTerm::parse("   ").is_none());
        assert_eq!(SearchTerm::parse("  Moncton ").unwrap().as_str(), "Moncton");
    }

    #[test]
    fn coordinate_parses_decimal_text() {
        let c = Coordinate::new("46.1", "-64.8");
        assert_eq!(c.to_degrees(), Some((46.1, -64.8)));
    }

    #[test]
    fn coordinate_rejects_garbage_and_out_of_range() {
        assert!(Coordinate::new("", "-64.8").to_degrees().is_none());
        assert!(Coordinate::new("abc", "1").to_degrees().is_none());
        assert!(Coordinate::new("91", "1").to_degrees().is_none());
        assert!(Coordinate::new("NaN", "1").to_degrees().is_none());
    }

    #[test]
    fn coordinate_from_parts_treats_blank_as_missing() {
        assert!(Coordinate::from_parts(Some(String::new()), Some("1".into())).is_none());
        assert!(Coordinate::from_parts(None, None).is_none());
        assert_eq!(
            Coordinate::from_parts(Some(" 45.9 ".into()), Some("-66.6".into())),
            Some(Coordinate::new("45.9", "-66.6"))
        );
    }

    #[test]
    fn geo_cache_entry_lowercases_prefix() {
        let entry = GeoCacheEntry::new(" E1A ", Coordinate::new("46.1", "-64.8"));
        assert_eq!(entry.prefix, "e1a");
    }

    #[test]
    fn products_display_joins_with_comma() {
        let mut record = DepotRecord::new(Category::Oil, "Main Depot", "123 King St");
        record.products = vec!["Batteries".into(), "Bulbs".into()];
        assert_eq!(record.products_display(), "Batteries, Bulbs");
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Electronics).unwrap();
        assert_eq!(json, "\"electronics\"");
        assert_eq!(Category::Paint.to_string(), "paint");
    }
}
