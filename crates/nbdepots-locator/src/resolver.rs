//! Search term to coordinate resolution.

use std::sync::Arc;

use nbdepots_core::{Coordinate, GeoCache, Geocoder, LocateError, SearchTerm};

use crate::budget;
use crate::settings::LocatorSettings;

/// Geocodes a search term, falling back to the postal-prefix cache.
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    geo_cache: Arc<dyn GeoCache>,
    settings: LocatorSettings,
}

impl LocationResolver {
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        geo_cache: Arc<dyn GeoCache>,
        settings: LocatorSettings,
    ) -> Self {
        Self {
            geocoder,
            geo_cache,
            settings,
        }
    }

    /// Resolves `term` to a coordinate.
    ///
    /// The geocoder is asked first with the province and country appended.
    /// If it errors, times out, or finds nothing, the first three characters
    /// of the term are looked up in the postal-prefix cache.
    ///
    /// # Errors
    ///
    /// - [`LocateError::NotFound`] when both sources miss, or the term is too
    ///   short to carry a postal prefix.
    /// - [`LocateError::Storage`] when the geocoder missed and the cache
    ///   lookup itself failed.
    pub async fn resolve(&self, term: &SearchTerm) -> Result<Coordinate, LocateError> {
        let query = self.settings.geocode_query(term.as_str());
        match budget::upstream(
            self.settings.upstream_timeout,
            "geocode",
            self.geocoder.geocode(&query),
        )
        .await
        {
            Ok(hits) => {
                if let Some(first) = hits.into_iter().next() {
                    return Ok(first);
                }
                tracing::debug!(%term, "geocoder found nothing; trying postal prefix");
            }
            Err(e) => {
                tracing::warn!(%term, kind = e.kind(), error = %e, "geocoding failed; trying postal prefix");
            }
        }

        let Some(prefix) = term.postal_prefix() else {
            return Err(LocateError::NotFound(term.to_string()));
        };

        let cached = budget::store(
            self.settings.store_timeout,
            "postal prefix lookup",
            self.geo_cache.get(&prefix),
        )
        .await?;

        match cached {
            Some(coordinate) => {
                tracing::info!(%term, %prefix, lat = %coordinate.lat, lon = %coordinate.lon, "using postal prefix coordinate");
                Ok(coordinate)
            }
            None => Err(LocateError::NotFound(term.to_string())),
        }
    }
}
