//! The oil pipeline: scrape, then cache-or-geocode each listing.

use futures::stream::{self, StreamExt};
use nbdepots_core::{Category, Coordinate, DepotRecord, LocateError, RawListing, SearchTerm};

use super::DepotAggregator;
use crate::budget;

/// Derives the geocoding query for a scraped address.
///
/// `", "` separators become spaces and the final two tokens (the postal
/// code) are dropped. Returns `None` when nothing would remain.
#[must_use]
pub fn geocode_query_for_address(address: &str) -> Option<String> {
    let flattened = address.trim().replace(", ", " ");
    let tokens: Vec<&str> = flattened.split_whitespace().collect();
    if tokens.len() <= 2 {
        return None;
    }
    Some(tokens[..tokens.len() - 2].join(" "))
}

impl DepotAggregator {
    /// Listings come back in page order and numbered from 1, however many
    /// are in flight at once. Numbering covers only what the listing source
    /// returned, so items it skipped leave no gap.
    pub(super) async fn oil(&self, term: &SearchTerm) -> Result<Vec<DepotRecord>, LocateError> {
        let listings = budget::upstream(
            self.settings.upstream_timeout,
            "oil listings",
            self.sources.listings.fetch(term.as_str()),
        )
        .await?;

        let records = stream::iter(listings.into_iter().enumerate())
            .map(|(index, listing)| self.oil_listing(index, listing))
            .buffered(self.settings.max_concurrent_geocodes.max(1))
            .collect::<Vec<_>>()
            .await;
        Ok(records)
    }

    /// Never fails: a listing whose lookup, geocode, or insert goes wrong is
    /// still emitted with whatever was resolved.
    async fn oil_listing(&self, index: usize, listing: RawListing) -> DepotRecord {
        let mut record = DepotRecord::new(Category::Oil, listing.name, listing.address);
        record.hours = listing.hours;
        record.products = listing.products;
        record.result_number = u32::try_from(index + 1).ok();

        let identity = record.identity();
        match budget::store(
            self.settings.store_timeout,
            "depot lookup",
            self.sources.depot_cache.find_by_identity(&identity),
        )
        .await
        {
            Ok(Some(cached)) => {
                record.id = Some(cached.id);
                record.coordinate = cached.coordinate;
                return record;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(depot = %record.name, kind = e.kind(), error = %e, "depot lookup failed; treating as uncached");
            }
        }

        record.coordinate = self.geocode_listing(&record).await;

        match budget::store(
            self.settings.store_timeout,
            "depot insert",
            self.sources.depot_cache.insert(&record),
        )
        .await
        {
            Ok(stored) => {
                record.id = Some(stored.id);
                record.coordinate = stored.coordinate;
            }
            Err(e) => {
                tracing::warn!(depot = %record.name, kind = e.kind(), error = %e, "depot insert failed; emitting without id");
            }
        }
        record
    }

    async fn geocode_listing(&self, record: &DepotRecord) -> Option<Coordinate> {
        let query = geocode_query_for_address(&record.address)?;
        match budget::upstream(
            self.settings.upstream_timeout,
            "depot geocode",
            self.sources.geocoder.geocode(&query),
        )
        .await
        {
            Ok(hits) => {
                let first = hits.into_iter().next();
                if first.is_none() {
                    tracing::debug!(depot = %record.name, %query, "no geocode for depot");
                }
                first
            }
            Err(e) => {
                tracing::warn!(depot = %record.name, %query, kind = e.kind(), error = %e, "depot geocode failed");
                None
            }
        }
    }
}
