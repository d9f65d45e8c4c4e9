//! Per-category depot pipelines sharing one output shape.

mod oil;

use std::sync::Arc;

use nbdepots_core::{
    Category, Coordinate, DepotCache, DepotRecord, ElectronicsSource, GeoCache, Geocoder,
    ListingSource, LocateError, PaintStore, SearchTerm,
};

use crate::budget;
use crate::envelope::Envelope;
use crate::resolver::LocationResolver;
use crate::settings::LocatorSettings;

pub use oil::geocode_query_for_address;

/// The collaborators the aggregator is wired with.
#[derive(Clone)]
pub struct Sources {
    pub geocoder: Arc<dyn Geocoder>,
    pub geo_cache: Arc<dyn GeoCache>,
    pub depot_cache: Arc<dyn DepotCache>,
    pub paint: Arc<dyn PaintStore>,
    pub listings: Arc<dyn ListingSource>,
    pub electronics: Arc<dyn ElectronicsSource>,
}

/// How paint merchants are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    /// Every merchant in the province.
    All,
    /// Merchants within the configured radius, nearest first.
    Near,
}

impl PaintMode {
    /// `"all"` selects every merchant; any other non-blank action means near.
    #[must_use]
    pub fn from_action(action: &str) -> Option<Self> {
        match action.trim() {
            "" => None,
            "all" => Some(Self::All),
            _ => Some(Self::Near),
        }
    }
}

/// A category search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepotQuery {
    Electronics,
    Oil,
    Paint(PaintMode),
}

impl DepotQuery {
    #[must_use]
    pub fn category(self) -> Category {
        match self {
            Self::Electronics => Category::Electronics,
            Self::Oil => Category::Oil,
            Self::Paint(_) => Category::Paint,
        }
    }
}

/// The resolved search origin and the depots found around it.
#[derive(Debug, Clone, PartialEq)]
pub struct DepotSearch {
    pub origin: Coordinate,
    pub depots: Vec<DepotRecord>,
}

pub struct DepotAggregator {
    resolver: LocationResolver,
    sources: Sources,
    settings: LocatorSettings,
}

impl DepotAggregator {
    #[must_use]
    pub fn new(sources: Sources, settings: LocatorSettings) -> Self {
        let resolver = LocationResolver::new(
            Arc::clone(&sources.geocoder),
            Arc::clone(&sources.geo_cache),
            settings.clone(),
        );
        Self {
            resolver,
            sources,
            settings,
        }
    }

    /// Resolves `term` and runs the pipeline for `query`.
    ///
    /// # Errors
    ///
    /// Any [`LocateError`] from resolution or from the category's source.
    /// Per-listing failures inside the oil pipeline are not errors.
    pub async fn search(
        &self,
        query: DepotQuery,
        term: &SearchTerm,
    ) -> Result<DepotSearch, LocateError> {
        let origin = self.resolver.resolve(term).await?;
        let depots = match query {
            DepotQuery::Electronics => self.electronics(&origin, term).await?,
            DepotQuery::Oil => self.oil(term).await?,
            DepotQuery::Paint(mode) => self.paint(&origin, mode).await?,
        };
        Ok(DepotSearch { origin, depots })
    }

    /// Runs a search and collapses the outcome into the response envelope.
    ///
    /// A missing or blank term fails without touching any collaborator.
    pub async fn respond(&self, query: DepotQuery, raw_term: Option<&str>) -> Envelope {
        let category = query.category();
        let Some(term) = raw_term.and_then(SearchTerm::parse) else {
            tracing::info!(%category, "search without a term");
            return Envelope::failure();
        };

        match self.search(query, &term).await {
            Ok(found) => {
                tracing::info!(%category, %term, results = found.depots.len(), "depot search complete");
                Envelope::success(&found.origin, &found.depots)
            }
            Err(e) => {
                tracing::warn!(%category, %term, kind = e.kind(), error = %e, "depot search failed");
                Envelope::failure()
            }
        }
    }

    async fn electronics(
        &self,
        origin: &Coordinate,
        term: &SearchTerm,
    ) -> Result<Vec<DepotRecord>, LocateError> {
        budget::upstream(
            self.settings.upstream_timeout,
            "electronics search",
            self.sources
                .electronics
                .search(origin, self.settings.electronics_radius, term.as_str()),
        )
        .await
    }

    async fn paint(
        &self,
        origin: &Coordinate,
        mode: PaintMode,
    ) -> Result<Vec<DepotRecord>, LocateError> {
        match mode {
            PaintMode::All => {
                budget::store(
                    self.settings.store_timeout,
                    "paint merchants",
                    self.sources.paint.all_merchants(),
                )
                .await
            }
            PaintMode::Near => {
                budget::store(
                    self.settings.store_timeout,
                    "paint merchants near",
                    self.sources
                        .paint
                        .merchants_near(origin, self.settings.paint_radius_miles),
                )
                .await
            }
        }
    }
}
