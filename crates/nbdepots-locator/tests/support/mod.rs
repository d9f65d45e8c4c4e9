//! In-process fakes for every port, with call counters.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use nbdepots_core::{
    CachedDepot, Coordinate, DepotCache, DepotIdentity, DepotRecord, ElectronicsSource, GeoCache,
    Geocoder, ListingSource, LocateError, PaintStore, RawListing,
};
use nbdepots_locator::{DepotAggregator, LocatorSettings, Sources};

type GeocodeFn = dyn Fn(&str) -> Result<Vec<Coordinate>, LocateError> + Send + Sync;
type DelayFn = dyn Fn(&str) -> Duration + Send + Sync;

pub struct FakeGeocoder {
    respond: Box<GeocodeFn>,
    delay: Option<Box<DelayFn>>,
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeGeocoder {
    pub fn new(
        respond: impl Fn(&str) -> Result<Vec<Coordinate>, LocateError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            delay: None,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Answers every query with the same coordinate.
    pub fn always(lat: &str, lon: &str) -> Self {
        let coordinate = Coordinate::new(lat, lon);
        Self::new(move |_| Ok(vec![coordinate.clone()]))
    }

    pub fn failing() -> Self {
        Self::new(|_| Err(LocateError::UpstreamUnavailable("HTTP 503".into())))
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        self.with_delays(move |_| delay)
    }

    /// Sleeps for a per-query duration before answering.
    pub fn with_delays(mut self, delay: impl Fn(&str) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, query: &str) -> Result<Vec<Coordinate>, LocateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(query)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.respond)(query)
    }
}

#[derive(Default)]
pub struct FakeGeoCache {
    entries: HashMap<String, Coordinate>,
    fail: bool,
    pub calls: AtomicUsize,
}

impl FakeGeoCache {
    pub fn with(prefix: &str, lat: &str, lon: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(prefix.to_string(), Coordinate::new(lat, lon));
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoCache for FakeGeoCache {
    async fn get(&self, prefix: &str) -> Result<Option<Coordinate>, LocateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LocateError::Storage("connection refused".into()));
        }
        Ok(self.entries.get(prefix).cloned())
    }
}

/// Upserting identity-keyed store, like the Postgres one.
pub struct FakeDepotCache {
    rows: Mutex<HashMap<String, CachedDepot>>,
    next_id: AtomicI64,
    fail_insert_for: Option<String>,
    fail_lookups: bool,
    pub find_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
}

impl Default for FakeDepotCache {
    fn default() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            fail_insert_for: None,
            fail_lookups: false,
            find_calls: AtomicUsize::new(0),
            insert_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeDepotCache {
    /// Inserts of the depot named `name` fail with a storage error.
    pub fn failing_insert_for(name: &str) -> Self {
        Self {
            fail_insert_for: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_lookups() -> Self {
        Self {
            fail_lookups: true,
            ..Self::default()
        }
    }

    pub fn seed(&self, name: &str, address: &str, id: i64, coordinate: Option<Coordinate>) {
        let key = DepotIdentity::new(name, address).key();
        self.rows
            .lock()
            .unwrap()
            .insert(key, CachedDepot { id, coordinate });
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DepotCache for FakeDepotCache {
    async fn find_by_identity(
        &self,
        identity: &DepotIdentity,
    ) -> Result<Option<CachedDepot>, LocateError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups {
            return Err(LocateError::Storage("lookup failed".into()));
        }
        Ok(self.rows.lock().unwrap().get(&identity.key()).cloned())
    }

    async fn insert(&self, record: &DepotRecord) -> Result<CachedDepot, LocateError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert_for.as_deref() == Some(record.name.as_str()) {
            return Err(LocateError::Storage("insert failed".into()));
        }
        let mut rows = self.rows.lock().unwrap();
        let stored = rows.entry(record.identity().key()).or_insert_with(|| CachedDepot {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            coordinate: record.coordinate.clone(),
        });
        Ok(stored.clone())
    }
}

#[derive(Default)]
pub struct FakePaintStore {
    merchants: Vec<DepotRecord>,
    fail: bool,
    pub calls: AtomicUsize,
}

impl FakePaintStore {
    pub fn with(merchants: Vec<DepotRecord>) -> Self {
        Self {
            merchants,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaintStore for FakePaintStore {
    async fn all_merchants(&self) -> Result<Vec<DepotRecord>, LocateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LocateError::Storage("paint table unavailable".into()));
        }
        Ok(self.merchants.clone())
    }
}

#[derive(Default)]
pub struct FakeListings {
    listings: Vec<RawListing>,
    fail: bool,
    pub terms: Mutex<Vec<String>>,
}

impl FakeListings {
    pub fn with(listings: Vec<RawListing>) -> Self {
        Self {
            listings,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ListingSource for FakeListings {
    async fn fetch(&self, term: &str) -> Result<Vec<RawListing>, LocateError> {
        self.terms.lock().unwrap().push(term.to_string());
        if self.fail {
            return Err(LocateError::UpstreamUnavailable("HTTP 500".into()));
        }
        Ok(self.listings.clone())
    }
}

#[derive(Default)]
pub struct FakeElectronics {
    stores: Vec<DepotRecord>,
    fail: bool,
    pub requests: Mutex<Vec<(Coordinate, u32, String)>>,
}

impl FakeElectronics {
    pub fn with(stores: Vec<DepotRecord>) -> Self {
        Self {
            stores,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ElectronicsSource for FakeElectronics {
    async fn search(
        &self,
        origin: &Coordinate,
        radius: u32,
        term: &str,
    ) -> Result<Vec<DepotRecord>, LocateError> {
        self.requests
            .lock()
            .unwrap()
            .push((origin.clone(), radius, term.to_string()));
        if self.fail {
            return Err(LocateError::Parse {
                context: "electronics".into(),
                reason: "expected array".into(),
            });
        }
        Ok(self.stores.clone())
    }
}

/// Every port as a concrete fake so tests can inspect counters afterwards.
pub struct Fakes {
    pub geocoder: Arc<FakeGeocoder>,
    pub geo_cache: Arc<FakeGeoCache>,
    pub depot_cache: Arc<FakeDepotCache>,
    pub paint: Arc<FakePaintStore>,
    pub listings: Arc<FakeListings>,
    pub electronics: Arc<FakeElectronics>,
}

impl Default for Fakes {
    fn default() -> Self {
        Self {
            geocoder: Arc::new(FakeGeocoder::always("46.1", "-64.8")),
            geo_cache: Arc::new(FakeGeoCache::default()),
            depot_cache: Arc::new(FakeDepotCache::default()),
            paint: Arc::new(FakePaintStore::default()),
            listings: Arc::new(FakeListings::default()),
            electronics: Arc::new(FakeElectronics::default()),
        }
    }
}

impl Fakes {
    pub fn sources(&self) -> Sources {
        Sources {
            geocoder: self.geocoder.clone(),
            geo_cache: self.geo_cache.clone(),
            depot_cache: self.depot_cache.clone(),
            paint: self.paint.clone(),
            listings: self.listings.clone(),
            electronics: self.electronics.clone(),
        }
    }

    pub fn aggregator(&self) -> DepotAggregator {
        DepotAggregator::new(self.sources(), LocatorSettings::default())
    }

    pub fn aggregator_with(&self, settings: LocatorSettings) -> DepotAggregator {
        DepotAggregator::new(self.sources(), settings)
    }
}

pub fn listing(label_name: &str, address: &str, products: &[&str]) -> RawListing {
    RawListing {
        name: label_name.to_string(),
        address: address.to_string(),
        hours: "Mon-Fri 8-5".to_string(),
        products: products.iter().map(|p| (*p).to_string()).collect(),
    }
}
