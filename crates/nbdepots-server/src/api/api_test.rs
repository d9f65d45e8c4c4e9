use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use nbdepots_core::{
    CachedDepot, Category, Coordinate, DepotCache, DepotIdentity, DepotRecord, ElectronicsSource,
    GeoCache, Geocoder, ListingSource, LocateError, PaintStore, RawListing,
};
use nbdepots_locator::{LocatorSettings, Sources};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use super::*;

#[derive(Default)]
struct CountingGeocoder {
    calls: AtomicUsize,
}

#[async_trait]
impl Geocoder for CountingGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Vec<Coordinate>, LocateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Coordinate::new("46.1", "-64.8")])
    }
}

struct EmptyGeoCache;

#[async_trait]
impl GeoCache for EmptyGeoCache {
    async fn get(&self, _prefix: &str) -> Result<Option<Coordinate>, LocateError> {
        Ok(None)
    }
}

struct FirstSeenDepotCache;

#[async_trait]
impl DepotCache for FirstSeenDepotCache {
    async fn find_by_identity(
        &self,
        _identity: &DepotIdentity,
    ) -> Result<Option<CachedDepot>, LocateError> {
        Ok(None)
    }

    async fn insert(&self, record: &DepotRecord) -> Result<CachedDepot, LocateError> {
        Ok(CachedDepot {
            id: 9,
            coordinate: record.coordinate.clone(),
        })
    }
}

struct TwoMerchants;

#[async_trait]
impl PaintStore for TwoMerchants {
    async fn all_merchants(&self) -> Result<Vec<DepotRecord>, LocateError> {
        let mut a = DepotRecord::new(Category::Paint, "Kent", "1 Main St");
        a.coordinate = Some(Coordinate::new("46.1", "-64.8"));
        let mut b = DepotRecord::new(Category::Paint, "Home Hardware", "9 Far Rd");
        b.coordinate = Some(Coordinate::new("47.5", "-64.8"));
        Ok(vec![a, b])
    }
}

struct OneListing;

#[async_trait]
impl ListingSource for OneListing {
    async fn fetch(&self, _term: &str) -> Result<Vec<RawListing>, LocateError> {
        Ok(vec![RawListing {
            name: "Main Depot".into(),
            address: "123 King St Moncton NB E1A 1A1".into(),
            hours: "Mon-Fri 8-5".into(),
            products: vec!["Batteries".into(), "Bulbs".into()],
        }])
    }
}

struct NoElectronics;

#[async_trait]
impl ElectronicsSource for NoElectronics {
    async fn search(
        &self,
        _origin: &Coordinate,
        _radius: u32,
        _term: &str,
    ) -> Result<Vec<DepotRecord>, LocateError> {
        Ok(Vec::new())
    }
}

struct Harness {
    app: Router,
    geocoder: Arc<CountingGeocoder>,
}

fn harness() -> Harness {
    let geocoder = Arc::new(CountingGeocoder::default());
    let sources = Sources {
        geocoder: geocoder.clone(),
        geo_cache: Arc::new(EmptyGeoCache),
        depot_cache: Arc::new(FirstSeenDepotCache),
        paint: Arc::new(TwoMerchants),
        listings: Arc::new(OneListing),
        electronics: Arc::new(NoElectronics),
    };
    // Nothing listens on port 1; the health check must fail fast.
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://nbdepots@127.0.0.1:1/nbdepots")
        .expect("lazy pool");
    let state = AppState {
        aggregator: Arc::new(DepotAggregator::new(sources, LocatorSettings::default())),
        pool,
        places: Arc::new(serde_json::json!([{"label": "Moncton", "value": "Moncton"}])),
    };
    Harness {
        app: build_app(state),
        geocoder,
    }
}

async fn fetch_json(
    app: Router,
    uri: &str,
) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, headers, json)
}

#[tokio::test]
async fn oil_route_returns_numbered_envelope() {
    for uri in ["/api/oil?city=Moncton", "/oil?city=Moncton"] {
        let (status, _, json) = fetch_json(harness().app, uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
        assert_eq!(json["lat"], "46.1");
        assert_eq!(json["lon"], "-64.8");
        let depot = &json["locations"][0];
        assert_eq!(depot["store"], "Main Depot");
        assert_eq!(depot["products"], "Batteries, Bulbs");
        assert_eq!(depot["resultNumber"], 1);
        assert_eq!(depot["myID"], 9);
    }
}

#[tokio::test]
async fn missing_city_is_not_ok_with_http_200() {
    let h = harness();
    let (status, _, json) = fetch_json(h.app, "/api/electronics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({"ok": false, "lat": "", "lon": "", "locations": []})
    );
    assert_eq!(h.geocoder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn duplicate_query_keys_collapse_to_failure() {
    let (status, _, json) = fetch_json(harness().app, "/api/oil?city=a&city=b").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], false);
}

#[tokio::test]
async fn paint_without_action_is_not_ok() {
    let h = harness();
    let (_, _, json) = fetch_json(h.app, "/paint?city=Moncton").await;

    assert_eq!(json["ok"], false);
    assert_eq!(h.geocoder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn paint_all_and_near_modes() {
    let (_, _, all) = fetch_json(harness().app, "/api/paint?city=Moncton&action=all").await;
    assert_eq!(all["ok"], true);
    assert_eq!(all["locations"].as_array().map(Vec::len), Some(2));

    let (_, _, near) = fetch_json(harness().app, "/api/paint?city=Moncton&action=near").await;
    assert_eq!(near["ok"], true);
    let names: Vec<&str> = near["locations"]
        .as_array()
        .expect("locations array")
        .iter()
        .filter_map(|d| d["store"].as_str())
        .collect();
    assert_eq!(names, vec!["Kent"]);
}

#[tokio::test]
async fn request_id_is_generated_or_echoed() {
    let (_, headers, _) = fetch_json(harness().app, "/api/electronics?city=Moncton").await;
    assert!(headers.get("x-request-id").is_some());

    let response = harness()
        .app
        .oneshot(
            Request::builder()
                .uri("/api/electronics?city=Moncton")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(
        response.headers().get("x-request-id").map(|v| v.as_bytes()),
        Some(&b"abc-123"[..])
    );
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let response = harness()
        .app
        .oneshot(
            Request::builder()
                .uri("/api/oil?city=Moncton")
                .header("origin", "https://map.example")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.as_bytes()),
        Some(&b"*"[..])
    );
}

#[tokio::test]
async fn places_route_serves_loaded_list() {
    let (status, _, json) = fetch_json(harness().app, "/find-location/places").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["label"], "Moncton");
}

#[tokio::test]
async fn health_reports_unreachable_database() {
    let (status, _, json) = fetch_json(harness().app, "/api/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["data"]["status"], "degraded");
    assert_eq!(json["data"]["database"], "unavailable");
    assert!(json["meta"]["request_id"].is_string());
}
