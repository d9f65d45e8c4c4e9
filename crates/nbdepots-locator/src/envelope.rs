//! The uniform JSON response wrapper.

use nbdepots_core::{Coordinate, DepotRecord};
use serde::{Deserialize, Serialize};

/// `{ok, lat, lon, locations}` as consumed by the map front end.
///
/// A failure of any kind is `ok: false` with empty fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub ok: bool,
    pub lat: String,
    pub lon: String,
    pub locations: Vec<DepotJson>,
}

impl Envelope {
    #[must_use]
    pub fn success(origin: &Coordinate, depots: &[DepotRecord]) -> Self {
        Self {
            ok: true,
            lat: origin.lat.clone(),
            lon: origin.lon.clone(),
            locations: depots.iter().map(DepotJson::from).collect(),
        }
    }

    #[must_use]
    pub fn failure() -> Self {
        Self {
            ok: false,
            lat: String::new(),
            lon: String::new(),
            locations: Vec::new(),
        }
    }
}

/// One depot in the front end's field naming.
///
/// `id` is the upstream identifier, `myID` our persisted id (0 when there is
/// none). Unknown coordinates are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepotJson {
    pub id: String,
    #[serde(rename = "myID")]
    pub my_id: i64,
    pub store: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub lat: String,
    pub lng: String,
    pub phone: String,
    pub hours: String,
    pub products: String,
    pub terms: String,
    pub description: String,
    #[serde(rename = "resultNumber")]
    pub result_number: u32,
}

impl From<&DepotRecord> for DepotJson {
    fn from(record: &DepotRecord) -> Self {
        let (lat, lng) = record
            .coordinate
            .as_ref()
            .map(|c| (c.lat.clone(), c.lon.clone()))
            .unwrap_or_default();
        Self {
            id: record.external_id.clone().unwrap_or_default(),
            my_id: record.id.unwrap_or(0),
            store: record.name.clone(),
            address: record.address.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            zip: record.zip.clone(),
            lat,
            lng,
            phone: record.phone.clone(),
            hours: record.hours.clone(),
            products: record.products_display(),
            terms: record.terms.clone(),
            description: record.description.clone(),
            result_number: record.result_number.unwrap_or(0),
        }
    }
}
