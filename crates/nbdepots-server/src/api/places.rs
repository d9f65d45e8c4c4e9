use std::path::Path;

use axum::{extract::State, Json};

use super::AppState;

/// Reads the place list once at startup.
///
/// A missing or malformed file is logged and served as an empty list.
pub fn load_places(path: &Path) -> serde_json::Value {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|raw| serde_json::from_str(&raw).map_err(|e| e.to_string()));

    match parsed {
        Ok(places) => places,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "place list unavailable; serving empty list");
            serde_json::Value::Array(Vec::new())
        }
    }
}

pub(super) async fn places(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.places.as_ref().clone())
}
