//! Category search handlers. Every outcome is an HTTP 200 envelope.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use nbdepots_locator::{DepotQuery, Envelope, PaintMode};
use serde::Deserialize;

use super::AppState;

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchParams {
    city: Option<String>,
    action: Option<String>,
}

fn params_or_default(params: Result<Query<SearchParams>, QueryRejection>) -> SearchParams {
    match params {
        Ok(Query(params)) => params,
        Err(e) => {
            tracing::info!(error = %e, "unreadable query string");
            SearchParams::default()
        }
    }
}

pub(super) async fn electronics(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Json<Envelope> {
    let params = params_or_default(params);
    Json(
        state
            .aggregator
            .respond(DepotQuery::Electronics, params.city.as_deref())
            .await,
    )
}

pub(super) async fn oil(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Json<Envelope> {
    let params = params_or_default(params);
    Json(
        state
            .aggregator
            .respond(DepotQuery::Oil, params.city.as_deref())
            .await,
    )
}

pub(super) async fn paint(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Json<Envelope> {
    let params = params_or_default(params);
    let Some(mode) = params.action.as_deref().and_then(PaintMode::from_action) else {
        tracing::info!("paint search without an action");
        return Json(Envelope::failure());
    };
    Json(
        state
            .aggregator
            .respond(DepotQuery::Paint(mode), params.city.as_deref())
            .await,
    )
}
