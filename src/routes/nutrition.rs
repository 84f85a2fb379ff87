use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::{nutrition::ResolutionResult, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub food: String,
    pub quantity_g: f64,
}

/// GET /nutrition/resolve?food=apple&quantity_g=150
#[instrument(skip(state))]
pub async fn resolve_route(
    State(state): State<AppState>,
    Query(q): Query<ResolveQuery>,
) -> Result<Json<ResolutionResult>, (axum::http::StatusCode, String)> {
    let result = state
        .resolver
        .resolve(&q.food, q.quantity_g)
        .await
        .map_err(|e| {
            warn!(error = %e, "rejected resolve request");
            (axum::http::StatusCode::BAD_REQUEST, e.to_string())
        })?;
    Ok(Json(result))
}
