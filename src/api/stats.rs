//! Statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    /// Catalog entries
    pub items: usize,
    pub copies_total: u64,
    pub copies_available: u64,
    pub active_loans: usize,
    pub overdue_loans: usize,
}

/// Catalog and loan counters
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Current counters", body = StatsResponse)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.get_stats()?;
    Ok(Json(stats))
}
