//! Recommendation endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{item::Item, recommendation::RecommendationQuery},
};

use super::AuthenticatedUser;

/// Recommend items from the caller's borrowing history
#[utoipa::path(
    get,
    path = "/recommendations",
    tag = "recommendations",
    security(("bearer_auth" = [])),
    params(RecommendationQuery),
    responses(
        (status = 200, description = "Recommended items, possibly empty", body = Vec<Item>)
    )
)]
pub async fn recommend(
    State(state): State<crate::AppState>,
    AuthenticatedUser(borrower): AuthenticatedUser,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let items = state
        .services
        .recommendations
        .recommend(&borrower, query.by)?;
    Ok(Json(items))
}
