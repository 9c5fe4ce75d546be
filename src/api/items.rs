//! Item (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::item::{Item, ItemPayload, ItemQuery},
};

use super::AuthenticatedUser;

/// List items matching optional filters; an empty match is an empty list
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(ItemQuery),
    responses(
        (status = 200, description = "List of items", body = Vec<Item>)
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<Vec<Item>>> {
    match state.services.catalog.search_items(&query) {
        Ok(items) => Ok(Json(items)),
        Err(AppError::NoResults(_)) => Ok(Json(Vec::new())),
        Err(e) => Err(e),
    }
}

/// Search items; an empty match is reported as an error
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(ItemQuery),
    responses(
        (status = 200, description = "Matching items", body = Vec<Item>),
        (status = 404, description = "No items match")
    )
)]
pub async fn search_items(
    State(state): State<crate::AppState>,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let items = state.services.catalog.search_items(&query)?;
    Ok(Json(items))
}

/// Get item details by key
#[utoipa::path(
    get,
    path = "/items/{key}",
    tag = "items",
    params(
        ("key" = String, Path, description = "Catalog key")
    ),
    responses(
        (status = 200, description = "Item details", body = Item),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<Item>> {
    let item = state.services.catalog.get_item(&key)?;
    Ok(Json(item))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    security(("bearer_auth" = [])),
    request_body = ItemPayload,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Item already exists")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Json(payload): Json<ItemPayload>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let created = state.services.catalog.create_item(payload)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing item
#[utoipa::path(
    put,
    path = "/items/{key}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("key" = String, Path, description = "Catalog key")
    ),
    request_body = ItemPayload,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(key): Path<String>,
    Json(payload): Json<ItemPayload>,
) -> AppResult<Json<Item>> {
    let updated = state.services.catalog.update_item(&key, payload)?;
    Ok(Json(updated))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{key}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("key" = String, Path, description = "Catalog key")
    ),
    responses(
        (status = 200, description = "Deleted item", body = Item),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Item still on loan")
    )
)]
pub async fn delete_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(key): Path<String>,
) -> AppResult<Json<Item>> {
    let deleted = state.services.catalog.delete_item(&key)?;
    Ok(Json(deleted))
}
