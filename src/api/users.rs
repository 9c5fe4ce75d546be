//! Registration and login endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::user::{Credentials, Token},
};

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = Credentials,
    responses(
        (status = 201, description = "User registered", body = Token),
        (status = 400, description = "Invalid credentials format"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<(StatusCode, Json<Token>)> {
    let token = state.services.users.register(credentials)?;
    Ok((StatusCode::CREATED, Json(token)))
}

/// Log in and obtain a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "users",
    request_body = Credentials,
    responses(
        (status = 200, description = "Authenticated", body = Token),
        (status = 401, description = "Authentication failed")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Json<Token>> {
    let token = state.services.users.login(credentials)?;
    Ok(Json(token))
}
