//! API handlers for the lending REST endpoints

pub mod health;
pub mod items;
pub mod loans;
pub mod openapi;
pub mod recommendations;
pub mod stats;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Extractor for the authenticated borrower id (token subject)
pub struct AuthenticatedUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = state.services.users.verify_token(token)?;
        Ok(AuthenticatedUser(claims.sub))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Users
        .route("/users", post(users::register))
        .route("/login", post(users::login))
        // Items (catalog)
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/search", get(items::search_items))
        .route(
            "/items/:key",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        // Loans
        .route("/loans", get(loans::my_loans))
        .route("/loans/history", get(loans::my_history))
        .route("/loans/overdue", get(loans::overdue_loans))
        .route("/loans/:key", post(loans::borrow))
        .route("/loans/:key/return", post(loans::return_loan))
        // Recommendations
        .route("/recommendations", get(recommendations::recommend))
        // Statistics
        .route("/stats", get(stats::get_stats))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
