//! Loan endpoints, always acting for the authenticated borrower

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::loan::{Loan, LoanDetails, LoanRecord},
};

use super::AuthenticatedUser;

/// Return response with the closed loan
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    pub loan: Loan,
}

/// Borrow an item
#[utoipa::path(
    post,
    path = "/loans/{key}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("key" = String, Path, description = "Catalog key")
    ),
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Out of stock or already borrowed"),
        (status = 422, description = "Borrow limit exceeded")
    )
)]
pub async fn borrow(
    State(state): State<crate::AppState>,
    AuthenticatedUser(borrower): AuthenticatedUser,
    Path(key): Path<String>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let loan = state.services.loans.borrow(&borrower, &key)?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Return a borrowed item
#[utoipa::path(
    post,
    path = "/loans/{key}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("key" = String, Path, description = "Catalog key")
    ),
    responses(
        (status = 200, description = "Item returned", body = ReturnResponse),
        (status = 404, description = "No active loan"),
        (status = 422, description = "Loan is overdue")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(borrower): AuthenticatedUser,
    Path(key): Path<String>,
) -> AppResult<Json<ReturnResponse>> {
    let loan = state.services.loans.return_loan(&borrower, &key)?;

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        loan,
    }))
}

/// Active loans of the caller, oldest first
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active loans", body = Vec<LoanDetails>)
    )
)]
pub async fn my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(borrower): AuthenticatedUser,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.active_loans_of(&borrower)?;
    Ok(Json(loans))
}

/// Completed loans of the caller
#[utoipa::path(
    get,
    path = "/loans/history",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Completed loans", body = Vec<LoanRecord>)
    )
)]
pub async fn my_history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(borrower): AuthenticatedUser,
) -> AppResult<Json<Vec<LoanRecord>>> {
    let history = state.services.loans.history_of(&borrower)?;
    Ok(Json(history))
}

/// All overdue loans
#[utoipa::path(
    get,
    path = "/loans/overdue",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Overdue loans", body = Vec<LoanDetails>)
    )
)]
pub async fn overdue_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.overdue_loans()?;
    Ok(Json(loans))
}
