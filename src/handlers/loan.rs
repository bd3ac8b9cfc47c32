use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::loan::{
    ListLoansQuery, Loan, LoanInput, LoanService, LoanSummary, PaginatedLoans,
};
use crate::models::ApiResponse;

pub async fn list_loans(
    State(service): State<Arc<LoanService>>,
    Query(query): Query<ListLoansQuery>,
) -> Result<Json<ApiResponse<PaginatedLoans>>, ApiError> {
    let page = service.list_loans(query).await?;

    Ok(Json(ApiResponse::ok(page)))
}

pub async fn get_loan(
    State(service): State<Arc<LoanService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Loan>>, ApiError> {
    let loan = service.get_loan(id).await?;

    Ok(Json(ApiResponse::ok(loan)))
}

/// Computed amortization figures for a single loan
pub async fn get_loan_summary(
    State(service): State<Arc<LoanService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LoanSummary>>, ApiError> {
    let loan = service.get_loan(id).await?;
    let summary = LoanSummary::for_loan(&loan);

    Ok(Json(ApiResponse::ok(summary)))
}

pub async fn create_loan(
    State(service): State<Arc<LoanService>>,
    Json(input): Json<LoanInput>,
) -> Result<Json<ApiResponse<Loan>>, ApiError> {
    let loan = service.create_loan(input).await?;

    Ok(Json(ApiResponse::ok(loan)))
}

pub async fn update_loan(
    State(service): State<Arc<LoanService>>,
    Path(id): Path<Uuid>,
    Json(input): Json<LoanInput>,
) -> Result<Json<ApiResponse<Loan>>, ApiError> {
    let loan = service.update_loan(id, input).await?;

    Ok(Json(ApiResponse::ok(loan)))
}

pub async fn delete_loan(
    State(service): State<Arc<LoanService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    service.delete_loan(id).await?;

    Ok(Json(ApiResponse::ok(json!({ "id": id }))))
}
