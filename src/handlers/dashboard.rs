use std::sync::Arc;

use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::loan::{DashboardStats, LoanService};
use crate::models::ApiResponse;

pub async fn get_dashboard_stats(
    State(service): State<Arc<LoanService>>,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = service.dashboard_stats().await?;

    Ok(Json(ApiResponse::ok(stats)))
}
