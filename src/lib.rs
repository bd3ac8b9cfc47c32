//! Loanbook server library
//!
//! Exports the core modules for the loan tracking API and the router
//! used by both the binary and the integration tests.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod loan;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Build the application router with all routes and middleware attached
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(routes::loan_routes())
        .merge(routes::dashboard_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_tracing))
}

async fn root() -> &'static str {
    "Loanbook API Server"
}

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: String,
    database: String,
    version: String,
}

/// Health check endpoint
async fn health_check(
    axum::extract::State(pool): axum::extract::State<sqlx::PgPool>,
) -> axum::Json<HealthResponse> {
    let db_status = match db::check_health(&pool).await {
        Ok(_) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    let status = if db_status == "connected" {
        "healthy"
    } else {
        "unhealthy"
    };

    axum::Json(HealthResponse {
        status: status.to_string(),
        database: db_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
