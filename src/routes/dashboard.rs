//! Dashboard route definitions

use axum::Router;

use crate::handlers::get_dashboard_stats;
use crate::state::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route(
        "/api/dashboard/stats",
        axum::routing::get(get_dashboard_stats),
    )
}
