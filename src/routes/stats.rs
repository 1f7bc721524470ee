//! Statistics routes.

use crate::handlers::stats::{countries, overview, recent};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn stats_routes(state: AppState) -> Router {
    Router::new()
        .route("/stats", get(overview))
        .route("/stats/countries", get(countries))
        .route("/stats/recent", get(recent))
        .with_state(state)
}
