//! Routers: common routes at the root, user and stats APIs under /api.

mod common;
mod stats;
mod users;

pub use common::common_routes;
pub use stats::stats_routes;
pub use users::user_routes;

use crate::state::AppState;
use axum::Router;

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", user_routes(state.clone()).merge(stats_routes(state)))
}
