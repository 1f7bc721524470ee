//! User CRUD routes. Static segments (search, country) are registered
//! alongside the :id parameter; the router prefers the static match.

use crate::handlers::users::{
    by_country, create, delete as delete_handler, list, read, search, update,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list).post(create))
        .route("/users/search", get(search))
        .route("/users/country/:country", get(by_country))
        .route(
            "/users/:id",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
