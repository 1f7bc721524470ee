//! user-api: a users CRUD REST service backed by SQLite.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::ApiError;
pub use model::{DeletedUser, NewUser, User, UserPatch, UserStats};
pub use pagination::{Page, PageMeta};
pub use routes::{app, common_routes, stats_routes, user_routes};
pub use service::UserService;
pub use state::AppState;
pub use store::Store;
