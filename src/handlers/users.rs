//! User CRUD handlers: list, search, by-country, read, create, update, delete.

use crate::error::ApiError;
use crate::model::{NewUser, UserPatch};
use crate::pagination::Page;
use crate::response;
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::validation("Valid user ID is required"))
}

/// Lenient page/limit parsing: unparsable values fall back to defaults.
fn page_from(params: &HashMap<String, String>) -> Page {
    Page::clamp(
        params.get("page").and_then(|v| v.parse().ok()),
        params.get("limit").and_then(|v| v.parse().ok()),
    )
}

fn body_to<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body)
        .map_err(|_| ApiError::validation("Request body must be a JSON object"))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let page = page_from(&params);
    let (users, meta) = UserService::find_all(&state.store, page).await?;
    Ok(response::page("Users retrieved successfully", users, meta))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(term) = params.get("q") else {
        return Err(ApiError::validation("Search query is required"));
    };
    let page = page_from(&params);
    let (users, meta) = UserService::search(&state.store, term, page).await?;
    Ok(response::page("Search results retrieved successfully", users, meta))
}

pub async fn by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let page = page_from(&params);
    let (users, meta) = UserService::find_by_country(&state.store, &country, page).await?;
    Ok(response::page("Users retrieved successfully", users, meta))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let user = UserService::find_by_id(&state.store, id).await?;
    Ok(response::ok("User retrieved successfully", user))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input: NewUser = body_to(body)?;
    let user = UserService::create(&state.store, &input).await?;
    Ok(response::created("User created successfully", user))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let patch: UserPatch = body_to(body)?;
    let user = UserService::update(&state.store, id, &patch).await?;
    Ok(response::ok("User updated successfully", user))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let deleted = UserService::delete(&state.store, id).await?;
    Ok(response::ok("User deleted successfully", deleted))
}
