//! Statistics handlers: overview, per-country breakdown, recent registrations.

use crate::error::ApiError;
use crate::response;
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde_json::{json, Value};
use std::collections::HashMap;

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// GET /stats: totals, per-country map (descending count), top five
/// countries, and the recent-registration window.
pub async fn overview(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = UserService::stats(&state.store).await?;

    let total_countries = stats.users_by_country.len();
    let average_users_per_country = if total_countries > 0 {
        round2(stats.total_users as f64 / total_countries as f64)
    } else {
        0.0
    };
    let top_countries: Vec<&_> = stats.users_by_country.iter().take(5).collect();
    let mut users_by_country = serde_json::Map::new();
    for entry in &stats.users_by_country {
        users_by_country.insert(entry.country.clone(), json!(entry.count));
    }

    let data = json!({
        "totalUsers": stats.total_users,
        "totalCountries": total_countries,
        "averageUsersPerCountry": average_users_per_country,
        "usersByCountry": Value::Object(users_by_country),
        "topCountries": top_countries,
        "recentRegistrations": stats.recent_registrations,
        "lastUpdated": chrono::Utc::now().to_rfc3339(),
    });
    Ok(response::ok("Statistics retrieved successfully", data))
}

/// GET /stats/countries: per-country count and share of the total.
pub async fn countries(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = UserService::stats(&state.store).await?;

    let countries: Vec<Value> = stats
        .users_by_country
        .iter()
        .map(|entry| {
            let percentage = if stats.total_users > 0 {
                round2(entry.count as f64 / stats.total_users as f64 * 100.0)
            } else {
                0.0
            };
            json!({
                "country": entry.country.clone(),
                "count": entry.count,
                "percentage": percentage,
            })
        })
        .collect();

    let data = json!({
        "totalCountries": countries.len(),
        "countries": countries,
    });
    Ok(response::ok("Country statistics retrieved successfully", data))
}

/// GET /stats/recent?limit: the recent-registration window, capped.
pub async fn recent(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let limit: usize = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let stats = UserService::stats(&state.store).await?;

    let recent: Vec<_> = stats.recent_registrations.iter().take(limit).collect();
    let count = recent.len();
    let data = json!({
        "recentRegistrations": recent,
        "count": count,
    });
    Ok(response::ok(
        "Recent registrations retrieved successfully",
        data,
    ))
}
