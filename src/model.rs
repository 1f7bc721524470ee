//! User record and request payload types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// One user row as stored and returned by the repository. Keys stay
/// snake_case on the wire, matching the column names.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Creation payload. Every field is optional at the deserialization layer;
/// required-field enforcement happens in validation so missing fields land
/// in the per-field violation map instead of a deserializer error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
}

/// Update payload. Optional columns use a double Option: the outer level is
/// "was the field present in the request", the inner level is the value.
/// An omitted field leaves the column untouched; `null` (or an empty string,
/// handled during normalization) clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub country: Option<Option<String>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Field set ready for persistence: validated, trimmed, sanitized, email
/// lower-cased, empty optionals collapsed to None.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
}

/// Delete confirmation with the pre-deletion snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedUser {
    pub deleted: bool,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CountryCount {
    pub country: String,
    pub count: i64,
}

/// Aggregate statistics: total count, per-country counts ordered by
/// descending count (rows without a country excluded), and the most recent
/// registrations inside the 7-day window, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: i64,
    pub users_by_country: Vec<CountryCount>,
    pub recent_registrations: Vec<User>,
}
