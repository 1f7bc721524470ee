//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the users table.

use crate::model::NormalizedUser;
use crate::sql::params::BindValue;

/// Column list for every SELECT, in table order.
pub const USER_COLUMNS: &str =
    "id, first_name, last_name, email, phone, country, created_at, updated_at";

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new(sql: String) -> Self {
        QueryBuf {
            sql,
            params: Vec::new(),
        }
    }
}

/// Restriction applied to listing queries. All three share the same ORDER BY
/// and pagination shape.
pub enum ListFilter<'a> {
    All,
    /// Case-insensitive substring match across name, email, and country.
    Search(&'a str),
    /// Exact country match.
    Country(&'a str),
}

fn filter_clause(filter: &ListFilter<'_>, params: &mut Vec<BindValue>) -> &'static str {
    match filter {
        ListFilter::All => "",
        ListFilter::Search(term) => {
            let like = format!("%{}%", term);
            for _ in 0..4 {
                params.push(BindValue::Text(like.clone()));
            }
            " WHERE (first_name LIKE ? OR last_name LIKE ? OR email LIKE ? OR country LIKE ?)"
        }
        ListFilter::Country(country) => {
            params.push(BindValue::from(*country));
            " WHERE country = ?"
        }
    }
}

/// SELECT COUNT(*) under the given filter.
pub fn count_users(filter: &ListFilter<'_>) -> QueryBuf {
    let mut params = Vec::new();
    let where_clause = filter_clause(filter, &mut params);
    QueryBuf {
        sql: format!("SELECT COUNT(*) FROM users{}", where_clause),
        params,
    }
}

/// SELECT a page under the given filter, newest-created first; id breaks
/// same-second timestamp ties deterministically.
pub fn select_users(filter: &ListFilter<'_>, limit: u32, offset: u64) -> QueryBuf {
    let mut params = Vec::new();
    let where_clause = filter_clause(filter, &mut params);
    params.push(BindValue::Int(i64::from(limit)));
    params.push(BindValue::Int(offset as i64));
    QueryBuf {
        sql: format!(
            "SELECT {} FROM users{} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            USER_COLUMNS, where_clause
        ),
        params,
    }
}

/// SELECT one row by primary key.
pub fn select_user_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "SELECT {} FROM users WHERE id = ?",
        USER_COLUMNS
    ));
    q.params.push(BindValue::Int(id));
    q
}

/// INSERT with the fixed column list; id and timestamps come from the store.
pub fn insert_user(user: &NormalizedUser) -> QueryBuf {
    let mut q = QueryBuf::new(
        "INSERT INTO users (first_name, last_name, email, phone, country) \
         VALUES (?, ?, ?, ?, ?)"
            .into(),
    );
    q.params.push(BindValue::from(user.first_name.clone()));
    q.params.push(BindValue::from(user.last_name.clone()));
    q.params.push(BindValue::from(user.email.clone()));
    q.params.push(BindValue::opt_text(user.phone.clone()));
    q.params.push(BindValue::opt_text(user.country.clone()));
    q
}

/// UPDATE by id: SET only the supplied (column, value) pairs, always
/// refreshing updated_at. Callers must pass a non-empty set.
pub fn update_user(id: i64, sets: &[(&'static str, Option<String>)]) -> QueryBuf {
    let mut q = QueryBuf::new(String::new());
    let mut assignments = Vec::with_capacity(sets.len() + 1);
    for (column, value) in sets {
        assignments.push(format!("{} = ?", column));
        q.params.push(BindValue::opt_text(value.clone()));
    }
    assignments.push("updated_at = CURRENT_TIMESTAMP".into());
    q.sql = format!("UPDATE users SET {} WHERE id = ?", assignments.join(", "));
    q.params.push(BindValue::Int(id));
    q
}

/// DELETE by primary key.
pub fn delete_user(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new("DELETE FROM users WHERE id = ?".into());
    q.params.push(BindValue::Int(id));
    q
}

/// Per-country counts, NULL countries excluded, largest first.
pub fn count_by_country() -> QueryBuf {
    QueryBuf::new(
        "SELECT country, COUNT(*) AS count FROM users \
         WHERE country IS NOT NULL \
         GROUP BY country \
         ORDER BY count DESC, country ASC"
            .into(),
    )
}

/// Rows created inside the trailing window, newest first.
pub fn recent_users(window_days: u32, limit: u32) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "SELECT {} FROM users WHERE created_at >= datetime('now', ?) \
         ORDER BY created_at DESC, id DESC LIMIT ?",
        USER_COLUMNS
    ));
    q.params.push(BindValue::Text(format!("-{} days", window_days)));
    q.params.push(BindValue::Int(i64::from(limit)));
    q
}
