//! User repository: CRUD, pagination, search, and aggregate statistics.

use crate::error::ApiError;
use crate::model::{CountryCount, DeletedUser, NewUser, User, UserPatch, UserStats};
use crate::pagination::{Page, PageMeta};
use crate::service::validation;
use crate::sql::{self, ListFilter};
use crate::store::Store;

const RECENT_WINDOW_DAYS: u32 = 7;
const RECENT_LIMIT: u32 = 10;

pub struct UserService;

impl UserService {
    /// Validate, normalize, insert, and read the row back so the returned
    /// record carries the generated id and timestamps.
    pub async fn create(store: &Store, input: &NewUser) -> Result<User, ApiError> {
        let record = validation::validate_new(input).map_err(ApiError::validation_details)?;
        let q = sql::insert_user(&record);
        let exec = store.execute(&q.sql, &q.params).await?;
        Self::find_by_id(store, exec.last_insert_id).await
    }

    /// Fetch one record. The id must be a positive integer.
    pub async fn find_by_id(store: &Store, id: i64) -> Result<User, ApiError> {
        if id <= 0 {
            return Err(ApiError::validation("Valid user ID is required"));
        }
        let q = sql::select_user_by_id(id);
        store
            .fetch_one(&q.sql, &q.params)
            .await?
            .ok_or_else(ApiError::not_found)
    }

    /// One page of records, newest-created first.
    pub async fn find_all(store: &Store, page: Page) -> Result<(Vec<User>, PageMeta), ApiError> {
        Self::list(store, &ListFilter::All, page).await
    }

    /// Case-insensitive substring search across first name, last name,
    /// email, and country. A blank term degrades to find_all.
    pub async fn search(
        store: &Store,
        term: &str,
        page: Page,
    ) -> Result<(Vec<User>, PageMeta), ApiError> {
        let term = term.trim();
        if term.is_empty() {
            return Self::find_all(store, page).await;
        }
        Self::list(store, &ListFilter::Search(term), page).await
    }

    /// Exact country filter. A blank country is rejected.
    pub async fn find_by_country(
        store: &Store,
        country: &str,
        page: Page,
    ) -> Result<(Vec<User>, PageMeta), ApiError> {
        let country = country.trim();
        if country.is_empty() {
            return Err(ApiError::validation("Country name is required"));
        }
        Self::list(store, &ListFilter::Country(country), page).await
    }

    async fn list(
        store: &Store,
        filter: &ListFilter<'_>,
        page: Page,
    ) -> Result<(Vec<User>, PageMeta), ApiError> {
        let count_q = sql::count_users(filter);
        let total = store.fetch_scalar(&count_q.sql, &count_q.params).await?;
        let q = sql::select_users(filter, page.limit, page.offset());
        let users = store.fetch_all(&q.sql, &q.params).await?;
        Ok((users, PageMeta::new(page, total)))
    }

    /// Mutate only the supplied columns, refresh updated_at, and return the
    /// re-read record. A patch with no effective fields is a validation
    /// error.
    pub async fn update(store: &Store, id: i64, patch: &UserPatch) -> Result<User, ApiError> {
        Self::find_by_id(store, id).await?;
        let sets = validation::validate_patch(patch).map_err(ApiError::validation_details)?;
        if sets.is_empty() {
            return Err(ApiError::validation("No valid fields to update"));
        }
        let q = sql::update_user(id, &sets);
        store.execute(&q.sql, &q.params).await?;
        Self::find_by_id(store, id).await
    }

    /// Hard delete. Returns the pre-deletion snapshot. A concurrent delete
    /// between the existence check and the DELETE surfaces as NotFound via
    /// the affected-row count.
    pub async fn delete(store: &Store, id: i64) -> Result<DeletedUser, ApiError> {
        let user = Self::find_by_id(store, id).await?;
        let q = sql::delete_user(id);
        let exec = store.execute(&q.sql, &q.params).await?;
        if exec.rows_affected == 0 {
            return Err(ApiError::not_found());
        }
        Ok(DeletedUser {
            deleted: true,
            user,
        })
    }

    /// Total count, per-country counts (largest first), and registrations
    /// from the trailing seven days.
    pub async fn stats(store: &Store) -> Result<UserStats, ApiError> {
        let count_q = sql::count_users(&ListFilter::All);
        let total_users = store.fetch_scalar(&count_q.sql, &count_q.params).await?;

        let country_q = sql::count_by_country();
        let users_by_country: Vec<CountryCount> =
            store.fetch_all(&country_q.sql, &country_q.params).await?;

        let recent_q = sql::recent_users(RECENT_WINDOW_DAYS, RECENT_LIMIT);
        let recent_registrations: Vec<User> =
            store.fetch_all(&recent_q.sql, &recent_q.params).await?;

        Ok(UserStats {
            total_users,
            users_by_country,
            recent_registrations,
        })
    }
}
