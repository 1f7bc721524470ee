//! Field validation and normalization ahead of any persistence attempt.

use crate::model::{NewUser, NormalizedUser, UserPatch};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").unwrap());

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const COUNTRY_MAX: usize = 50;

/// Trim and strip angle brackets from free-text input.
fn sanitize(s: &str) -> String {
    s.trim().chars().filter(|c| !matches!(c, '<' | '>')).collect()
}

fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    PHONE_RE.is_match(&compact)
}

fn check_name(errors: &mut BTreeMap<String, String>, field: &str, label: &str, value: &str) {
    let trimmed = value.trim();
    if trimmed.len() < NAME_MIN {
        errors.insert(
            field.into(),
            format!("{} must be at least {} characters long", label, NAME_MIN),
        );
    } else if trimmed.len() > NAME_MAX {
        errors.insert(
            field.into(),
            format!("{} cannot exceed {} characters", label, NAME_MAX),
        );
    }
}

/// Create-mode validation: all required fields must be present. Returns the
/// normalized field set, or the per-field violation map.
pub fn validate_new(input: &NewUser) -> Result<NormalizedUser, BTreeMap<String, String>> {
    let mut errors = BTreeMap::new();

    let first_name = input.first_name.as_deref().unwrap_or("");
    let last_name = input.last_name.as_deref().unwrap_or("");
    let email = input.email.as_deref().map(str::trim).unwrap_or("");

    check_name(&mut errors, "first_name", "First name", first_name);
    check_name(&mut errors, "last_name", "Last name", last_name);
    if !EMAIL_RE.is_match(email) {
        errors.insert("email".into(), "Valid email address is required".into());
    }
    if let Some(phone) = input.phone.as_deref() {
        if !phone.trim().is_empty() && !is_valid_phone(phone) {
            errors.insert("phone".into(), "Invalid phone number format".into());
        }
    }
    if let Some(country) = input.country.as_deref() {
        if country.trim().len() > COUNTRY_MAX {
            errors.insert(
                "country".into(),
                format!("Country cannot exceed {} characters", COUNTRY_MAX),
            );
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(NormalizedUser {
        first_name: sanitize(first_name),
        last_name: sanitize(last_name),
        email: email.to_lowercase(),
        phone: normalize_optional(input.phone.as_deref()),
        country: normalize_optional(input.country.as_deref()),
    })
}

/// Update-mode validation: only supplied fields are checked. Returns the
/// effective (column, value) set to persist; None values clear the column.
/// An empty set means the patch touched nothing.
#[allow(clippy::type_complexity)]
pub fn validate_patch(
    patch: &UserPatch,
) -> Result<Vec<(&'static str, Option<String>)>, BTreeMap<String, String>> {
    let mut errors = BTreeMap::new();

    if let Some(first_name) = patch.first_name.as_deref() {
        check_name(&mut errors, "first_name", "First name", first_name);
    }
    if let Some(last_name) = patch.last_name.as_deref() {
        check_name(&mut errors, "last_name", "Last name", last_name);
    }
    if let Some(email) = patch.email.as_deref() {
        if !EMAIL_RE.is_match(email.trim()) {
            errors.insert("email".into(), "Valid email address is required".into());
        }
    }
    if let Some(Some(phone)) = patch.phone.as_ref().map(Option::as_deref) {
        if !phone.trim().is_empty() && !is_valid_phone(phone) {
            errors.insert("phone".into(), "Invalid phone number format".into());
        }
    }
    if let Some(Some(country)) = patch.country.as_ref().map(Option::as_deref) {
        if country.trim().len() > COUNTRY_MAX {
            errors.insert(
                "country".into(),
                format!("Country cannot exceed {} characters", COUNTRY_MAX),
            );
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut sets: Vec<(&'static str, Option<String>)> = Vec::new();
    if let Some(first_name) = patch.first_name.as_deref() {
        sets.push(("first_name", Some(sanitize(first_name))));
    }
    if let Some(last_name) = patch.last_name.as_deref() {
        sets.push(("last_name", Some(sanitize(last_name))));
    }
    if let Some(email) = patch.email.as_deref() {
        sets.push(("email", Some(email.trim().to_lowercase())));
    }
    if let Some(phone) = patch.phone.as_ref() {
        sets.push(("phone", normalize_optional(phone.as_deref())));
    }
    if let Some(country) = patch.country.as_ref() {
        sets.push(("country", normalize_optional(country.as_deref())));
    }
    Ok(sets)
}

/// Sanitized value, or None when absent or empty after sanitization.
fn normalize_optional(value: Option<&str>) -> Option<String> {
    value.map(sanitize).filter(|s| !s.is_empty())
}
