//! Standard response envelope helpers.

use crate::pagination::PageMeta;
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
}

pub fn ok<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            pagination: None,
        }),
    )
}

pub fn created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::CREATED,
        Json(Envelope {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            pagination: None,
        }),
    )
}

pub fn page<T: Serialize>(
    message: &str,
    data: Vec<T>,
    pagination: PageMeta,
) -> (StatusCode, Json<Envelope<Vec<T>>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            pagination: Some(pagination),
        }),
    )
}
