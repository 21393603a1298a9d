//! Response helpers: records are returned as bare JSON, without an envelope.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

/// Acknowledgement for a permanent delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: Uuid,
    pub deleted: bool,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn deleted(id: Uuid) -> (StatusCode, Json<Deleted>) {
    (StatusCode::OK, Json(Deleted { id, deleted: true }))
}
