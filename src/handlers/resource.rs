//! Resource CRUD handlers. Each takes the resource it was bound for; the route
//! binder wraps them in closures that capture that resource.

use crate::config::ResolvedResource;
use crate::error::AppError;
use crate::extractors::RecordId;
use crate::response;
use crate::service::{parse_filters, CrudService, RequestValidator};
use crate::state::AppState;
use axum::response::IntoResponse;
use serde_json::Value;
use std::sync::Arc;

pub async fn list(
    state: AppState,
    resource: Arc<ResolvedResource>,
    params: Vec<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let filters = parse_filters(&params);
    let rows = CrudService::list(&state.store, &resource, &filters)?;
    tracing::debug!(resource = %resource.name, filters = filters.len(), count = rows.len(), "list");
    Ok(response::ok(rows))
}

pub async fn create(
    state: AppState,
    resource: Arc<ResolvedResource>,
    body: Value,
) -> Result<impl IntoResponse, AppError> {
    let body = RequestValidator::body_to_map(body)?;
    RequestValidator::validate(&body, &resource)?;
    let row = CrudService::create(&state.store, &resource, body)?;
    Ok(response::created(row))
}

pub async fn read(
    state: AppState,
    resource: Arc<ResolvedResource>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let row = CrudService::read(&state.store, &resource, id)?;
    Ok(response::ok(row))
}

pub async fn update(
    state: AppState,
    resource: Arc<ResolvedResource>,
    RecordId(id): RecordId,
    body: Value,
) -> Result<impl IntoResponse, AppError> {
    let body = RequestValidator::body_to_map(body)?;
    RequestValidator::validate(&body, &resource)?;
    let row = CrudService::update(&state.store, &resource, id, body)?;
    Ok(response::ok(row))
}

pub async fn soft_delete(
    state: AppState,
    resource: Arc<ResolvedResource>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let row = CrudService::soft_delete(&state.store, &resource, id)?;
    Ok(response::ok(row))
}

pub async fn hard_delete(
    state: AppState,
    resource: Arc<ResolvedResource>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let row = CrudService::hard_delete(&state.store, &resource, id)?;
    Ok(response::deleted(row.id))
}
