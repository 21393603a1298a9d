//! Raw `field=pattern` query pairs, repeated keys kept.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(pub Vec<(String, String)>);

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
        Ok(QueryParams(pairs))
    }
}
