//! JSON request body whose rejections use the error envelope.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

/// Any JSON value; shape checks happen in the handler.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(AppError::rejected(rejection.status(), rejection.body_text())),
        }
    }
}
