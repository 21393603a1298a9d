//! Extract the record id from the `/:id` path segment.

use crate::error::{AppError, StoreError};
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// Record id parsed from the path. Anything that is not a UUID cannot name a
/// stored record, so it is rejected as not found rather than as a bad request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordId(pub Uuid);

/// Resource name of an item route: the first segment of `/{resource}/:id`.
fn resource_segment(path: &str) -> &str {
    path.trim_start_matches('/').split('/').next().unwrap_or_default()
}

fn parse_id(resource: &str, raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw.trim()).map_err(|_| StoreError::not_found(resource, raw))
}

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
        let id = parse_id(resource_segment(parts.uri.path()), &raw)?;
        Ok(RecordId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_is_the_first_path_segment() {
        assert_eq!(resource_segment("/users/abc"), "users");
        assert_eq!(resource_segment("/blog-posts/1"), "blog-posts");
        assert_eq!(resource_segment(""), "");
    }

    #[test]
    fn non_uuid_is_not_found_in_its_resource() {
        match parse_id("users", "not-a-uuid") {
            Err(StoreError::NotFound { resource, id }) => {
                assert_eq!(resource, "users");
                assert_eq!(id, "not-a-uuid");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        let id = Uuid::new_v4();
        assert_eq!(parse_id("users", &format!(" {id} ")), Ok(id));
    }
}
