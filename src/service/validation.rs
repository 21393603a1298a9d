//! Request body checks shared by create and update.

use crate::config::ResolvedResource;
use crate::error::AppError;
use crate::store::ACTIVE_FIELD;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Bodies must be JSON objects.
    pub fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
        match value {
            Value::Object(m) => Ok(m),
            _ => Err(AppError::BadRequest("body must be a JSON object".into())),
        }
    }

    /// On soft-delete resources `active` drives visibility, so it must be a boolean.
    pub fn validate(body: &Map<String, Value>, resource: &ResolvedResource) -> Result<(), AppError> {
        if resource.soft_delete() {
            if let Some(v) = body.get(ACTIVE_FIELD) {
                if !v.is_boolean() {
                    return Err(AppError::Validation(format!("{} must be a boolean", ACTIVE_FIELD)));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Capability, DeleteMode};
    use serde_json::json;

    fn resource(delete_mode: DeleteMode) -> ResolvedResource {
        ResolvedResource {
            name: "users".into(),
            capabilities: vec![Capability::Create],
            delete_mode,
        }
    }

    #[test]
    fn non_object_body_is_bad_request() {
        assert!(matches!(RequestValidator::body_to_map(json!([1, 2])), Err(AppError::BadRequest(_))));
        assert!(RequestValidator::body_to_map(json!({"a": 1})).is_ok());
    }

    #[test]
    fn active_must_be_boolean_only_for_soft_delete() {
        let body = RequestValidator::body_to_map(json!({"active": "yes"})).unwrap();
        assert!(matches!(
            RequestValidator::validate(&body, &resource(DeleteMode::Soft)),
            Err(AppError::Validation(_))
        ));
        assert!(RequestValidator::validate(&body, &resource(DeleteMode::Hard)).is_ok());
    }
}
