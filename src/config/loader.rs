//! Load resource definitions from JSON and resolve them into the runtime model.

use crate::config::resolved::{Capability, DeleteMode, ResolvedModel, ResolvedResource};
use crate::config::{validate, ResourceDefinitions};
use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;

/// Build resolved model from resource definitions (validates first).
pub fn resolve(definitions: &ResourceDefinitions) -> Result<ResolvedModel, ConfigError> {
    validate(definitions)?;

    let mut resources = Vec::with_capacity(definitions.len());
    let mut resource_by_name = HashMap::new();

    for (name, config) in definitions {
        let capabilities = config
            .meta
            .routes
            .iter()
            .map(|r| {
                r.parse::<Capability>().map_err(|capability| ConfigError::UnknownCapability {
                    resource: name.clone(),
                    capability,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let delete_mode = if capabilities.contains(&Capability::SoftDelete) {
            DeleteMode::Soft
        } else if capabilities.contains(&Capability::HardDelete) {
            DeleteMode::Hard
        } else {
            DeleteMode::None
        };
        let resource = ResolvedResource {
            name: name.clone(),
            capabilities,
            delete_mode,
        };
        resource_by_name.insert(name.clone(), resource.clone());
        resources.push(resource);
    }

    Ok(ResolvedModel {
        resources,
        resource_by_name,
    })
}

pub fn from_json_str(s: &str) -> Result<ResourceDefinitions, ConfigError> {
    Ok(serde_json::from_str(s)?)
}

pub fn from_value(value: serde_json::Value) -> Result<ResourceDefinitions, ConfigError> {
    Ok(serde_json::from_value(value)?)
}

/// Read a resource definition file, e.g. `resources.json`.
pub async fn load_from_path(path: impl AsRef<Path>) -> Result<ResourceDefinitions, ConfigError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    from_json_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "users": { "meta": { "routes": ["create", "get-list", "get-one", "update", "soft-delete"] } },
        "posts": { "meta": { "routes": ["create", "get-list", "hard-delete"] } },
        "tags": { "meta": { "routes": ["get-list"] } }
    }"#;

    #[test]
    fn resolves_delete_modes_and_capabilities() {
        let defs = from_json_str(SAMPLE).unwrap();
        let model = resolve(&defs).unwrap();
        assert_eq!(model.resources.len(), 3);

        let users = model.resource("users").unwrap();
        assert_eq!(users.delete_mode, DeleteMode::Soft);
        assert_eq!(users.capabilities.len(), 5);
        assert!(users.soft_delete());

        let posts = model.resource("posts").unwrap();
        assert_eq!(posts.delete_mode, DeleteMode::Hard);
        assert!(!posts.has(Capability::Update));

        assert_eq!(model.resource("tags").unwrap().delete_mode, DeleteMode::None);
    }

    #[test]
    fn missing_or_misspelled_meta_is_a_parse_error() {
        for bad in [
            serde_json::json!({ "users": {} }),
            serde_json::json!({ "users": { "meta": {} } }),
            serde_json::json!({ "users": { "meta": { "rotues": ["create", "get-list"] } } }),
        ] {
            assert!(matches!(from_value(bad.clone()), Err(ConfigError::Parse(_))), "{bad} should not parse");
        }
        assert!(matches!(
            from_json_str(r#"{ "users": { "meta": { "rotues": ["create"] } } }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn resources_keep_declaration_order() {
        let text = r#"{
            "zebras": { "meta": { "routes": ["get-list"] } },
            "apples": { "meta": { "routes": ["get-list"] } },
            "mangos": { "meta": { "routes": ["get-list"] } }
        }"#;
        let expected = ["zebras", "apples", "mangos"];

        let model = resolve(&from_json_str(text).unwrap()).unwrap();
        let names: Vec<&str> = model.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, expected);

        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        let model = resolve(&from_value(value).unwrap()).unwrap();
        let names: Vec<&str> = model.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(from_json_str("{ not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn conflicting_deletes_fail_resolution() {
        let defs = from_value(serde_json::json!({
            "users": { "meta": { "routes": ["soft-delete", "hard-delete"] } }
        }))
        .unwrap();
        assert!(matches!(resolve(&defs), Err(ConfigError::ConflictingDelete(_))));
    }

    #[tokio::test]
    async fn missing_file_is_a_load_error() {
        let err = load_from_path("/nonexistent/resources.json").await.unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[tokio::test]
    async fn misspelled_routes_key_in_a_file_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!("resources-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, r#"{ "users": { "meta": { "rotues": ["create", "get-list"] } } }"#)
            .await
            .unwrap();
        let result = load_from_path(&path).await;
        let _ = tokio::fs::remove_file(&path).await;
        assert!(matches!(result, Err(ConfigError::Parse(_))), "got {result:?}");
    }
}
