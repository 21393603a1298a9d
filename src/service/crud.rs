//! Record operations behind each bound route, on top of the record store.

use crate::config::ResolvedResource;
use crate::error::AppError;
use crate::service::filter::{matches_all, FieldFilter};
use crate::store::{Record, Store, ACTIVE_FIELD};
use serde_json::{Map, Value};
use uuid::Uuid;

pub struct CrudService;

impl CrudService {
    /// Records in insertion order; deactivated ones dropped on soft-delete resources.
    pub fn list(store: &Store, resource: &ResolvedResource, filters: &[FieldFilter]) -> Result<Vec<Record>, AppError> {
        let rows = store.get_all(&resource.name)?;
        let soft_delete = resource.soft_delete();
        Ok(rows
            .into_iter()
            .filter(|r| !soft_delete || r.is_visible())
            .filter(|r| matches_all(filters, r))
            .collect())
    }

    pub fn create(store: &Store, resource: &ResolvedResource, body: Map<String, Value>) -> Result<Record, AppError> {
        Ok(store.create(&resource.name, body)?)
    }

    pub fn read(store: &Store, resource: &ResolvedResource, id: Uuid) -> Result<Record, AppError> {
        Ok(store.get_one(&resource.name, id)?)
    }

    pub fn update(
        store: &Store,
        resource: &ResolvedResource,
        id: Uuid,
        changes: Map<String, Value>,
    ) -> Result<Record, AppError> {
        Ok(store.update(&resource.name, id, changes)?)
    }

    /// Deactivate the record; it stays stored but disappears from reads.
    pub fn soft_delete(store: &Store, resource: &ResolvedResource, id: Uuid) -> Result<Record, AppError> {
        let mut changes = Map::new();
        changes.insert(ACTIVE_FIELD.to_string(), Value::Bool(false));
        Self::update(store, resource, id, changes)
    }

    pub fn hard_delete(store: &Store, resource: &ResolvedResource, id: Uuid) -> Result<Record, AppError> {
        Ok(store.remove(&resource.name, id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Capability, DeleteMode};
    use crate::error::StoreError;
    use serde_json::json;

    fn soft_users(store: &Store) -> ResolvedResource {
        store.declare("users", true).unwrap();
        ResolvedResource {
            name: "users".into(),
            capabilities: vec![Capability::Create, Capability::GetList, Capability::SoftDelete],
            delete_mode: DeleteMode::Soft,
        }
    }

    fn body(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn soft_delete_drops_exactly_one_from_list() {
        let store = Store::new();
        let users = soft_users(&store);
        let a = CrudService::create(&store, &users, body(json!({"name": "Alice"}))).unwrap();
        CrudService::create(&store, &users, body(json!({"name": "Bob"}))).unwrap();
        assert_eq!(CrudService::list(&store, &users, &[]).unwrap().len(), 2);

        let deleted = CrudService::soft_delete(&store, &users, a.id).unwrap();
        assert_eq!(deleted.active, Some(false));
        let remaining = CrudService::list(&store, &users, &[]).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].fields["name"], json!("Bob"));
        assert_eq!(store.get_including_inactive("users", a.id).unwrap().id, a.id);
    }

    #[test]
    fn second_soft_delete_is_not_found() {
        let store = Store::new();
        let users = soft_users(&store);
        let a = CrudService::create(&store, &users, Map::new()).unwrap();
        CrudService::soft_delete(&store, &users, a.id).unwrap();
        match CrudService::soft_delete(&store, &users, a.id) {
            Err(AppError::Store(StoreError::NotFound { .. })) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn list_applies_filters() {
        let store = Store::new();
        let users = soft_users(&store);
        CrudService::create(&store, &users, body(json!({"name": "Alice", "age": 16}))).unwrap();
        CrudService::create(&store, &users, body(json!({"name": "Bob", "age": 42}))).unwrap();
        let minors = CrudService::list(&store, &users, &[FieldFilter::new("age", "<18")]).unwrap();
        assert_eq!(minors.len(), 1);
        assert_eq!(minors[0].fields["name"], json!("Alice"));
    }
}
