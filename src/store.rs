//! In-memory record store: one ordered collection of records per resource name.
//!
//! Every operation takes the store lock for its whole duration and never
//! across an `.await`, so each call is atomic with respect to other requests.

use crate::error::StoreError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";
pub const ACTIVE_FIELD: &str = "active";

/// A stored item: system-managed identity and timestamps plus user fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: Uuid,
    pub created_at: i64,
    pub updated_at: i64,
    /// Lifecycle flag; only set for resources that soft-delete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Field value by name, reserved fields included.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            ID_FIELD => Some(Value::String(self.id.to_string())),
            CREATED_AT_FIELD => Some(Value::from(self.created_at)),
            UPDATED_AT_FIELD => Some(Value::from(self.updated_at)),
            ACTIVE_FIELD if self.active.is_some() => self.active.map(Value::Bool),
            _ => self.fields.get(name).cloned(),
        }
    }

    /// Visible to lookups unless explicitly deactivated.
    pub fn is_visible(&self) -> bool {
        self.active != Some(false)
    }
}

#[derive(Debug, Default)]
struct Collection {
    soft_delete: bool,
    records: Vec<Record>,
}

impl Collection {
    fn position(&self, id: Uuid) -> Option<usize> {
        self.records.iter().position(|r| r.id == id && r.is_visible())
    }
}

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, Collection>,
    last_tick: i64,
}

impl Inner {
    /// Wall-clock milliseconds, bumped so every write sees a strictly larger value.
    fn tick(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_tick = now.max(self.last_tick + 1);
        self.last_tick
    }
}

/// Shared handle to the record store. Clones refer to the same data.
#[derive(Clone, Debug, Default)]
pub struct Store {
    inner: Arc<RwLock<Inner>>,
}

fn strip_reserved(fields: &mut Map<String, Value>) {
    fields.remove(ID_FIELD);
    fields.remove(CREATED_AT_FIELD);
    fields.remove(UPDATED_AT_FIELD);
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }

    /// Register a resource and whether its records carry the `active` flag.
    pub fn declare(&self, resource: &str, soft_delete: bool) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.collections.entry(resource.to_string()).or_default().soft_delete = soft_delete;
        Ok(())
    }

    /// Append a new record. On soft-delete resources `active` defaults to `true`
    /// unless `fields` carries a boolean `active`.
    pub fn create(&self, resource: &str, mut fields: Map<String, Value>) -> Result<Record, StoreError> {
        let mut inner = self.write()?;
        let now = inner.tick();
        let collection = inner.collections.entry(resource.to_string()).or_default();

        strip_reserved(&mut fields);
        let active = if collection.soft_delete {
            Some(fields.remove(ACTIVE_FIELD).and_then(|v| v.as_bool()).unwrap_or(true))
        } else {
            None
        };
        let record = Record {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            active,
            fields,
        };
        collection.records.push(record.clone());
        tracing::debug!(resource = %resource, id = %record.id, "record created");
        Ok(record)
    }

    /// Every record of the resource in insertion order, deactivated ones included.
    pub fn get_all(&self, resource: &str) -> Result<Vec<Record>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .collections
            .get(resource)
            .map(|c| c.records.clone())
            .unwrap_or_default())
    }

    pub fn get_one(&self, resource: &str, id: Uuid) -> Result<Record, StoreError> {
        let inner = self.read()?;
        inner
            .collections
            .get(resource)
            .and_then(|c| c.position(id).map(|i| c.records[i].clone()))
            .ok_or_else(|| StoreError::not_found(resource, id))
    }

    /// Lookup by id that ignores the `active` flag.
    pub fn get_including_inactive(&self, resource: &str, id: Uuid) -> Result<Record, StoreError> {
        let inner = self.read()?;
        inner
            .collections
            .get(resource)
            .and_then(|c| c.records.iter().find(|r| r.id == id).cloned())
            .ok_or_else(|| StoreError::not_found(resource, id))
    }

    /// Shallow-merge `changes` into a visible record and refresh `updatedAt`.
    pub fn update(&self, resource: &str, id: Uuid, mut changes: Map<String, Value>) -> Result<Record, StoreError> {
        let mut inner = self.write()?;
        let index = inner
            .collections
            .get(resource)
            .and_then(|c| c.position(id))
            .ok_or_else(|| StoreError::not_found(resource, id))?;
        let now = inner.tick();
        let collection = inner
            .collections
            .get_mut(resource)
            .ok_or_else(|| StoreError::not_found(resource, id))?;
        let soft_delete = collection.soft_delete;
        let record = &mut collection.records[index];

        strip_reserved(&mut changes);
        if soft_delete {
            if let Some(active) = changes.remove(ACTIVE_FIELD) {
                if let Some(b) = active.as_bool() {
                    record.active = Some(b);
                }
            }
        }
        for (k, v) in changes {
            record.fields.insert(k, v);
        }
        record.updated_at = now;
        tracing::debug!(resource = %resource, id = %id, "record updated");
        Ok(record.clone())
    }

    /// Remove a visible record permanently and return it.
    pub fn remove(&self, resource: &str, id: Uuid) -> Result<Record, StoreError> {
        let mut inner = self.write()?;
        let collection = inner
            .collections
            .get_mut(resource)
            .ok_or_else(|| StoreError::not_found(resource, id))?;
        let index = collection
            .position(id)
            .ok_or_else(|| StoreError::not_found(resource, id))?;
        let record = collection.records.remove(index);
        tracing::debug!(resource = %resource, id = %id, "record removed");
        Ok(record)
    }
}
