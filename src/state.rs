//! Shared application state for all routes.

use crate::config::ResolvedModel;
use crate::error::StoreError;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    /// Resources bound at startup; read-only afterwards.
    pub model: Arc<ResolvedModel>,
}

impl AppState {
    /// Fresh store with every resource of the model declared.
    pub fn new(model: ResolvedModel) -> Result<Self, StoreError> {
        Self::with_store(model, Store::new())
    }

    pub fn with_store(model: ResolvedModel, store: Store) -> Result<Self, StoreError> {
        for resource in &model.resources {
            store.declare(&resource.name, resource.soft_delete())?;
        }
        Ok(AppState {
            store,
            model: Arc::new(model),
        })
    }
}
