//! Resource routes built from the resolved model.
//! One handler per declared capability; the capability table below maps each
//! capability to its path kind and a factory producing the method router.

use crate::config::{Capability, ResolvedResource};
use crate::extractors::{JsonBody, QueryParams, RecordId};
use crate::handlers::resource as handlers;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{delete, get, patch, post, MethodRouter},
    Router,
};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteTarget {
    /// `/{resource}`
    Collection,
    /// `/{resource}/:id`
    Item,
}

impl RouteTarget {
    pub fn path(self, resource: &str) -> String {
        match self {
            RouteTarget::Collection => format!("/{}", resource),
            RouteTarget::Item => format!("/{}/:id", resource),
        }
    }
}

type BindFn = fn(Arc<ResolvedResource>) -> MethodRouter<AppState>;

pub struct CapabilityBinding {
    pub capability: Capability,
    pub target: RouteTarget,
    bind: BindFn,
}

static BINDINGS: [CapabilityBinding; 6] = [
    CapabilityBinding {
        capability: Capability::Create,
        target: RouteTarget::Collection,
        bind: bind_create,
    },
    CapabilityBinding {
        capability: Capability::GetList,
        target: RouteTarget::Collection,
        bind: bind_list,
    },
    CapabilityBinding {
        capability: Capability::GetOne,
        target: RouteTarget::Item,
        bind: bind_read,
    },
    CapabilityBinding {
        capability: Capability::Update,
        target: RouteTarget::Item,
        bind: bind_update,
    },
    CapabilityBinding {
        capability: Capability::SoftDelete,
        target: RouteTarget::Item,
        bind: bind_soft_delete,
    },
    CapabilityBinding {
        capability: Capability::HardDelete,
        target: RouteTarget::Item,
        bind: bind_hard_delete,
    },
];

pub fn binding_for(capability: Capability) -> Option<&'static CapabilityBinding> {
    BINDINGS.iter().find(|b| b.capability == capability)
}

fn bind_create(resource: Arc<ResolvedResource>) -> MethodRouter<AppState> {
    post(move |State(state): State<AppState>, JsonBody(body): JsonBody| {
        handlers::create(state, Arc::clone(&resource), body)
    })
}

fn bind_list(resource: Arc<ResolvedResource>) -> MethodRouter<AppState> {
    get(move |State(state): State<AppState>, QueryParams(params): QueryParams| {
        handlers::list(state, Arc::clone(&resource), params)
    })
}

fn bind_read(resource: Arc<ResolvedResource>) -> MethodRouter<AppState> {
    get(move |State(state): State<AppState>, id: RecordId| {
        handlers::read(state, Arc::clone(&resource), id)
    })
}

fn bind_update(resource: Arc<ResolvedResource>) -> MethodRouter<AppState> {
    patch(move |State(state): State<AppState>, id: RecordId, JsonBody(body): JsonBody| {
        handlers::update(state, Arc::clone(&resource), id, body)
    })
}

fn bind_soft_delete(resource: Arc<ResolvedResource>) -> MethodRouter<AppState> {
    delete(move |State(state): State<AppState>, id: RecordId| {
        handlers::soft_delete(state, Arc::clone(&resource), id)
    })
}

fn bind_hard_delete(resource: Arc<ResolvedResource>) -> MethodRouter<AppState> {
    delete(move |State(state): State<AppState>, id: RecordId| {
        handlers::hard_delete(state, Arc::clone(&resource), id)
    })
}

/// Register every declared capability of every resource in the model.
/// Expects a model that passed validation (no soft/hard delete conflict).
pub fn resource_routes(state: AppState) -> Router {
    let mut router = Router::new();
    for resource in &state.model.resources {
        tracing::info!("Creating [{}] routes:", resource.name);
        let shared = Arc::new(resource.clone());
        for capability in &resource.capabilities {
            let Some(binding) = binding_for(*capability) else {
                continue;
            };
            router = router.route(&binding.target.path(&resource.name), (binding.bind)(Arc::clone(&shared)));
            tracing::info!("  * {}", capability);
        }
    }
    router.with_state(state)
}
