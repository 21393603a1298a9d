//! Mock API SDK: configuration-driven mock REST API over an in-memory record store.

pub mod config;
pub mod error;
pub mod extractors;
pub mod response;
pub mod state;
pub mod store;
pub mod service;
pub mod handlers;
pub mod routes;
pub mod server;

pub use config::{
    from_json_str, load_from_path, resolve, Capability, DeleteMode, ResolvedModel, ResolvedResource,
    ResourceConfig, ResourceDefinitions, ServerSettings,
};
pub use error::{AppError, ConfigError, StoreError};
pub use routes::{common_routes, resource_routes};
pub use server::{create_server, create_server_with_store, MockServer};
pub use service::CrudService;
pub use state::AppState;
pub use store::{Record, Store};
