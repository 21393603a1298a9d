//! Server assembly: validate definitions, build the router, serve it.

use crate::config::{resolve, ResolvedModel, ResourceDefinitions, DEFAULT_BODY_LIMIT};
use crate::error::AppError;
use crate::routes::{common_routes, resource_routes};
use crate::state::AppState;
use crate::store::Store;
use axum::{extract::DefaultBodyLimit, Router};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// A configured mock API: routes for every declared capability over a fresh store.
pub struct MockServer {
    state: AppState,
    body_limit: usize,
}

/// Validate `definitions` and prepare a server. Fails before anything is bound
/// if a resource is misconfigured (unknown route, soft and hard delete, ...).
pub fn create_server(definitions: &ResourceDefinitions) -> Result<MockServer, AppError> {
    create_server_with_store(definitions, Store::new())
}

pub fn create_server_with_store(definitions: &ResourceDefinitions, store: Store) -> Result<MockServer, AppError> {
    let model = resolve(definitions)?;
    let state = AppState::with_store(model, store)?;
    Ok(MockServer {
        state,
        body_limit: DEFAULT_BODY_LIMIT,
    })
}

impl MockServer {
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    pub fn store(&self) -> &Store {
        &self.state.store
    }

    pub fn model(&self) -> &ResolvedModel {
        &self.state.model
    }

    pub fn router(&self) -> Router {
        Router::new()
            .merge(common_routes(self.state.clone()))
            .merge(resource_routes(self.state.clone()))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(DefaultBodyLimit::disable())
                    .layer(RequestBodyLimitLayer::new(self.body_limit)),
            )
    }

    /// Listen on all interfaces at `port`.
    pub async fn start(self, port: u16) -> std::io::Result<()> {
        self.bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).await
    }

    pub async fn bind(self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        let app = self.router();
        tracing::info!("listening on {}", listener.local_addr()?);
        axum::serve(listener, app).await
    }
}
