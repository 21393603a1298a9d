//! Common routes: health, version, info.

use crate::config::ResolvedResource;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct InfoBody {
    name: &'static str,
    version: &'static str,
    resources: Vec<ResolvedResource>,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn info(State(state): State<AppState>) -> Json<InfoBody> {
    Json(InfoBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        resources: state.model.resources.clone(),
    })
}

/// GET /health, GET /version, GET /info. Version and info also list the bound resources.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(info))
        .route("/info", get(info))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{from_value, resolve};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn state() -> AppState {
        let defs = match from_value(serde_json::json!({
            "users": { "meta": { "routes": ["create", "soft-delete"] } }
        })) {
            Ok(d) => d,
            Err(e) => panic!("bad definitions: {e}"),
        };
        match resolve(&defs).map(AppState::new) {
            Ok(Ok(s)) => s,
            _ => panic!("failed to build state"),
        }
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let req = match Request::builder().uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match common_routes(state()).oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        let status = resp.status();
        let bytes = match axum::body::to_bytes(resp.into_body(), 4096).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => (status, v),
            Err(e) => panic!("invalid JSON: {e}"),
        }
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn info_lists_bound_resources() {
        let (status, body) = get_json("/info").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(body["resources"][0]["name"], "users");
        assert_eq!(body["resources"][0]["delete_mode"], "soft");
        assert_eq!(body["resources"][0]["capabilities"][1], "soft-delete");
    }
}
