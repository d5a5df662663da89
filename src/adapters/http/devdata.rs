//! Development-only data inspection endpoints.
//!
//! Raw dumps of the cached collections, gated to non-production
//! environments and loopback peers. Production or remote callers get 403.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tracing::warn;

use crate::application::catalog::CatalogStore;
use crate::config::Environment;

use super::{failure, ok};

#[derive(Clone)]
pub struct DevDataState {
    store: Arc<CatalogStore>,
    environment: Environment,
}

/// GET /api/data/:collection
async fn dump_collection(
    State(state): State<DevDataState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(collection): Path<String>,
) -> Response {
    if state.environment.is_production() || !addr.ip().is_loopback() {
        warn!(peer = %addr, collection = %collection, "Rejected data inspection request");
        return failure(
            StatusCode::FORBIDDEN,
            "Data inspection is only available locally outside production",
        );
    }

    let snapshot = state.store.snapshot().await;
    match collection.as_str() {
        "macroprocesses" => ok(&snapshot.macroprocesses),
        "processes" => ok(&snapshot.processes),
        "subprocesses" => ok(&snapshot.subprocesses),
        _ => failure(
            StatusCode::NOT_FOUND,
            format!("Unknown collection: {}", collection),
        ),
    }
}

/// Creates the data inspection router.
pub fn devdata_routes(store: Arc<CatalogStore>, environment: Environment) -> Router {
    Router::new()
        .route("/data/:collection", get(dump_collection))
        .with_state(DevDataState { store, environment })
}
