//! HTTP routes for the catalog CRUD endpoints.

use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;

use crate::application::catalog::CatalogStore;

use super::handlers::{
    create_macroprocess, create_process, create_subprocess, delete_macroprocess,
    delete_process, delete_subprocess, list_macroprocesses, list_processes, list_subprocesses,
    update_macroprocess, update_process, update_subprocess,
};

/// Creates the catalog router with the CRUD endpoints for all three entity
/// kinds.
pub fn catalog_routes(store: Arc<CatalogStore>) -> Router {
    Router::new()
        .route(
            "/macroprocesses",
            get(list_macroprocesses).post(create_macroprocess),
        )
        .route(
            "/macroprocesses/:id",
            put(update_macroprocess).delete(delete_macroprocess),
        )
        .route("/processes", get(list_processes).post(create_process))
        .route(
            "/processes/:id",
            put(update_process).delete(delete_process),
        )
        .route(
            "/subprocesses",
            get(list_subprocesses).post(create_subprocess),
        )
        .route(
            "/subprocesses/:id",
            put(update_subprocess).delete(delete_subprocess),
        )
        .with_state(store)
}
