//! HTTP handlers for the catalog CRUD endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

use crate::adapters::http::{created, domain_error_response, failure, ok};
use crate::application::catalog::CatalogStore;
use crate::domain::foundation::{MacroprocessId, ProcessId, SubprocessId};

use super::dto::{
    CreateMacroprocessRequest, CreateProcessRequest, CreateSubprocessRequest,
    ListMacroprocessesQuery, ListProcessesQuery, ListSubprocessesQuery,
    UpdateMacroprocessRequest, UpdateProcessRequest, UpdateSubprocessRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Macroprocess handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/macroprocesses
pub async fn list_macroprocesses(
    State(store): State<Arc<CatalogStore>>,
    Query(query): Query<ListMacroprocessesQuery>,
) -> Response {
    match store.list_macroprocesses(&query.into_filter()).await {
        Ok(rows) => ok(rows),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/macroprocesses
pub async fn create_macroprocess(
    State(store): State<Arc<CatalogStore>>,
    Json(req): Json<CreateMacroprocessRequest>,
) -> Response {
    match store.create_macroprocess(req.into()).await {
        Ok(record) => created(record),
        Err(e) => domain_error_response(&e),
    }
}

/// PUT /api/macroprocesses/:id
pub async fn update_macroprocess(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateMacroprocessRequest>,
) -> Response {
    let id = match id.parse::<MacroprocessId>() {
        Ok(id) => id,
        Err(_) => return failure(StatusCode::BAD_REQUEST, "Invalid macroprocess ID"),
    };
    match store.update_macroprocess(id, req.into()).await {
        Ok(record) => ok(record),
        Err(e) => domain_error_response(&e),
    }
}

/// DELETE /api/macroprocesses/:id
pub async fn delete_macroprocess(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> Response {
    let id = match id.parse::<MacroprocessId>() {
        Ok(id) => id,
        Err(_) => return failure(StatusCode::BAD_REQUEST, "Invalid macroprocess ID"),
    };
    match store.delete_macroprocess(id).await {
        Ok(()) => ok(true),
        Err(e) => domain_error_response(&e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Process handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/processes
pub async fn list_processes(
    State(store): State<Arc<CatalogStore>>,
    Query(query): Query<ListProcessesQuery>,
) -> Response {
    match store.list_processes(&query.into_filter()).await {
        Ok(rows) => ok(rows),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/processes
pub async fn create_process(
    State(store): State<Arc<CatalogStore>>,
    Json(req): Json<CreateProcessRequest>,
) -> Response {
    match store.create_process(req.into()).await {
        Ok(record) => created(record),
        Err(e) => domain_error_response(&e),
    }
}

/// PUT /api/processes/:id
pub async fn update_process(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProcessRequest>,
) -> Response {
    let id = match id.parse::<ProcessId>() {
        Ok(id) => id,
        Err(_) => return failure(StatusCode::BAD_REQUEST, "Invalid process ID"),
    };
    match store.update_process(id, req.into()).await {
        Ok(record) => ok(record),
        Err(e) => domain_error_response(&e),
    }
}

/// DELETE /api/processes/:id
pub async fn delete_process(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> Response {
    let id = match id.parse::<ProcessId>() {
        Ok(id) => id,
        Err(_) => return failure(StatusCode::BAD_REQUEST, "Invalid process ID"),
    };
    match store.delete_process(id).await {
        Ok(()) => ok(true),
        Err(e) => domain_error_response(&e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Subprocess handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/subprocesses
pub async fn list_subprocesses(
    State(store): State<Arc<CatalogStore>>,
    Query(query): Query<ListSubprocessesQuery>,
) -> Response {
    match store.list_subprocesses(&query.into_filter()).await {
        Ok(rows) => ok(rows),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/subprocesses
pub async fn create_subprocess(
    State(store): State<Arc<CatalogStore>>,
    Json(req): Json<CreateSubprocessRequest>,
) -> Response {
    match store.create_subprocess(req.into()).await {
        Ok(record) => created(record),
        Err(e) => domain_error_response(&e),
    }
}

/// PUT /api/subprocesses/:id
pub async fn update_subprocess(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSubprocessRequest>,
) -> Response {
    let id = match id.parse::<SubprocessId>() {
        Ok(id) => id,
        Err(_) => return failure(StatusCode::BAD_REQUEST, "Invalid subprocess ID"),
    };
    match store.update_subprocess(id, req.into()).await {
        Ok(record) => ok(record),
        Err(e) => domain_error_response(&e),
    }
}

/// DELETE /api/subprocesses/:id
pub async fn delete_subprocess(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> Response {
    let id = match id.parse::<SubprocessId>() {
        Ok(id) => id,
        Err(_) => return failure(StatusCode::BAD_REQUEST, "Invalid subprocess ID"),
    };
    match store.delete_subprocess(id).await {
        Ok(()) => ok(true),
        Err(e) => domain_error_response(&e),
    }
}
