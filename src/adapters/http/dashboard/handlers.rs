//! HTTP handlers for the hierarchy and dashboard read models.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;

use crate::adapters::http::ok;
use crate::application::catalog::CatalogStore;
use crate::domain::organization::DashboardFilters;

use super::dto::{HierarchyQuery, HierarchyResponse};

/// GET /api/hierarchy
///
/// Returns the (optionally filtered) three-level tree. Filtering preserves
/// the ancestor chain of every matching node.
pub async fn get_hierarchy(
    State(store): State<Arc<CatalogStore>>,
    Query(query): Query<HierarchyQuery>,
) -> Response {
    let tree = store.hierarchy_filtered(&query.into_filter()).await;
    ok(HierarchyResponse::from_tree(&tree))
}

/// GET /api/hierarchy/statistics
pub async fn get_statistics(State(store): State<Arc<CatalogStore>>) -> Response {
    ok(store.statistics().await)
}

/// POST /api/dashboard/filter
///
/// The body is the dashboard filter state; the response carries the
/// filtered triples.
pub async fn filter_dashboard(
    State(store): State<Arc<CatalogStore>>,
    Json(filters): Json<DashboardFilters>,
) -> Response {
    let view = store.dashboard_view(&filters).await;
    ok(&*view)
}
