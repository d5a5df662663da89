//! HTTP routes for the hierarchy and dashboard read models.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::application::catalog::CatalogStore;

use super::handlers::{filter_dashboard, get_hierarchy, get_statistics};

/// Creates the dashboard router.
pub fn dashboard_routes(store: Arc<CatalogStore>) -> Router {
    Router::new()
        .route("/hierarchy", get(get_hierarchy))
        .route("/hierarchy/statistics", get(get_statistics))
        .route("/dashboard/filter", post(filter_dashboard))
        .with_state(store)
}
