//! HTTP adapters - REST API implementations.
//!
//! Every endpoint answers with the `{success, data}` / `{success, error}`
//! JSON envelope.

pub mod catalog;
pub mod dashboard;
pub mod devdata;
pub mod health;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::application::catalog::CatalogStore;
use crate::config::Environment;
use crate::domain::foundation::{DomainError, ErrorCode, RecordStatus};

/// Successful response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope<T> {
    pub success: bool,
    pub data: T,
}

/// Failed response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

pub(crate) fn ok<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(SuccessEnvelope {
            success: true,
            data,
        }),
    )
        .into_response()
}

pub(crate) fn created<T: Serialize>(data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(SuccessEnvelope {
            success: true,
            data,
        }),
    )
        .into_response()
}

pub(crate) fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorEnvelope {
            success: false,
            error: message.into(),
        }),
    )
        .into_response()
}

/// Maps the domain error taxonomy onto HTTP status codes. The error message
/// string is the whole error channel.
pub(crate) fn domain_error_response(error: &DomainError) -> Response {
    let status = match error.code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::InvalidFormat
        | ErrorCode::DependentRecords => StatusCode::BAD_REQUEST,
        ErrorCode::MacroprocessNotFound
        | ErrorCode::ProcessNotFound
        | ErrorCode::SubprocessNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    };
    failure(status, error.message.clone())
}

/// Status query parameter with the explicit "all" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusParam {
    All,
    Active,
    Inactive,
}

impl StatusParam {
    /// `All` (and an absent parameter) impose no status criterion.
    pub fn to_criterion(self) -> Option<RecordStatus> {
        match self {
            StatusParam::All => None,
            StatusParam::Active => Some(RecordStatus::Active),
            StatusParam::Inactive => Some(RecordStatus::Inactive),
        }
    }
}

/// Assembles the full API router under `/api`.
pub fn api_router(store: Arc<CatalogStore>, environment: Environment) -> Router {
    let api = Router::new()
        .merge(health::health_routes())
        .merge(catalog::catalog_routes(store.clone()))
        .merge(dashboard::dashboard_routes(store.clone()))
        .merge(devdata::devdata_routes(store, environment));

    Router::new().nest("/api", api)
}
