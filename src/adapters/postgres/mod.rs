//! PostgreSQL adapters - repository port implementations.
//!
//! Table names are fixed by the external schema and must match it exactly;
//! they are the compatibility boundary with the shared store.

mod macroprocess_repository;
mod process_repository;
mod subprocess_repository;

pub use macroprocess_repository::PostgresMacroprocessRepository;
pub use process_repository::PostgresProcessRepository;
pub use subprocess_repository::PostgresSubprocessRepository;

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// External table names, fixed by the shared schema.
pub(crate) const MACROPROCESS_TABLE: &str = "macroprocesses";
pub(crate) const PROCESS_TABLE: &str = "processes";
pub(crate) const SUBPROCESS_TABLE: &str = "subprocesses";
/// Risk register table. Unused until risk linkage lands; kept as the anchor
/// for that join.
#[allow(dead_code)]
pub(crate) const RISK_TABLE: &str = "risks";

/// Builds the connection pool from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
}

/// Reads one column, translating the sqlx error into the domain taxonomy.
pub(crate) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

/// Maps an sqlx error into the domain taxonomy, surfacing the store's
/// message untranslated.
pub(crate) fn db_error(context: &str) -> impl FnOnce(sqlx::Error) -> DomainError + '_ {
    move |e| DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Turns a free-text search into an ILIKE pattern, escaping the LIKE
/// metacharacters in the user input.
pub(crate) fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
