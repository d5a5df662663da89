//! Subprocess repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SubprocessId};
use crate::domain::organization::{
    NewSubprocess, Subprocess, SubprocessFilter, SubprocessRecord, SubprocessUpdate,
};

/// Repository port for subprocess persistence.
///
/// Subprocesses are the leaf level: no child collection and no delete
/// guard, but fetches join both ancestor names for cross-level search.
#[async_trait]
pub trait SubprocessRepository: Send + Sync {
    /// Fetch subprocesses matching the filter, enriched with the owning
    /// process and macroprocess names, ordered ascending by name.
    async fn fetch_many(
        &self,
        filter: &SubprocessFilter,
    ) -> Result<Vec<SubprocessRecord>, DomainError>;

    /// Insert a new subprocess. Status defaults to Active when omitted.
    async fn create(&self, input: NewSubprocess) -> Result<Subprocess, DomainError>;

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// - `SubprocessNotFound` if no row matches the id
    async fn update(
        &self,
        id: SubprocessId,
        patch: SubprocessUpdate,
    ) -> Result<Subprocess, DomainError>;

    /// Delete the row.
    async fn delete(&self, id: SubprocessId) -> Result<(), DomainError>;
}
