//! Process repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProcessId};
use crate::domain::organization::{
    NewProcess, Process, ProcessFilter, ProcessUpdate, ProcessWithSubprocesses,
};

/// Repository port for process persistence.
///
/// Structurally the macroprocess contract one level down: fetches join the
/// subprocess children and the owning macroprocess name so a free-text
/// search can match across levels.
#[async_trait]
pub trait ProcessRepository: Send + Sync {
    /// Fetch processes matching the filter, enriched with subprocess
    /// children and the owning macroprocess name, ordered ascending by name.
    async fn fetch_many(
        &self,
        filter: &ProcessFilter,
    ) -> Result<Vec<ProcessWithSubprocesses>, DomainError>;

    /// Insert a new process. Status defaults to Active when omitted.
    async fn create(&self, input: NewProcess) -> Result<Process, DomainError>;

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// - `ProcessNotFound` if no row matches the id
    async fn update(&self, id: ProcessId, patch: ProcessUpdate) -> Result<Process, DomainError>;

    /// Delete the row. The dependent-children guard runs above this port.
    async fn delete(&self, id: ProcessId) -> Result<(), DomainError>;

    /// Bounded existence check for dependent subprocesses (`LIMIT 1`).
    async fn has_subprocesses(&self, id: ProcessId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ProcessRepository) {}
    }
}
