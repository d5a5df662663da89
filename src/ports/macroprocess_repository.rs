//! Macroprocess repository port.
//!
//! Defines the contract for querying and persisting macroprocesses against
//! the external relational store.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MacroprocessId};
use crate::domain::organization::{
    Macroprocess, MacroprocessFilter, MacroprocessUpdate, MacroprocessWithProcesses,
    NewMacroprocess,
};

/// Repository port for macroprocess persistence.
#[async_trait]
pub trait MacroprocessRepository: Send + Sync {
    /// Fetch macroprocesses matching the filter, each enriched with its
    /// process children, ordered ascending by name.
    ///
    /// Zero matching rows is a benign empty list.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on transport or query failure
    async fn fetch_many(
        &self,
        filter: &MacroprocessFilter,
    ) -> Result<Vec<MacroprocessWithProcesses>, DomainError>;

    /// Insert a new macroprocess. Status defaults to Active when omitted.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` on missing required fields
    /// - `DatabaseError` on constraint violation (the store's message is
    ///   surfaced, not reinterpreted)
    async fn create(&self, input: NewMacroprocess) -> Result<Macroprocess, DomainError>;

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// - `MacroprocessNotFound` if no row matches the id
    /// - `DatabaseError` on persistence failure
    async fn update(
        &self,
        id: MacroprocessId,
        patch: MacroprocessUpdate,
    ) -> Result<Macroprocess, DomainError>;

    /// Delete the row. The dependent-children guard runs above this port;
    /// implementations only issue the raw delete.
    ///
    /// # Errors
    ///
    /// - `MacroprocessNotFound` if no row matches the id
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: MacroprocessId) -> Result<(), DomainError>;

    /// Bounded existence check for dependent processes (`LIMIT 1`).
    async fn has_processes(&self, id: MacroprocessId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macroprocess_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MacroprocessRepository) {}
    }
}
