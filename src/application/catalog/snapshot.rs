//! In-memory snapshot of the catalog collections.

use crate::domain::organization::{
    MacroprocessWithProcesses, ProcessWithSubprocesses, SubprocessRecord,
};

/// The three enriched collections as of one refresh, plus a generation
/// counter.
///
/// Snapshots are immutable once installed and replaced wholesale on every
/// successful refresh; the generation lets callers detect staleness instead
/// of trusting whichever fetch resolved last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub generation: u64,
    pub macroprocesses: Vec<MacroprocessWithProcesses>,
    pub processes: Vec<ProcessWithSubprocesses>,
    pub subprocesses: Vec<SubprocessRecord>,
}

impl CatalogSnapshot {
    /// The pre-load snapshot: generation zero, all collections empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.macroprocesses.is_empty()
            && self.processes.is_empty()
            && self.subprocesses.is_empty()
    }
}
