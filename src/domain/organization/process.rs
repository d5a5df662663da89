//! Process entity - mid level of the organizational hierarchy.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, MacroprocessId, ProcessId, RecordStatus, Timestamp,
};

use super::subprocess::Subprocess;

/// A mid-level operational process belonging to one macroprocess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub id: ProcessId,
    pub macroprocess_id: MacroprocessId,
    pub name: String,
    pub responsible: Option<String>,
    pub objective: Option<String>,
    pub manual_link: Option<String>,
    pub status: RecordStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Process {
    /// Derived publication flag: true iff a manual link is present and
    /// non-empty. Never stored.
    pub fn published(&self) -> bool {
        self.manual_link.as_deref().is_some_and(|link| !link.is_empty())
    }
}

/// A process enriched with its subprocess children and the owning
/// macroprocess name (used for cross-level search and display).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessWithSubprocesses {
    #[serde(flatten)]
    pub process: Process,
    pub subprocesses: Vec<Subprocess>,
    pub macroprocess_name: Option<String>,
}

impl ProcessWithSubprocesses {
    pub fn subprocess_count(&self) -> usize {
        self.subprocesses.len()
    }
}

/// Input for creating a process.
#[derive(Debug, Clone)]
pub struct NewProcess {
    pub macroprocess_id: MacroprocessId,
    pub name: String,
    pub responsible: Option<String>,
    pub objective: Option<String>,
    pub manual_link: Option<String>,
    /// Defaults to Active when omitted.
    pub status: Option<RecordStatus>,
}

impl NewProcess {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name", "Name is required"));
        }
        Ok(())
    }
}

/// Partial update for a process. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProcessUpdate {
    pub macroprocess_id: Option<MacroprocessId>,
    pub name: Option<String>,
    pub responsible: Option<String>,
    pub objective: Option<String>,
    pub manual_link: Option<String>,
    pub status: Option<RecordStatus>,
}

impl ProcessUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name", "Name cannot be empty"));
            }
        }
        Ok(())
    }
}
