//! Subprocess entity - leaf level of the organizational hierarchy.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ProcessId, RecordStatus, SubprocessId, Timestamp};

/// A leaf-level activity belonging to one process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subprocess {
    pub id: SubprocessId,
    pub process_id: ProcessId,
    pub name: String,
    pub responsible: Option<String>,
    pub manual_link: Option<String>,
    pub external_link: Option<String>,
    pub status: RecordStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subprocess {
    /// Derived publication flag: true iff a manual link is present and
    /// non-empty. Never stored.
    pub fn published(&self) -> bool {
        self.manual_link.as_deref().is_some_and(|link| !link.is_empty())
    }
}

/// A subprocess enriched with its ancestor names, as returned by
/// `fetch_many`. A name search on subprocesses also matches the owning
/// process or macroprocess name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubprocessRecord {
    #[serde(flatten)]
    pub subprocess: Subprocess,
    pub process_name: Option<String>,
    pub macroprocess_name: Option<String>,
}

/// Input for creating a subprocess.
#[derive(Debug, Clone)]
pub struct NewSubprocess {
    pub process_id: ProcessId,
    pub name: String,
    pub responsible: Option<String>,
    pub manual_link: Option<String>,
    pub external_link: Option<String>,
    /// Defaults to Active when omitted.
    pub status: Option<RecordStatus>,
}

impl NewSubprocess {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name", "Name is required"));
        }
        Ok(())
    }
}

/// Partial update for a subprocess. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct SubprocessUpdate {
    pub process_id: Option<ProcessId>,
    pub name: Option<String>,
    pub responsible: Option<String>,
    pub manual_link: Option<String>,
    pub external_link: Option<String>,
    pub status: Option<RecordStatus>,
}

impl SubprocessUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name", "Name cannot be empty"));
            }
        }
        Ok(())
    }
}
