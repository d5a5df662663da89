//! Activity status shared by every catalog entity.

use serde::{Deserialize, Serialize};

use super::{DomainError, ErrorCode};

/// Binary activity status of a catalog record.
///
/// New records default to `Active` when the caller omits a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    /// Database representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Inactive => "inactive",
        }
    }

    /// Parses the database representation.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "active" => Ok(RecordStatus::Active),
            "inactive" => Ok(RecordStatus::Inactive),
            _ => Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid record status: {}", s),
            )),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RecordStatus::Active)
    }
}
