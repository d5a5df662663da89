//! Macroprocess entity - top level of the organizational hierarchy.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, MacroprocessId, RecordStatus, Timestamp,
};

use super::process::ProcessWithSubprocesses;

/// Classification of a macroprocess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroprocessKind {
    Strategic,
    Operational,
    Support,
    Managerial,
}

impl MacroprocessKind {
    /// All kinds in their canonical display order.
    pub const ALL: [MacroprocessKind; 4] = [
        MacroprocessKind::Strategic,
        MacroprocessKind::Operational,
        MacroprocessKind::Support,
        MacroprocessKind::Managerial,
    ];

    /// Database representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MacroprocessKind::Strategic => "strategic",
            MacroprocessKind::Operational => "operational",
            MacroprocessKind::Support => "support",
            MacroprocessKind::Managerial => "managerial",
        }
    }

    /// Parses the database representation.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "strategic" => Ok(MacroprocessKind::Strategic),
            "operational" => Ok(MacroprocessKind::Operational),
            "support" => Ok(MacroprocessKind::Support),
            "managerial" => Ok(MacroprocessKind::Managerial),
            _ => Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid macroprocess kind: {}", s),
            )),
        }
    }
}

/// A top-level organizational process category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macroprocess {
    pub id: MacroprocessId,
    pub kind: MacroprocessKind,
    pub name: String,
    pub external_link: Option<String>,
    pub status: RecordStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A macroprocess enriched with its process children, as returned by
/// `fetch_many`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroprocessWithProcesses {
    #[serde(flatten)]
    pub macroprocess: Macroprocess,
    pub processes: Vec<ProcessWithSubprocesses>,
}

impl MacroprocessWithProcesses {
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }
}

/// Input for creating a macroprocess.
#[derive(Debug, Clone)]
pub struct NewMacroprocess {
    pub kind: MacroprocessKind,
    pub name: String,
    pub external_link: Option<String>,
    /// Defaults to Active when omitted.
    pub status: Option<RecordStatus>,
}

impl NewMacroprocess {
    /// Minimal required-field check. Format validation (URL shape) belongs
    /// to the presentation layer.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name", "Name is required"));
        }
        Ok(())
    }
}

/// Partial update for a macroprocess. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct MacroprocessUpdate {
    pub kind: Option<MacroprocessKind>,
    pub name: Option<String>,
    pub external_link: Option<String>,
    pub status: Option<RecordStatus>,
}

impl MacroprocessUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name", "Name cannot be empty"));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.name.is_none()
            && self.external_link.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_conversion_roundtrips() {
        for kind in MacroprocessKind::ALL {
            assert_eq!(MacroprocessKind::parse(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn kind_parse_rejects_unknown() {
        assert!(MacroprocessKind::parse("tactical").is_err());
    }

    #[test]
    fn new_macroprocess_requires_name() {
        let input = NewMacroprocess {
            kind: MacroprocessKind::Strategic,
            name: "   ".to_string(),
            external_link: None,
            status: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn update_with_no_fields_is_empty() {
        assert!(MacroprocessUpdate::default().is_empty());
    }

    #[test]
    fn enriched_shape_flattens_the_record() {
        let record = MacroprocessWithProcesses {
            macroprocess: Macroprocess {
                id: MacroprocessId::new(),
                kind: MacroprocessKind::Support,
                name: "Water Supply".to_string(),
                external_link: None,
                status: RecordStatus::Active,
                created_at: Timestamp::now(),
                updated_at: Timestamp::now(),
            },
            processes: vec![],
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Water Supply");
        assert_eq!(json["kind"], "support");
        assert!(json["processes"].as_array().unwrap().is_empty());
    }
}
