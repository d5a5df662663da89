//! Closed filter-criteria types, one per entity kind.
//!
//! A filter is an AND-combination of criteria; list-valued criteria are
//! OR-combinations (inclusion) within their category. The absence of a
//! `Status` criterion is the "all statuses" case. The same criteria drive
//! both the repository queries and in-memory matching over cached rows.

use crate::domain::foundation::{MacroprocessId, ProcessId, RecordStatus, SubprocessId};

use super::macroprocess::{MacroprocessKind, MacroprocessWithProcesses};
use super::process::ProcessWithSubprocesses;
use super::subprocess::SubprocessRecord;

/// Case-insensitive substring match.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn any_name_matches(names: &[Option<&str>], needle: &str) -> bool {
    names
        .iter()
        .any(|name| name.is_some_and(|n| contains_ci(n, needle)))
}

// ════════════════════════════════════════════════════════════════════════════
// Macroprocess criteria
// ════════════════════════════════════════════════════════════════════════════

/// One filter criterion over macroprocesses.
#[derive(Debug, Clone, PartialEq)]
pub enum MacroprocessCriterion {
    /// Restrict to these ids (inclusion).
    Ids(Vec<MacroprocessId>),
    /// Case-insensitive substring match on the name.
    Search(String),
    /// Exact kind match.
    Kind(MacroprocessKind),
    /// Exact status match. Absence of this criterion means "all".
    Status(RecordStatus),
}

impl MacroprocessCriterion {
    pub fn matches(&self, record: &MacroprocessWithProcesses) -> bool {
        let m = &record.macroprocess;
        match self {
            MacroprocessCriterion::Ids(ids) => ids.contains(&m.id),
            MacroprocessCriterion::Search(text) => contains_ci(&m.name, text),
            MacroprocessCriterion::Kind(kind) => m.kind == *kind,
            MacroprocessCriterion::Status(status) => m.status == *status,
        }
    }
}

/// AND-combination of macroprocess criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacroprocessFilter {
    criteria: Vec<MacroprocessCriterion>,
}

impl MacroprocessFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, criterion: MacroprocessCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn criteria(&self) -> &[MacroprocessCriterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, record: &MacroprocessWithProcesses) -> bool {
        self.criteria.iter().all(|c| c.matches(record))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Process criteria
// ════════════════════════════════════════════════════════════════════════════

/// One filter criterion over processes.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessCriterion {
    /// Restrict to these ids (inclusion).
    Ids(Vec<ProcessId>),
    /// Case-insensitive substring match on the process name or the owning
    /// macroprocess name.
    Search(String),
    /// Restrict to processes owned by these macroprocesses (inclusion).
    Macroprocesses(Vec<MacroprocessId>),
    /// Exact status match. Absence of this criterion means "all".
    Status(RecordStatus),
    /// Restrict to these responsible parties (inclusion).
    Responsibles(Vec<String>),
    /// Restrict by the derived published flag (inclusion).
    Published(Vec<bool>),
}

impl ProcessCriterion {
    pub fn matches(&self, record: &ProcessWithSubprocesses) -> bool {
        let p = &record.process;
        match self {
            ProcessCriterion::Ids(ids) => ids.contains(&p.id),
            ProcessCriterion::Search(text) => any_name_matches(
                &[Some(&p.name), record.macroprocess_name.as_deref()],
                text,
            ),
            ProcessCriterion::Macroprocesses(ids) => ids.contains(&p.macroprocess_id),
            ProcessCriterion::Status(status) => p.status == *status,
            ProcessCriterion::Responsibles(names) => p
                .responsible
                .as_deref()
                .is_some_and(|r| names.iter().any(|n| n == r)),
            ProcessCriterion::Published(values) => values.contains(&p.published()),
        }
    }
}

/// AND-combination of process criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessFilter {
    criteria: Vec<ProcessCriterion>,
}

impl ProcessFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, criterion: ProcessCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn criteria(&self) -> &[ProcessCriterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, record: &ProcessWithSubprocesses) -> bool {
        self.criteria.iter().all(|c| c.matches(record))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Subprocess criteria
// ════════════════════════════════════════════════════════════════════════════

/// One filter criterion over subprocesses.
#[derive(Debug, Clone, PartialEq)]
pub enum SubprocessCriterion {
    /// Restrict to these ids (inclusion).
    Ids(Vec<SubprocessId>),
    /// Case-insensitive substring match on the subprocess name or either
    /// ancestor name.
    Search(String),
    /// Restrict to subprocesses owned by these processes (inclusion).
    Processes(Vec<ProcessId>),
    /// Exact status match. Absence of this criterion means "all".
    Status(RecordStatus),
    /// Restrict by the derived published flag (inclusion).
    Published(Vec<bool>),
}

impl SubprocessCriterion {
    pub fn matches(&self, record: &SubprocessRecord) -> bool {
        let s = &record.subprocess;
        match self {
            SubprocessCriterion::Ids(ids) => ids.contains(&s.id),
            SubprocessCriterion::Search(text) => any_name_matches(
                &[
                    Some(&s.name),
                    record.process_name.as_deref(),
                    record.macroprocess_name.as_deref(),
                ],
                text,
            ),
            SubprocessCriterion::Processes(ids) => ids.contains(&s.process_id),
            SubprocessCriterion::Status(status) => s.status == *status,
            SubprocessCriterion::Published(values) => values.contains(&s.published()),
        }
    }
}

/// AND-combination of subprocess criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubprocessFilter {
    criteria: Vec<SubprocessCriterion>,
}

impl SubprocessFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, criterion: SubprocessCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn criteria(&self) -> &[SubprocessCriterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, record: &SubprocessRecord) -> bool {
        self.criteria.iter().all(|c| c.matches(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::organization::macroprocess::Macroprocess;
    use crate::domain::organization::process::Process;
    use crate::domain::organization::subprocess::Subprocess;

    fn macroprocess(name: &str, kind: MacroprocessKind) -> MacroprocessWithProcesses {
        MacroprocessWithProcesses {
            macroprocess: Macroprocess {
                id: MacroprocessId::new(),
                kind,
                name: name.to_string(),
                external_link: None,
                status: RecordStatus::Active,
                created_at: Timestamp::now(),
                updated_at: Timestamp::now(),
            },
            processes: vec![],
        }
    }

    fn process(name: &str, macroprocess_name: Option<&str>) -> ProcessWithSubprocesses {
        ProcessWithSubprocesses {
            process: Process {
                id: ProcessId::new(),
                macroprocess_id: MacroprocessId::new(),
                name: name.to_string(),
                responsible: Some("Ana".to_string()),
                objective: None,
                manual_link: Some("https://docs.example/m.pdf".to_string()),
                status: RecordStatus::Active,
                created_at: Timestamp::now(),
                updated_at: Timestamp::now(),
            },
            subprocesses: vec![],
            macroprocess_name: macroprocess_name.map(str::to_string),
        }
    }

    fn subprocess_record(
        name: &str,
        process_name: Option<&str>,
        macroprocess_name: Option<&str>,
    ) -> SubprocessRecord {
        SubprocessRecord {
            subprocess: Subprocess {
                id: SubprocessId::new(),
                process_id: ProcessId::new(),
                name: name.to_string(),
                responsible: None,
                manual_link: None,
                external_link: None,
                status: RecordStatus::Inactive,
                created_at: Timestamp::now(),
                updated_at: Timestamp::now(),
            },
            process_name: process_name.map(str::to_string),
            macroprocess_name: macroprocess_name.map(str::to_string),
        }
    }

    #[test]
    fn search_is_case_insensitive() {
        let record = macroprocess("Water Resources", MacroprocessKind::Strategic);
        let filter =
            MacroprocessFilter::new().with(MacroprocessCriterion::Search("water".to_string()));
        assert!(filter.matches(&record));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let record = macroprocess("Anything", MacroprocessKind::Support);
        assert!(MacroprocessFilter::new().matches(&record));
    }

    #[test]
    fn criteria_are_and_combined() {
        let record = macroprocess("Reservoir Operation", MacroprocessKind::Operational);
        let matching = MacroprocessFilter::new()
            .with(MacroprocessCriterion::Search("reservoir".to_string()))
            .with(MacroprocessCriterion::Kind(MacroprocessKind::Operational));
        let failing = MacroprocessFilter::new()
            .with(MacroprocessCriterion::Search("reservoir".to_string()))
            .with(MacroprocessCriterion::Kind(MacroprocessKind::Strategic));

        assert!(matching.matches(&record));
        assert!(!failing.matches(&record));
    }

    #[test]
    fn process_search_matches_ancestor_name() {
        let record = process("Billing", Some("Finance"));
        let filter = ProcessFilter::new().with(ProcessCriterion::Search("finan".to_string()));
        assert!(filter.matches(&record));
    }

    #[test]
    fn subprocess_search_matches_grandparent_name() {
        let record = subprocess_record("Meter reading", Some("Billing"), Some("Finance"));
        let filter =
            SubprocessFilter::new().with(SubprocessCriterion::Search("FINANCE".to_string()));
        assert!(filter.matches(&record));
    }

    #[test]
    fn published_criterion_uses_the_derivation() {
        let published = process("Billing", None);
        let filter = ProcessFilter::new().with(ProcessCriterion::Published(vec![true]));
        assert!(filter.matches(&published));

        let unpublished = subprocess_record("Meter reading", None, None);
        let sub_filter =
            SubprocessFilter::new().with(SubprocessCriterion::Published(vec![true]));
        assert!(!sub_filter.matches(&unpublished));
    }

    #[test]
    fn responsible_criterion_is_inclusion() {
        let record = process("Billing", None);
        let hit = ProcessFilter::new().with(ProcessCriterion::Responsibles(vec![
            "Ana".to_string(),
            "Bruno".to_string(),
        ]));
        let miss =
            ProcessFilter::new().with(ProcessCriterion::Responsibles(vec!["Bruno".to_string()]));

        assert!(hit.matches(&record));
        assert!(!miss.matches(&record));
    }

    #[test]
    fn absent_status_criterion_means_all() {
        let inactive = subprocess_record("Meter reading", None, None);
        assert!(SubprocessFilter::new().matches(&inactive));

        let only_active =
            SubprocessFilter::new().with(SubprocessCriterion::Status(RecordStatus::Active));
        assert!(!only_active.matches(&inactive));
    }
}
