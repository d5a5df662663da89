//! HTTP DTOs for the catalog CRUD endpoints.
//!
//! Request shapes decouple the HTTP API from the repository inputs; list
//! responses serialize the enriched domain records directly, since those
//! are the wire shapes the presentation layer consumes.

use serde::Deserialize;

use crate::adapters::http::StatusParam;
use crate::domain::foundation::{MacroprocessId, ProcessId, RecordStatus};
use crate::domain::organization::{
    MacroprocessCriterion, MacroprocessFilter, MacroprocessKind, MacroprocessUpdate,
    NewMacroprocess, NewProcess, NewSubprocess, ProcessCriterion, ProcessFilter, ProcessUpdate,
    SubprocessCriterion, SubprocessFilter, SubprocessUpdate,
};

// ════════════════════════════════════════════════════════════════════════════
// Macroprocess
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a macroprocess.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMacroprocessRequest {
    pub kind: MacroprocessKind,
    pub name: String,
    #[serde(default)]
    pub external_link: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
}

impl From<CreateMacroprocessRequest> for NewMacroprocess {
    fn from(req: CreateMacroprocessRequest) -> Self {
        Self {
            kind: req.kind,
            name: req.name,
            external_link: req.external_link,
            status: req.status,
        }
    }
}

/// Request to partially update a macroprocess.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMacroprocessRequest {
    #[serde(default)]
    pub kind: Option<MacroprocessKind>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub external_link: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
}

impl From<UpdateMacroprocessRequest> for MacroprocessUpdate {
    fn from(req: UpdateMacroprocessRequest) -> Self {
        Self {
            kind: req.kind,
            name: req.name,
            external_link: req.external_link,
            status: req.status,
        }
    }
}

/// Query parameters for listing macroprocesses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMacroprocessesQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub kind: Option<MacroprocessKind>,
    #[serde(default)]
    pub status: Option<StatusParam>,
}

impl ListMacroprocessesQuery {
    pub fn into_filter(self) -> MacroprocessFilter {
        let mut filter = MacroprocessFilter::new();
        if let Some(search) = self.search.filter(|s| !s.trim().is_empty()) {
            filter = filter.with(MacroprocessCriterion::Search(search));
        }
        if let Some(kind) = self.kind {
            filter = filter.with(MacroprocessCriterion::Kind(kind));
        }
        if let Some(status) = self.status.and_then(StatusParam::to_criterion) {
            filter = filter.with(MacroprocessCriterion::Status(status));
        }
        filter
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Process
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a process.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProcessRequest {
    pub macroprocess_id: MacroprocessId,
    pub name: String,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub manual_link: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
}

impl From<CreateProcessRequest> for NewProcess {
    fn from(req: CreateProcessRequest) -> Self {
        Self {
            macroprocess_id: req.macroprocess_id,
            name: req.name,
            responsible: req.responsible,
            objective: req.objective,
            manual_link: req.manual_link,
            status: req.status,
        }
    }
}

/// Request to partially update a process.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProcessRequest {
    #[serde(default)]
    pub macroprocess_id: Option<MacroprocessId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub manual_link: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
}

impl From<UpdateProcessRequest> for ProcessUpdate {
    fn from(req: UpdateProcessRequest) -> Self {
        Self {
            macroprocess_id: req.macroprocess_id,
            name: req.name,
            responsible: req.responsible,
            objective: req.objective,
            manual_link: req.manual_link,
            status: req.status,
        }
    }
}

/// Query parameters for listing processes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProcessesQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub macroprocess_id: Option<MacroprocessId>,
    #[serde(default)]
    pub status: Option<StatusParam>,
}

impl ListProcessesQuery {
    pub fn into_filter(self) -> ProcessFilter {
        let mut filter = ProcessFilter::new();
        if let Some(search) = self.search.filter(|s| !s.trim().is_empty()) {
            filter = filter.with(ProcessCriterion::Search(search));
        }
        if let Some(id) = self.macroprocess_id {
            filter = filter.with(ProcessCriterion::Macroprocesses(vec![id]));
        }
        if let Some(status) = self.status.and_then(StatusParam::to_criterion) {
            filter = filter.with(ProcessCriterion::Status(status));
        }
        filter
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Subprocess
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a subprocess.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubprocessRequest {
    pub process_id: ProcessId,
    pub name: String,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(default)]
    pub manual_link: Option<String>,
    #[serde(default)]
    pub external_link: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
}

impl From<CreateSubprocessRequest> for NewSubprocess {
    fn from(req: CreateSubprocessRequest) -> Self {
        Self {
            process_id: req.process_id,
            name: req.name,
            responsible: req.responsible,
            manual_link: req.manual_link,
            external_link: req.external_link,
            status: req.status,
        }
    }
}

/// Request to partially update a subprocess.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubprocessRequest {
    #[serde(default)]
    pub process_id: Option<ProcessId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(default)]
    pub manual_link: Option<String>,
    #[serde(default)]
    pub external_link: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
}

impl From<UpdateSubprocessRequest> for SubprocessUpdate {
    fn from(req: UpdateSubprocessRequest) -> Self {
        Self {
            process_id: req.process_id,
            name: req.name,
            responsible: req.responsible,
            manual_link: req.manual_link,
            external_link: req.external_link,
            status: req.status,
        }
    }
}

/// Query parameters for listing subprocesses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSubprocessesQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub process_id: Option<ProcessId>,
    #[serde(default)]
    pub status: Option<StatusParam>,
}

impl ListSubprocessesQuery {
    pub fn into_filter(self) -> SubprocessFilter {
        let mut filter = SubprocessFilter::new();
        if let Some(search) = self.search.filter(|s| !s.trim().is_empty()) {
            filter = filter.with(SubprocessCriterion::Search(search));
        }
        if let Some(id) = self.process_id {
            filter = filter.with(SubprocessCriterion::Processes(vec![id]));
        }
        if let Some(status) = self.status.and_then(StatusParam::to_criterion) {
            filter = filter.with(SubprocessCriterion::Status(status));
        }
        filter
    }
}
