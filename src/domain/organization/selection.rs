//! Dashboard filter engine.
//!
//! Combines the interactively selected macroprocess cards with the
//! modal-configured multi-select filters into one derived view of the flat
//! collections. Filters AND-combine across categories and OR-combine within
//! a category; the computation is a pure function of its inputs and is
//! memoized on (snapshot generation, filters).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MacroprocessId, ProcessId, SubprocessId};

use super::filter::{
    MacroprocessCriterion, MacroprocessFilter, ProcessCriterion, ProcessFilter,
    SubprocessCriterion, SubprocessFilter,
};
use super::macroprocess::MacroprocessWithProcesses;
use super::process::ProcessWithSubprocesses;
use super::subprocess::SubprocessRecord;

/// Modal-configured multi-select filters. Empty lists are inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalFilters {
    #[serde(default)]
    pub macroprocess_ids: Vec<MacroprocessId>,
    #[serde(default)]
    pub process_ids: Vec<ProcessId>,
    #[serde(default)]
    pub subprocess_ids: Vec<SubprocessId>,
    #[serde(default)]
    pub responsibles: Vec<String>,
    #[serde(default)]
    pub published: Vec<bool>,
}

impl ModalFilters {
    pub fn is_empty(&self) -> bool {
        self.macroprocess_ids.is_empty()
            && self.process_ids.is_empty()
            && self.subprocess_ids.is_empty()
            && self.responsibles.is_empty()
            && self.published.is_empty()
    }
}

/// The full dashboard filter state: card selection plus modal filters.
///
/// This shape is the wire format between the presentation layer and the
/// filter engine; it round-trips through serialization unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardFilters {
    /// Macroprocess ids selected on dashboard cards.
    #[serde(default)]
    pub selected_macroprocesses: Vec<MacroprocessId>,
    #[serde(default)]
    pub modal: ModalFilters,
}

impl DashboardFilters {
    pub fn is_empty(&self) -> bool {
        self.selected_macroprocesses.is_empty() && self.modal.is_empty()
    }
}

/// The filtered triples derived from the flat collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredCatalog {
    pub macroprocesses: Vec<MacroprocessWithProcesses>,
    pub processes: Vec<ProcessWithSubprocesses>,
    pub subprocesses: Vec<SubprocessRecord>,
}

impl FilteredCatalog {
    /// Applies the dashboard filters to the flat collections.
    ///
    /// Composition order: card selection first, then the modal categories.
    /// Inputs are never mutated; retained rows are cloned into the result.
    pub fn compute(
        macroprocesses: &[MacroprocessWithProcesses],
        processes: &[ProcessWithSubprocesses],
        subprocesses: &[SubprocessRecord],
        filters: &DashboardFilters,
    ) -> Self {
        if filters.is_empty() {
            return Self {
                macroprocesses: macroprocesses.to_vec(),
                processes: processes.to_vec(),
                subprocesses: subprocesses.to_vec(),
            };
        }

        let mut macro_filter = MacroprocessFilter::new();
        let mut process_filter = ProcessFilter::new();
        let mut subprocess_filter = SubprocessFilter::new();

        let selection = &filters.selected_macroprocesses;
        if !selection.is_empty() {
            macro_filter = macro_filter.with(MacroprocessCriterion::Ids(selection.clone()));
            process_filter =
                process_filter.with(ProcessCriterion::Macroprocesses(selection.clone()));
            // A subprocess qualifies when its owning process belongs to a
            // selected macroprocess; resolve the chain through the full
            // process collection.
            let owned_processes: Vec<ProcessId> = processes
                .iter()
                .filter(|p| selection.contains(&p.process.macroprocess_id))
                .map(|p| p.process.id)
                .collect();
            subprocess_filter =
                subprocess_filter.with(SubprocessCriterion::Processes(owned_processes));
        }

        let modal = &filters.modal;
        if !modal.macroprocess_ids.is_empty() {
            macro_filter =
                macro_filter.with(MacroprocessCriterion::Ids(modal.macroprocess_ids.clone()));
            process_filter = process_filter.with(ProcessCriterion::Macroprocesses(
                modal.macroprocess_ids.clone(),
            ));
        }
        if !modal.process_ids.is_empty() {
            process_filter = process_filter.with(ProcessCriterion::Ids(modal.process_ids.clone()));
        }
        if !modal.subprocess_ids.is_empty() {
            subprocess_filter =
                subprocess_filter.with(SubprocessCriterion::Ids(modal.subprocess_ids.clone()));
        }
        if !modal.responsibles.is_empty() {
            process_filter =
                process_filter.with(ProcessCriterion::Responsibles(modal.responsibles.clone()));
        }
        if !modal.published.is_empty() {
            process_filter =
                process_filter.with(ProcessCriterion::Published(modal.published.clone()));
            subprocess_filter =
                subprocess_filter.with(SubprocessCriterion::Published(modal.published.clone()));
        }

        Self {
            macroprocesses: macroprocesses
                .iter()
                .filter(|m| macro_filter.matches(m))
                .cloned()
                .collect(),
            processes: processes
                .iter()
                .filter(|p| process_filter.matches(p))
                .cloned()
                .collect(),
            subprocesses: subprocesses
                .iter()
                .filter(|s| subprocess_filter.matches(s))
                .cloned()
                .collect(),
        }
    }
}

/// Memoizes the last computed view, keyed on snapshot generation and the
/// filter state. A repeated call with unchanged inputs returns the cached
/// result without recomputing.
#[derive(Debug, Default)]
pub struct FilteredViewCache {
    last: Option<(u64, DashboardFilters, Arc<FilteredCatalog>)>,
}

impl FilteredViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        generation: u64,
        macroprocesses: &[MacroprocessWithProcesses],
        processes: &[ProcessWithSubprocesses],
        subprocesses: &[SubprocessRecord],
        filters: &DashboardFilters,
    ) -> Arc<FilteredCatalog> {
        if let Some((cached_generation, cached_filters, result)) = &self.last {
            if *cached_generation == generation && cached_filters == filters {
                return Arc::clone(result);
            }
        }

        let result = Arc::new(FilteredCatalog::compute(
            macroprocesses,
            processes,
            subprocesses,
            filters,
        ));
        self.last = Some((generation, filters.clone(), Arc::clone(&result)));
        result
    }
}
