//! Derived catalog statistics for the dashboard.

use serde::{Deserialize, Serialize};

use super::macroprocess::{MacroprocessKind, MacroprocessWithProcesses};
use super::process::ProcessWithSubprocesses;
use super::subprocess::SubprocessRecord;

/// Count of macroprocesses of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCount {
    pub kind: MacroprocessKind,
    pub count: usize,
}

/// Totals and activity counts per hierarchy level, plus the kind
/// distribution of macroprocesses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStatistics {
    pub total_macroprocesses: usize,
    pub active_macroprocesses: usize,
    pub total_processes: usize,
    pub active_processes: usize,
    pub total_subprocesses: usize,
    pub active_subprocesses: usize,
    /// One entry per kind, in canonical order, zero counts included.
    pub by_kind: Vec<KindCount>,
}

impl CatalogStatistics {
    pub fn compute(
        macroprocesses: &[MacroprocessWithProcesses],
        processes: &[ProcessWithSubprocesses],
        subprocesses: &[SubprocessRecord],
    ) -> Self {
        let by_kind = MacroprocessKind::ALL
            .into_iter()
            .map(|kind| KindCount {
                kind,
                count: macroprocesses
                    .iter()
                    .filter(|m| m.macroprocess.kind == kind)
                    .count(),
            })
            .collect();

        Self {
            total_macroprocesses: macroprocesses.len(),
            active_macroprocesses: macroprocesses
                .iter()
                .filter(|m| m.macroprocess.status.is_active())
                .count(),
            total_processes: processes.len(),
            active_processes: processes
                .iter()
                .filter(|p| p.process.status.is_active())
                .count(),
            total_subprocesses: subprocesses.len(),
            active_subprocesses: subprocesses
                .iter()
                .filter(|s| s.subprocess.status.is_active())
                .count(),
            by_kind,
        }
    }
}
