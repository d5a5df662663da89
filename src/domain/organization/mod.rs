//! Organization catalog domain: the three-level hierarchy and its derived
//! view models.

mod filter;
mod hierarchy;
mod macroprocess;
mod process;
mod selection;
mod statistics;
mod subprocess;

pub use filter::{
    MacroprocessCriterion, MacroprocessFilter, ProcessCriterion, ProcessFilter,
    SubprocessCriterion, SubprocessFilter,
};
pub use hierarchy::{HierarchyNode, NodeKind, ProcessTree, TreeFilter, MAX_DEPTH};
pub use macroprocess::{
    Macroprocess, MacroprocessKind, MacroprocessUpdate, MacroprocessWithProcesses,
    NewMacroprocess,
};
pub use process::{NewProcess, Process, ProcessUpdate, ProcessWithSubprocesses};
pub use selection::{
    DashboardFilters, FilteredCatalog, FilteredViewCache, ModalFilters,
};
pub use statistics::{CatalogStatistics, KindCount};
pub use subprocess::{NewSubprocess, Subprocess, SubprocessRecord, SubprocessUpdate};
