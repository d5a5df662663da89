//! CatalogStore - the cache coordinator over the repository ports.
//!
//! Owns the current [`CatalogSnapshot`] and serializes each mutation with
//! its follow-up re-fetch behind a per-entity-kind gate, so overlapping
//! writes to the same kind cannot interleave their refreshes. Reads are
//! cheap `Arc` clones of the installed snapshot.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::domain::foundation::{DomainError, MacroprocessId, ProcessId, SubprocessId};
use crate::domain::organization::{
    CatalogStatistics, DashboardFilters, FilteredCatalog, FilteredViewCache, Macroprocess,
    MacroprocessFilter, MacroprocessUpdate, MacroprocessWithProcesses, NewMacroprocess,
    NewProcess, NewSubprocess, Process, ProcessFilter, ProcessTree, ProcessUpdate,
    ProcessWithSubprocesses, Subprocess, SubprocessFilter, SubprocessRecord, SubprocessUpdate,
    TreeFilter,
};
use crate::ports::{MacroprocessRepository, ProcessRepository, SubprocessRepository};

use super::snapshot::CatalogSnapshot;

/// Cache coordinator for the catalog collections.
pub struct CatalogStore {
    macroprocesses: Arc<dyn MacroprocessRepository>,
    processes: Arc<dyn ProcessRepository>,
    subprocesses: Arc<dyn SubprocessRepository>,
    snapshot: RwLock<Arc<CatalogSnapshot>>,
    macroprocess_gate: Mutex<()>,
    process_gate: Mutex<()>,
    subprocess_gate: Mutex<()>,
    view_cache: std::sync::Mutex<FilteredViewCache>,
}

impl CatalogStore {
    pub fn new(
        macroprocesses: Arc<dyn MacroprocessRepository>,
        processes: Arc<dyn ProcessRepository>,
        subprocesses: Arc<dyn SubprocessRepository>,
    ) -> Self {
        Self {
            macroprocesses,
            processes,
            subprocesses,
            snapshot: RwLock::new(Arc::new(CatalogSnapshot::empty())),
            macroprocess_gate: Mutex::new(()),
            process_gate: Mutex::new(()),
            subprocess_gate: Mutex::new(()),
            view_cache: std::sync::Mutex::new(FilteredViewCache::new()),
        }
    }

    /// The currently installed snapshot.
    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    pub async fn generation(&self) -> u64 {
        self.snapshot.read().await.generation
    }

    /// Re-fetches all three collections and installs a new snapshot.
    ///
    /// Every mutation pays this full re-fetch; there is no partial
    /// patch-and-reconcile of the cache.
    pub async fn refresh(&self) -> Result<Arc<CatalogSnapshot>, DomainError> {
        let macroprocess_filter = MacroprocessFilter::new();
        let process_filter = ProcessFilter::new();
        let subprocess_filter = SubprocessFilter::new();
        let (macroprocesses, processes, subprocesses) = futures::try_join!(
            self.macroprocesses.fetch_many(&macroprocess_filter),
            self.processes.fetch_many(&process_filter),
            self.subprocesses.fetch_many(&subprocess_filter),
        )
        .map_err(|e| {
            warn!(error = %e, "Catalog refresh failed");
            e
        })?;

        let mut guard = self.snapshot.write().await;
        let next = Arc::new(CatalogSnapshot {
            generation: guard.generation + 1,
            macroprocesses,
            processes,
            subprocesses,
        });
        *guard = Arc::clone(&next);
        debug!(
            generation = next.generation,
            macroprocesses = next.macroprocesses.len(),
            processes = next.processes.len(),
            subprocesses = next.subprocesses.len(),
            "Catalog snapshot installed"
        );
        Ok(next)
    }

    // ════════════════════════════════════════════════════════════════════
    // Filtered pass-through queries
    // ════════════════════════════════════════════════════════════════════

    pub async fn list_macroprocesses(
        &self,
        filter: &MacroprocessFilter,
    ) -> Result<Vec<MacroprocessWithProcesses>, DomainError> {
        self.macroprocesses.fetch_many(filter).await
    }

    pub async fn list_processes(
        &self,
        filter: &ProcessFilter,
    ) -> Result<Vec<ProcessWithSubprocesses>, DomainError> {
        self.processes.fetch_many(filter).await
    }

    pub async fn list_subprocesses(
        &self,
        filter: &SubprocessFilter,
    ) -> Result<Vec<SubprocessRecord>, DomainError> {
        self.subprocesses.fetch_many(filter).await
    }

    // ════════════════════════════════════════════════════════════════════
    // Macroprocess lifecycle
    // ════════════════════════════════════════════════════════════════════

    pub async fn create_macroprocess(
        &self,
        input: NewMacroprocess,
    ) -> Result<Macroprocess, DomainError> {
        input.validate()?;
        let _gate = self.macroprocess_gate.lock().await;
        let created = self.macroprocesses.create(input).await?;
        info!(id = %created.id, name = %created.name, "Macroprocess created");
        self.refresh().await?;
        Ok(created)
    }

    pub async fn update_macroprocess(
        &self,
        id: MacroprocessId,
        patch: MacroprocessUpdate,
    ) -> Result<Macroprocess, DomainError> {
        patch.validate()?;
        let _gate = self.macroprocess_gate.lock().await;
        let updated = self.macroprocesses.update(id, patch).await?;
        info!(id = %updated.id, "Macroprocess updated");
        self.refresh().await?;
        Ok(updated)
    }

    /// Deletes a macroprocess unless it still owns processes.
    ///
    /// The pre-check runs before the store delete is issued; when children
    /// exist, no delete reaches the store.
    pub async fn delete_macroprocess(&self, id: MacroprocessId) -> Result<(), DomainError> {
        let _gate = self.macroprocess_gate.lock().await;
        if self.macroprocesses.has_processes(id).await? {
            return Err(DomainError::dependent_records("macroprocess"));
        }
        self.macroprocesses.delete(id).await?;
        info!(id = %id, "Macroprocess deleted");
        self.refresh().await?;
        Ok(())
    }

    // ════════════════════════════════════════════════════════════════════
    // Process lifecycle
    // ════════════════════════════════════════════════════════════════════

    pub async fn create_process(&self, input: NewProcess) -> Result<Process, DomainError> {
        input.validate()?;
        let _gate = self.process_gate.lock().await;
        let created = self.processes.create(input).await?;
        info!(id = %created.id, name = %created.name, "Process created");
        self.refresh().await?;
        Ok(created)
    }

    pub async fn update_process(
        &self,
        id: ProcessId,
        patch: ProcessUpdate,
    ) -> Result<Process, DomainError> {
        patch.validate()?;
        let _gate = self.process_gate.lock().await;
        let updated = self.processes.update(id, patch).await?;
        info!(id = %updated.id, "Process updated");
        self.refresh().await?;
        Ok(updated)
    }

    /// Deletes a process unless it still owns subprocesses.
    pub async fn delete_process(&self, id: ProcessId) -> Result<(), DomainError> {
        let _gate = self.process_gate.lock().await;
        if self.processes.has_subprocesses(id).await? {
            return Err(DomainError::dependent_records("process"));
        }
        self.processes.delete(id).await?;
        info!(id = %id, "Process deleted");
        self.refresh().await?;
        Ok(())
    }

    // ════════════════════════════════════════════════════════════════════
    // Subprocess lifecycle
    // ════════════════════════════════════════════════════════════════════

    pub async fn create_subprocess(
        &self,
        input: NewSubprocess,
    ) -> Result<Subprocess, DomainError> {
        input.validate()?;
        let _gate = self.subprocess_gate.lock().await;
        let created = self.subprocesses.create(input).await?;
        info!(id = %created.id, name = %created.name, "Subprocess created");
        self.refresh().await?;
        Ok(created)
    }

    pub async fn update_subprocess(
        &self,
        id: SubprocessId,
        patch: SubprocessUpdate,
    ) -> Result<Subprocess, DomainError> {
        patch.validate()?;
        let _gate = self.subprocess_gate.lock().await;
        let updated = self.subprocesses.update(id, patch).await?;
        info!(id = %updated.id, "Subprocess updated");
        self.refresh().await?;
        Ok(updated)
    }

    /// Subprocesses are leaves; deletion needs no dependent check.
    pub async fn delete_subprocess(&self, id: SubprocessId) -> Result<(), DomainError> {
        let _gate = self.subprocess_gate.lock().await;
        self.subprocesses.delete(id).await?;
        info!(id = %id, "Subprocess deleted");
        self.refresh().await?;
        Ok(())
    }

    // ════════════════════════════════════════════════════════════════════
    // Derived read models
    // ════════════════════════════════════════════════════════════════════

    /// Builds the full three-level tree from the current snapshot.
    pub async fn hierarchy(&self) -> ProcessTree {
        let snapshot = self.snapshot().await;
        ProcessTree::build(&snapshot.macroprocesses)
    }

    /// Builds the tree and prunes it with the ancestor-preserving filter.
    pub async fn hierarchy_filtered(&self, filter: &TreeFilter) -> ProcessTree {
        self.hierarchy().await.retain(filter)
    }

    /// Derived statistics over the current snapshot.
    pub async fn statistics(&self) -> CatalogStatistics {
        let snapshot = self.snapshot().await;
        CatalogStatistics::compute(
            &snapshot.macroprocesses,
            &snapshot.processes,
            &snapshot.subprocesses,
        )
    }

    /// Memoized dashboard view for the given filter state.
    pub async fn dashboard_view(&self, filters: &DashboardFilters) -> Arc<FilteredCatalog> {
        let snapshot = self.snapshot().await;
        let mut cache = self.view_cache.lock().expect("view cache poisoned");
        cache.get_or_compute(
            snapshot.generation,
            &snapshot.macroprocesses,
            &snapshot.processes,
            &snapshot.subprocesses,
            filters,
        )
    }
}
