//! Integration tests for the catalog HTTP endpoints.
//!
//! These tests verify the wiring from HTTP handlers through the catalog
//! store down to the repository ports, using in-memory repositories:
//! 1. Request DTOs deserialize and map to repository inputs
//! 2. Responses carry the {success, data|error} envelope with the right
//!    status codes
//! 3. The delete guard and derived read models behave end to end

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde_json::{json, Value};

use asgrc_catalog::adapters::http::catalog::dto::{
    CreateMacroprocessRequest, CreateProcessRequest, CreateSubprocessRequest,
    ListMacroprocessesQuery, UpdateProcessRequest,
};
use asgrc_catalog::adapters::http::catalog::handlers::{
    create_macroprocess, create_process, create_subprocess, delete_macroprocess,
    list_macroprocesses, update_process,
};
use asgrc_catalog::adapters::http::dashboard::dto::HierarchyQuery;
use asgrc_catalog::adapters::http::dashboard::handlers::{
    filter_dashboard, get_hierarchy, get_statistics,
};
use asgrc_catalog::application::catalog::CatalogStore;
use asgrc_catalog::domain::foundation::{
    DomainError, ErrorCode, MacroprocessId, ProcessId, SubprocessId, Timestamp,
};
use asgrc_catalog::domain::organization::{
    DashboardFilters, Macroprocess, MacroprocessFilter, MacroprocessUpdate,
    MacroprocessWithProcesses, ModalFilters, NewMacroprocess, NewProcess, NewSubprocess,
    Process, ProcessFilter, ProcessUpdate, ProcessWithSubprocesses, Subprocess,
    SubprocessFilter, SubprocessRecord, SubprocessUpdate,
};
use asgrc_catalog::ports::{MacroprocessRepository, ProcessRepository, SubprocessRepository};

// =============================================================================
// Test infrastructure
// =============================================================================

/// Shared in-memory tables backing all three mock repositories.
#[derive(Default)]
struct InMemoryCatalog {
    macroprocesses: Mutex<Vec<Macroprocess>>,
    processes: Mutex<Vec<Process>>,
    subprocesses: Mutex<Vec<Subprocess>>,
}

impl InMemoryCatalog {
    fn enriched_processes(&self) -> Vec<ProcessWithSubprocesses> {
        let macros = self.macroprocesses.lock().unwrap();
        let subs = self.subprocesses.lock().unwrap();
        self.processes
            .lock()
            .unwrap()
            .iter()
            .map(|process| {
                let mut subprocesses: Vec<Subprocess> = subs
                    .iter()
                    .filter(|s| s.process_id == process.id)
                    .cloned()
                    .collect();
                subprocesses.sort_by(|a, b| a.name.cmp(&b.name));
                ProcessWithSubprocesses {
                    process: process.clone(),
                    subprocesses,
                    macroprocess_name: macros
                        .iter()
                        .find(|m| m.id == process.macroprocess_id)
                        .map(|m| m.name.clone()),
                }
            })
            .collect()
    }
}

struct MockMacroprocessRepository {
    catalog: Arc<InMemoryCatalog>,
}

#[async_trait]
impl MacroprocessRepository for MockMacroprocessRepository {
    async fn fetch_many(
        &self,
        filter: &MacroprocessFilter,
    ) -> Result<Vec<MacroprocessWithProcesses>, DomainError> {
        let children = self.catalog.enriched_processes();
        let mut rows: Vec<MacroprocessWithProcesses> = self
            .catalog
            .macroprocesses
            .lock()
            .unwrap()
            .iter()
            .map(|macroprocess| {
                let mut processes: Vec<ProcessWithSubprocesses> = children
                    .iter()
                    .filter(|p| p.process.macroprocess_id == macroprocess.id)
                    .cloned()
                    .collect();
                processes.sort_by(|a, b| a.process.name.cmp(&b.process.name));
                MacroprocessWithProcesses {
                    macroprocess: macroprocess.clone(),
                    processes,
                }
            })
            .filter(|r| filter.matches(r))
            .collect();
        rows.sort_by(|a, b| a.macroprocess.name.cmp(&b.macroprocess.name));
        Ok(rows)
    }

    async fn create(&self, input: NewMacroprocess) -> Result<Macroprocess, DomainError> {
        let row = Macroprocess {
            id: MacroprocessId::new(),
            kind: input.kind,
            name: input.name,
            external_link: input.external_link,
            status: input.status.unwrap_or_default(),
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        };
        self.catalog.macroprocesses.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: MacroprocessId,
        patch: MacroprocessUpdate,
    ) -> Result<Macroprocess, DomainError> {
        let mut rows = self.catalog.macroprocesses.lock().unwrap();
        let row = rows.iter_mut().find(|r| r.id == id).ok_or_else(|| {
            DomainError::new(ErrorCode::MacroprocessNotFound, "Macroprocess not found")
        })?;
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(kind) = patch.kind {
            row.kind = kind;
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: MacroprocessId) -> Result<(), DomainError> {
        let mut rows = self.catalog.macroprocesses.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(DomainError::new(
                ErrorCode::MacroprocessNotFound,
                "Macroprocess not found",
            ));
        }
        Ok(())
    }

    async fn has_processes(&self, id: MacroprocessId) -> Result<bool, DomainError> {
        Ok(self
            .catalog
            .processes
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.macroprocess_id == id))
    }
}

struct MockProcessRepository {
    catalog: Arc<InMemoryCatalog>,
}

#[async_trait]
impl ProcessRepository for MockProcessRepository {
    async fn fetch_many(
        &self,
        filter: &ProcessFilter,
    ) -> Result<Vec<ProcessWithSubprocesses>, DomainError> {
        let mut rows: Vec<ProcessWithSubprocesses> = self
            .catalog
            .enriched_processes()
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();
        rows.sort_by(|a, b| a.process.name.cmp(&b.process.name));
        Ok(rows)
    }

    async fn create(&self, input: NewProcess) -> Result<Process, DomainError> {
        let row = Process {
            id: ProcessId::new(),
            macroprocess_id: input.macroprocess_id,
            name: input.name,
            responsible: input.responsible,
            objective: input.objective,
            manual_link: input.manual_link,
            status: input.status.unwrap_or_default(),
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        };
        self.catalog.processes.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: ProcessId, patch: ProcessUpdate) -> Result<Process, DomainError> {
        let mut rows = self.catalog.processes.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::new(ErrorCode::ProcessNotFound, "Process not found"))?;
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(responsible) = patch.responsible {
            row.responsible = Some(responsible);
        }
        if let Some(manual_link) = patch.manual_link {
            row.manual_link = Some(manual_link);
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: ProcessId) -> Result<(), DomainError> {
        self.catalog
            .processes
            .lock()
            .unwrap()
            .retain(|r| r.id != id);
        Ok(())
    }

    async fn has_subprocesses(&self, id: ProcessId) -> Result<bool, DomainError> {
        Ok(self
            .catalog
            .subprocesses
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.process_id == id))
    }
}

struct MockSubprocessRepository {
    catalog: Arc<InMemoryCatalog>,
}

#[async_trait]
impl SubprocessRepository for MockSubprocessRepository {
    async fn fetch_many(
        &self,
        filter: &SubprocessFilter,
    ) -> Result<Vec<SubprocessRecord>, DomainError> {
        let processes = self.catalog.processes.lock().unwrap();
        let macros = self.catalog.macroprocesses.lock().unwrap();
        let mut rows: Vec<SubprocessRecord> = self
            .catalog
            .subprocesses
            .lock()
            .unwrap()
            .iter()
            .map(|subprocess| {
                let parent = processes.iter().find(|p| p.id == subprocess.process_id);
                SubprocessRecord {
                    subprocess: subprocess.clone(),
                    process_name: parent.map(|p| p.name.clone()),
                    macroprocess_name: parent.and_then(|p| {
                        macros
                            .iter()
                            .find(|m| m.id == p.macroprocess_id)
                            .map(|m| m.name.clone())
                    }),
                }
            })
            .filter(|r| filter.matches(r))
            .collect();
        rows.sort_by(|a, b| a.subprocess.name.cmp(&b.subprocess.name));
        Ok(rows)
    }

    async fn create(&self, input: NewSubprocess) -> Result<Subprocess, DomainError> {
        let row = Subprocess {
            id: SubprocessId::new(),
            process_id: input.process_id,
            name: input.name,
            responsible: input.responsible,
            manual_link: input.manual_link,
            external_link: input.external_link,
            status: input.status.unwrap_or_default(),
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        };
        self.catalog.subprocesses.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: SubprocessId,
        patch: SubprocessUpdate,
    ) -> Result<Subprocess, DomainError> {
        let mut rows = self.catalog.subprocesses.lock().unwrap();
        let row = rows.iter_mut().find(|r| r.id == id).ok_or_else(|| {
            DomainError::new(ErrorCode::SubprocessNotFound, "Subprocess not found")
        })?;
        if let Some(name) = patch.name {
            row.name = name;
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: SubprocessId) -> Result<(), DomainError> {
        self.catalog
            .subprocesses
            .lock()
            .unwrap()
            .retain(|r| r.id != id);
        Ok(())
    }
}

fn test_store() -> (Arc<CatalogStore>, Arc<InMemoryCatalog>) {
    let catalog = Arc::new(InMemoryCatalog::default());
    let store = Arc::new(CatalogStore::new(
        Arc::new(MockMacroprocessRepository {
            catalog: catalog.clone(),
        }),
        Arc::new(MockProcessRepository {
            catalog: catalog.clone(),
        }),
        Arc::new(MockSubprocessRepository {
            catalog: catalog.clone(),
        }),
    ));
    (store, catalog)
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

fn macroprocess_request(name: &str) -> CreateMacroprocessRequest {
    serde_json::from_value(json!({"kind": "operational", "name": name})).unwrap()
}

async fn seed_chain(
    store: &Arc<CatalogStore>,
) -> (MacroprocessId, ProcessId) {
    let response = create_macroprocess(
        State(store.clone()),
        Json(macroprocess_request("Finance")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let macro_id: MacroprocessId = body["data"]["id"].as_str().unwrap().parse().unwrap();

    let request: CreateProcessRequest = serde_json::from_value(json!({
        "macroprocess_id": macro_id.to_string(),
        "name": "Billing",
        "responsible": "Ana",
        "manual_link": "https://docs.example/billing.pdf"
    }))
    .unwrap();
    let response = create_process(State(store.clone()), Json(request)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let process_id: ProcessId = body["data"]["id"].as_str().unwrap().parse().unwrap();

    (macro_id, process_id)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn create_macroprocess_returns_envelope_with_defaults() {
    let (store, _) = test_store();

    let response = create_macroprocess(
        State(store.clone()),
        Json(macroprocess_request("Water Supply")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["name"], json!("Water Supply"));
    assert_eq!(body["data"]["status"], json!("active"));
}

#[tokio::test]
async fn create_macroprocess_with_blank_name_is_rejected() {
    let (store, catalog) = test_store();

    let response = create_macroprocess(
        State(store.clone()),
        Json(macroprocess_request("   ")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("required"));
    assert!(catalog.macroprocesses.lock().unwrap().is_empty());
}

#[tokio::test]
async fn list_macroprocesses_applies_the_search_filter() {
    let (store, _) = test_store();
    for name in ["Finance", "Operations", "Field Operations"] {
        create_macroprocess(State(store.clone()), Json(macroprocess_request(name))).await;
    }

    let query: ListMacroprocessesQuery =
        serde_json::from_value(json!({"search": "operations"})).unwrap();
    let response = list_macroprocesses(State(store.clone()), Query(query)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Ascending name order.
    assert_eq!(rows[0]["name"], json!("Field Operations"));
    assert_eq!(rows[1]["name"], json!("Operations"));
}

#[tokio::test]
async fn delete_macroprocess_with_processes_is_blocked() {
    let (store, catalog) = test_store();
    let (macro_id, _) = seed_chain(&store).await;

    let response =
        delete_macroprocess(State(store.clone()), Path(macro_id.to_string())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("dependent children"));
    assert_eq!(catalog.macroprocesses.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_with_invalid_id_is_a_bad_request() {
    let (store, _) = test_store();
    let response =
        delete_macroprocess(State(store.clone()), Path("not-a-uuid".to_string())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_missing_process_is_not_found() {
    let (store, _) = test_store();
    let request: UpdateProcessRequest =
        serde_json::from_value(json!({"name": "Renamed"})).unwrap();
    let response = update_process(
        State(store.clone()),
        Path(ProcessId::new().to_string()),
        Json(request),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hierarchy_reflects_created_chain() {
    let (store, _) = test_store();
    let (_, process_id) = seed_chain(&store).await;

    let request: CreateSubprocessRequest = serde_json::from_value(json!({
        "process_id": process_id.to_string(),
        "name": "Meter reading"
    }))
    .unwrap();
    let response = create_subprocess(State(store.clone()), Json(request)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response =
        get_hierarchy(State(store.clone()), Query(HierarchyQuery::default())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = &body["data"];
    assert_eq!(data["total_nodes"], json!(3));
    assert_eq!(data["max_depth"], json!(3));
    let root = &data["roots"][0];
    assert_eq!(root["name"], json!("Finance"));
    assert_eq!(root["level"], json!(0));
    assert_eq!(root["risk_count"], json!(0));
    let leaf = &root["children"][0]["children"][0];
    assert_eq!(leaf["name"], json!("Meter reading"));
    assert_eq!(leaf["level"], json!(2));
}

#[tokio::test]
async fn hierarchy_filter_keeps_ancestors_of_matches() {
    let (store, _) = test_store();
    let (_, process_id) = seed_chain(&store).await;
    let request: CreateSubprocessRequest = serde_json::from_value(json!({
        "process_id": process_id.to_string(),
        "name": "Meter reading"
    }))
    .unwrap();
    create_subprocess(State(store.clone()), Json(request)).await;

    let query: HierarchyQuery = serde_json::from_value(json!({"search": "meter"})).unwrap();
    let response = get_hierarchy(State(store.clone()), Query(query)).await;
    let body = body_json(response).await;

    let data = &body["data"];
    assert_eq!(data["total_nodes"], json!(3));
    assert_eq!(data["roots"][0]["name"], json!("Finance"));
}

#[tokio::test]
async fn statistics_count_the_snapshot() {
    let (store, _) = test_store();
    seed_chain(&store).await;

    let response = get_statistics(State(store.clone())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = &body["data"];
    assert_eq!(data["total_macroprocesses"], json!(1));
    assert_eq!(data["total_processes"], json!(1));
    assert_eq!(data["active_processes"], json!(1));
    assert_eq!(data["by_kind"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn dashboard_filter_composes_selection_and_modal() {
    let (store, _) = test_store();
    let (macro_id, _) = seed_chain(&store).await;

    let filters = DashboardFilters {
        selected_macroprocesses: vec![macro_id],
        modal: ModalFilters {
            responsibles: vec!["Ana".to_string()],
            ..ModalFilters::default()
        },
    };
    let response = filter_dashboard(State(store.clone()), Json(filters)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = &body["data"];
    assert_eq!(data["macroprocesses"].as_array().unwrap().len(), 1);
    assert_eq!(data["processes"].as_array().unwrap().len(), 1);
    assert_eq!(data["processes"][0]["name"], json!("Billing"));

    let filters = DashboardFilters {
        selected_macroprocesses: vec![macro_id],
        modal: ModalFilters {
            responsibles: vec!["Nobody".to_string()],
            ..ModalFilters::default()
        },
    };
    let response = filter_dashboard(State(store.clone()), Json(filters)).await;
    let body = body_json(response).await;
    assert!(body["data"]["processes"].as_array().unwrap().is_empty());
}
