//! PostgreSQL implementation of MacroprocessRepository.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, MacroprocessId, ProcessId, RecordStatus, SubprocessId, Timestamp,
};
use crate::domain::organization::{
    Macroprocess, MacroprocessCriterion, MacroprocessFilter, MacroprocessKind,
    MacroprocessUpdate, MacroprocessWithProcesses, NewMacroprocess, Process,
    ProcessWithSubprocesses, Subprocess,
};
use crate::ports::MacroprocessRepository;

use super::{column, db_error, like_pattern, MACROPROCESS_TABLE, PROCESS_TABLE, SUBPROCESS_TABLE};

/// PostgreSQL implementation of MacroprocessRepository.
#[derive(Clone)]
pub struct PostgresMacroprocessRepository {
    pool: PgPool,
}

impl PostgresMacroprocessRepository {
    /// Creates a new PostgresMacroprocessRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MacroprocessRepository for PostgresMacroprocessRepository {
    async fn fetch_many(
        &self,
        filter: &MacroprocessFilter,
    ) -> Result<Vec<MacroprocessWithProcesses>, DomainError> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT id, kind, name, external_link, status, created_at, updated_at \
             FROM {} WHERE 1=1",
            MACROPROCESS_TABLE
        ));
        for criterion in filter.criteria() {
            match criterion {
                MacroprocessCriterion::Ids(ids) => {
                    let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
                    qb.push(" AND id = ANY(");
                    qb.push_bind(uuids);
                    qb.push(")");
                }
                MacroprocessCriterion::Search(text) => {
                    qb.push(" AND name ILIKE ");
                    qb.push_bind(like_pattern(text));
                }
                MacroprocessCriterion::Kind(kind) => {
                    qb.push(" AND kind = ");
                    qb.push_bind(kind.as_str());
                }
                MacroprocessCriterion::Status(status) => {
                    qb.push(" AND status = ");
                    qb.push_bind(status.as_str());
                }
            }
        }
        qb.push(" ORDER BY name ASC");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to fetch macroprocesses"))?;

        let macroprocesses: Vec<Macroprocess> = rows
            .iter()
            .map(row_to_macroprocess)
            .collect::<Result<_, _>>()?;

        self.attach_children(macroprocesses).await
    }

    async fn create(&self, input: NewMacroprocess) -> Result<Macroprocess, DomainError> {
        input.validate()?;
        let record = Macroprocess {
            id: MacroprocessId::new(),
            kind: input.kind,
            name: input.name,
            external_link: input.external_link,
            status: input.status.unwrap_or_default(),
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        };

        sqlx::query(&format!(
            "INSERT INTO {} (id, kind, name, external_link, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
            MACROPROCESS_TABLE
        ))
        .bind(record.id.as_uuid())
        .bind(record.kind.as_str())
        .bind(&record.name)
        .bind(&record.external_link)
        .bind(record.status.as_str())
        .bind(record.created_at.as_datetime())
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert macroprocess"))?;

        Ok(record)
    }

    async fn update(
        &self,
        id: MacroprocessId,
        patch: MacroprocessUpdate,
    ) -> Result<Macroprocess, DomainError> {
        patch.validate()?;

        let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", MACROPROCESS_TABLE));
        let mut sets = qb.separated(", ");
        if let Some(kind) = &patch.kind {
            sets.push("kind = ");
            sets.push_bind_unseparated(kind.as_str());
        }
        if let Some(name) = &patch.name {
            sets.push("name = ");
            sets.push_bind_unseparated(name.clone());
        }
        if let Some(link) = &patch.external_link {
            sets.push("external_link = ");
            sets.push_bind_unseparated(link.clone());
        }
        if let Some(status) = &patch.status {
            sets.push("status = ");
            sets.push_bind_unseparated(status.as_str());
        }
        sets.push("updated_at = ");
        sets.push_bind_unseparated(*Timestamp::now().as_datetime());

        qb.push(" WHERE id = ");
        qb.push_bind(*id.as_uuid());
        qb.push(" RETURNING id, kind, name, external_link, status, created_at, updated_at");

        let row = qb
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to update macroprocess"))?;

        match row {
            Some(row) => row_to_macroprocess(&row),
            None => Err(DomainError::new(
                ErrorCode::MacroprocessNotFound,
                format!("Macroprocess not found: {}", id),
            )),
        }
    }

    async fn delete(&self, id: MacroprocessId) -> Result<(), DomainError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", MACROPROCESS_TABLE))
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete macroprocess"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MacroprocessNotFound,
                format!("Macroprocess not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn has_processes(&self, id: MacroprocessId) -> Result<bool, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT id FROM {} WHERE macroprocess_id = $1 LIMIT 1",
            PROCESS_TABLE
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to check for dependent processes"))?;

        Ok(row.is_some())
    }
}

impl PostgresMacroprocessRepository {
    /// Loads the process and subprocess children for the fetched rows and
    /// stitches them into the enriched shape. Child order is ascending by
    /// name, matching the parent query.
    async fn attach_children(
        &self,
        macroprocesses: Vec<Macroprocess>,
    ) -> Result<Vec<MacroprocessWithProcesses>, DomainError> {
        if macroprocesses.is_empty() {
            return Ok(vec![]);
        }

        let macro_ids: Vec<Uuid> = macroprocesses.iter().map(|m| *m.id.as_uuid()).collect();
        let process_rows = sqlx::query(&format!(
            "SELECT id, macroprocess_id, name, responsible, objective, manual_link, \
                    status, created_at, updated_at \
             FROM {} WHERE macroprocess_id = ANY($1) ORDER BY name ASC",
            PROCESS_TABLE
        ))
        .bind(&macro_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch processes"))?;

        let processes: Vec<Process> = process_rows
            .iter()
            .map(row_to_process)
            .collect::<Result<_, _>>()?;

        let process_ids: Vec<Uuid> = processes.iter().map(|p| *p.id.as_uuid()).collect();
        let mut subs_by_process: HashMap<ProcessId, Vec<Subprocess>> = HashMap::new();
        if !process_ids.is_empty() {
            let subprocess_rows = sqlx::query(&format!(
                "SELECT id, process_id, name, responsible, manual_link, external_link, \
                        status, created_at, updated_at \
                 FROM {} WHERE process_id = ANY($1) ORDER BY name ASC",
                SUBPROCESS_TABLE
            ))
            .bind(&process_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to fetch subprocesses"))?;

            for row in &subprocess_rows {
                let subprocess = row_to_subprocess(row)?;
                subs_by_process
                    .entry(subprocess.process_id)
                    .or_default()
                    .push(subprocess);
            }
        }

        let names_by_macro: HashMap<MacroprocessId, String> = macroprocesses
            .iter()
            .map(|m| (m.id, m.name.clone()))
            .collect();

        let mut procs_by_macro: HashMap<MacroprocessId, Vec<ProcessWithSubprocesses>> =
            HashMap::new();
        for process in processes {
            let subprocesses = subs_by_process.remove(&process.id).unwrap_or_default();
            let macroprocess_name = names_by_macro.get(&process.macroprocess_id).cloned();
            procs_by_macro
                .entry(process.macroprocess_id)
                .or_default()
                .push(ProcessWithSubprocesses {
                    process,
                    subprocesses,
                    macroprocess_name,
                });
        }

        Ok(macroprocesses
            .into_iter()
            .map(|macroprocess| {
                let processes = procs_by_macro.remove(&macroprocess.id).unwrap_or_default();
                MacroprocessWithProcesses {
                    macroprocess,
                    processes,
                }
            })
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Row mapping
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn row_to_macroprocess(row: &PgRow) -> Result<Macroprocess, DomainError> {
    let kind: String = column(row, "kind")?;
    let status: String = column(row, "status")?;
    Ok(Macroprocess {
        id: MacroprocessId::from_uuid(column(row, "id")?),
        kind: MacroprocessKind::parse(&kind)?,
        name: column(row, "name")?,
        external_link: column(row, "external_link")?,
        status: RecordStatus::parse(&status)?,
        created_at: Timestamp::from_datetime(column(row, "created_at")?),
        updated_at: Timestamp::from_datetime(column(row, "updated_at")?),
    })
}

pub(crate) fn row_to_process(row: &PgRow) -> Result<Process, DomainError> {
    let status: String = column(row, "status")?;
    Ok(Process {
        id: ProcessId::from_uuid(column(row, "id")?),
        macroprocess_id: MacroprocessId::from_uuid(column(row, "macroprocess_id")?),
        name: column(row, "name")?,
        responsible: column(row, "responsible")?,
        objective: column(row, "objective")?,
        manual_link: column(row, "manual_link")?,
        status: RecordStatus::parse(&status)?,
        created_at: Timestamp::from_datetime(column(row, "created_at")?),
        updated_at: Timestamp::from_datetime(column(row, "updated_at")?),
    })
}

pub(crate) fn row_to_subprocess(row: &PgRow) -> Result<Subprocess, DomainError> {
    let status: String = column(row, "status")?;
    Ok(Subprocess {
        id: SubprocessId::from_uuid(column(row, "id")?),
        process_id: ProcessId::from_uuid(column(row, "process_id")?),
        name: column(row, "name")?,
        responsible: column(row, "responsible")?,
        manual_link: column(row, "manual_link")?,
        external_link: column(row, "external_link")?,
        status: RecordStatus::parse(&status)?,
        created_at: Timestamp::from_datetime(column(row, "created_at")?),
        updated_at: Timestamp::from_datetime(column(row, "updated_at")?),
    })
}
