//! PostgreSQL implementation of ProcessRepository.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ProcessId, Timestamp};
use crate::domain::organization::{
    NewProcess, Process, ProcessCriterion, ProcessFilter, ProcessUpdate,
    ProcessWithSubprocesses, Subprocess,
};
use crate::ports::ProcessRepository;

use super::macroprocess_repository::{row_to_process, row_to_subprocess};
use super::{column, db_error, like_pattern, MACROPROCESS_TABLE, PROCESS_TABLE, SUBPROCESS_TABLE};

/// Appends the derived-published predicate for the given table alias.
///
/// "Published" is never stored; it reduces to the manual_link column being
/// present and non-empty. Selecting both values is a no-op.
pub(crate) fn push_published_predicate(
    qb: &mut QueryBuilder<'_, Postgres>,
    alias: &str,
    values: &[bool],
) {
    let wants_true = values.contains(&true);
    let wants_false = values.contains(&false);
    if wants_true == wants_false {
        return;
    }
    if wants_true {
        qb.push(format!(
            " AND ({0}.manual_link IS NOT NULL AND {0}.manual_link <> '')",
            alias
        ));
    } else {
        qb.push(format!(
            " AND ({0}.manual_link IS NULL OR {0}.manual_link = '')",
            alias
        ));
    }
}

/// PostgreSQL implementation of ProcessRepository.
#[derive(Clone)]
pub struct PostgresProcessRepository {
    pool: PgPool,
}

impl PostgresProcessRepository {
    /// Creates a new PostgresProcessRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProcessRepository for PostgresProcessRepository {
    async fn fetch_many(
        &self,
        filter: &ProcessFilter,
    ) -> Result<Vec<ProcessWithSubprocesses>, DomainError> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT p.id, p.macroprocess_id, p.name, p.responsible, p.objective, \
                    p.manual_link, p.status, p.created_at, p.updated_at, \
                    m.name AS macroprocess_name \
             FROM {} p JOIN {} m ON m.id = p.macroprocess_id WHERE 1=1",
            PROCESS_TABLE, MACROPROCESS_TABLE
        ));
        for criterion in filter.criteria() {
            match criterion {
                ProcessCriterion::Ids(ids) => {
                    let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
                    qb.push(" AND p.id = ANY(");
                    qb.push_bind(uuids);
                    qb.push(")");
                }
                ProcessCriterion::Search(text) => {
                    // A process search also matches the owning macroprocess
                    // name.
                    let pattern = like_pattern(text);
                    qb.push(" AND (p.name ILIKE ");
                    qb.push_bind(pattern.clone());
                    qb.push(" OR m.name ILIKE ");
                    qb.push_bind(pattern);
                    qb.push(")");
                }
                ProcessCriterion::Macroprocesses(ids) => {
                    let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
                    qb.push(" AND p.macroprocess_id = ANY(");
                    qb.push_bind(uuids);
                    qb.push(")");
                }
                ProcessCriterion::Status(status) => {
                    qb.push(" AND p.status = ");
                    qb.push_bind(status.as_str());
                }
                ProcessCriterion::Responsibles(names) => {
                    qb.push(" AND p.responsible = ANY(");
                    qb.push_bind(names.clone());
                    qb.push(")");
                }
                ProcessCriterion::Published(values) => {
                    push_published_predicate(&mut qb, "p", values);
                }
            }
        }
        qb.push(" ORDER BY p.name ASC");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to fetch processes"))?;

        let mut records: Vec<ProcessWithSubprocesses> = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(ProcessWithSubprocesses {
                process: row_to_process(row)?,
                subprocesses: vec![],
                macroprocess_name: column(row, "macroprocess_name")?,
            });
        }

        self.attach_subprocesses(&mut records).await?;
        Ok(records)
    }

    async fn create(&self, input: NewProcess) -> Result<Process, DomainError> {
        input.validate()?;
        let record = Process {
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

        sqlx::query(&format!(
            "INSERT INTO {} (id, macroprocess_id, name, responsible, objective, \
                             manual_link, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            PROCESS_TABLE
        ))
        .bind(record.id.as_uuid())
        .bind(record.macroprocess_id.as_uuid())
        .bind(&record.name)
        .bind(&record.responsible)
        .bind(&record.objective)
        .bind(&record.manual_link)
        .bind(record.status.as_str())
        .bind(record.created_at.as_datetime())
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert process"))?;

        Ok(record)
    }

    async fn update(&self, id: ProcessId, patch: ProcessUpdate) -> Result<Process, DomainError> {
        patch.validate()?;

        let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", PROCESS_TABLE));
        let mut sets = qb.separated(", ");
        if let Some(macroprocess_id) = &patch.macroprocess_id {
            sets.push("macroprocess_id = ");
            sets.push_bind_unseparated(*macroprocess_id.as_uuid());
        }
        if let Some(name) = &patch.name {
            sets.push("name = ");
            sets.push_bind_unseparated(name.clone());
        }
        if let Some(responsible) = &patch.responsible {
            sets.push("responsible = ");
            sets.push_bind_unseparated(responsible.clone());
        }
        if let Some(objective) = &patch.objective {
            sets.push("objective = ");
            sets.push_bind_unseparated(objective.clone());
        }
        if let Some(manual_link) = &patch.manual_link {
            sets.push("manual_link = ");
            sets.push_bind_unseparated(manual_link.clone());
        }
        if let Some(status) = &patch.status {
            sets.push("status = ");
            sets.push_bind_unseparated(status.as_str());
        }
        sets.push("updated_at = ");
        sets.push_bind_unseparated(*Timestamp::now().as_datetime());

        qb.push(" WHERE id = ");
        qb.push_bind(*id.as_uuid());
        qb.push(
            " RETURNING id, macroprocess_id, name, responsible, objective, manual_link, \
              status, created_at, updated_at",
        );

        let row = qb
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to update process"))?;

        match row {
            Some(row) => row_to_process(&row),
            None => Err(DomainError::new(
                ErrorCode::ProcessNotFound,
                format!("Process not found: {}", id),
            )),
        }
    }

    async fn delete(&self, id: ProcessId) -> Result<(), DomainError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", PROCESS_TABLE))
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete process"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProcessNotFound,
                format!("Process not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn has_subprocesses(&self, id: ProcessId) -> Result<bool, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT id FROM {} WHERE process_id = $1 LIMIT 1",
            SUBPROCESS_TABLE
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to check for dependent subprocesses"))?;

        Ok(row.is_some())
    }
}

impl PostgresProcessRepository {
    async fn attach_subprocesses(
        &self,
        records: &mut [ProcessWithSubprocesses],
    ) -> Result<(), DomainError> {
        if records.is_empty() {
            return Ok(());
        }

        let process_ids: Vec<Uuid> = records
            .iter()
            .map(|r| *r.process.id.as_uuid())
            .collect();
        let rows = sqlx::query(&format!(
            "SELECT id, process_id, name, responsible, manual_link, external_link, \
                    status, created_at, updated_at \
             FROM {} WHERE process_id = ANY($1) ORDER BY name ASC",
            SUBPROCESS_TABLE
        ))
        .bind(&process_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch subprocesses"))?;

        let mut by_process: HashMap<ProcessId, Vec<Subprocess>> = HashMap::new();
        for row in &rows {
            let subprocess = row_to_subprocess(row)?;
            by_process
                .entry(subprocess.process_id)
                .or_default()
                .push(subprocess);
        }

        for record in records {
            if let Some(subprocesses) = by_process.remove(&record.process.id) {
                record.subprocesses = subprocesses;
            }
        }

        Ok(())
    }
}
