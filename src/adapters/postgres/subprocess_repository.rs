//! PostgreSQL implementation of SubprocessRepository.

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, SubprocessId, Timestamp};
use crate::domain::organization::{
    NewSubprocess, Subprocess, SubprocessCriterion, SubprocessFilter, SubprocessRecord,
    SubprocessUpdate,
};
use crate::ports::SubprocessRepository;

use super::macroprocess_repository::row_to_subprocess;
use super::process_repository::push_published_predicate;
use super::{column, db_error, like_pattern, MACROPROCESS_TABLE, PROCESS_TABLE, SUBPROCESS_TABLE};

/// PostgreSQL implementation of SubprocessRepository.
#[derive(Clone)]
pub struct PostgresSubprocessRepository {
    pool: PgPool,
}

impl PostgresSubprocessRepository {
    /// Creates a new PostgresSubprocessRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubprocessRepository for PostgresSubprocessRepository {
    async fn fetch_many(
        &self,
        filter: &SubprocessFilter,
    ) -> Result<Vec<SubprocessRecord>, DomainError> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT s.id, s.process_id, s.name, s.responsible, s.manual_link, \
                    s.external_link, s.status, s.created_at, s.updated_at, \
                    p.name AS process_name, m.name AS macroprocess_name \
             FROM {} s \
             JOIN {} p ON p.id = s.process_id \
             JOIN {} m ON m.id = p.macroprocess_id WHERE 1=1",
            SUBPROCESS_TABLE, PROCESS_TABLE, MACROPROCESS_TABLE
        ));
        for criterion in filter.criteria() {
            match criterion {
                SubprocessCriterion::Ids(ids) => {
                    let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
                    qb.push(" AND s.id = ANY(");
                    qb.push_bind(uuids);
                    qb.push(")");
                }
                SubprocessCriterion::Search(text) => {
                    // A subprocess search also matches both ancestor names.
                    let pattern = like_pattern(text);
                    qb.push(" AND (s.name ILIKE ");
                    qb.push_bind(pattern.clone());
                    qb.push(" OR p.name ILIKE ");
                    qb.push_bind(pattern.clone());
                    qb.push(" OR m.name ILIKE ");
                    qb.push_bind(pattern);
                    qb.push(")");
                }
                SubprocessCriterion::Processes(ids) => {
                    let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
                    qb.push(" AND s.process_id = ANY(");
                    qb.push_bind(uuids);
                    qb.push(")");
                }
                SubprocessCriterion::Status(status) => {
                    qb.push(" AND s.status = ");
                    qb.push_bind(status.as_str());
                }
                SubprocessCriterion::Published(values) => {
                    push_published_predicate(&mut qb, "s", values);
                }
            }
        }
        qb.push(" ORDER BY s.name ASC");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to fetch subprocesses"))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(SubprocessRecord {
                subprocess: row_to_subprocess(row)?,
                process_name: column(row, "process_name")?,
                macroprocess_name: column(row, "macroprocess_name")?,
            });
        }
        Ok(records)
    }

    async fn create(&self, input: NewSubprocess) -> Result<Subprocess, DomainError> {
        input.validate()?;
        let record = Subprocess {
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

        sqlx::query(&format!(
            "INSERT INTO {} (id, process_id, name, responsible, manual_link, \
                             external_link, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            SUBPROCESS_TABLE
        ))
        .bind(record.id.as_uuid())
        .bind(record.process_id.as_uuid())
        .bind(&record.name)
        .bind(&record.responsible)
        .bind(&record.manual_link)
        .bind(&record.external_link)
        .bind(record.status.as_str())
        .bind(record.created_at.as_datetime())
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert subprocess"))?;

        Ok(record)
    }

    async fn update(
        &self,
        id: SubprocessId,
        patch: SubprocessUpdate,
    ) -> Result<Subprocess, DomainError> {
        patch.validate()?;

        let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", SUBPROCESS_TABLE));
        let mut sets = qb.separated(", ");
        if let Some(process_id) = &patch.process_id {
            sets.push("process_id = ");
            sets.push_bind_unseparated(*process_id.as_uuid());
        }
        if let Some(name) = &patch.name {
            sets.push("name = ");
            sets.push_bind_unseparated(name.clone());
        }
        if let Some(responsible) = &patch.responsible {
            sets.push("responsible = ");
            sets.push_bind_unseparated(responsible.clone());
        }
        if let Some(manual_link) = &patch.manual_link {
            sets.push("manual_link = ");
            sets.push_bind_unseparated(manual_link.clone());
        }
        if let Some(external_link) = &patch.external_link {
            sets.push("external_link = ");
            sets.push_bind_unseparated(external_link.clone());
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
            " RETURNING id, process_id, name, responsible, manual_link, external_link, \
              status, created_at, updated_at",
        );

        let row = qb
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to update subprocess"))?;

        match row {
            Some(row) => row_to_subprocess(&row),
            None => Err(DomainError::new(
                ErrorCode::SubprocessNotFound,
                format!("Subprocess not found: {}", id),
            )),
        }
    }

    async fn delete(&self, id: SubprocessId) -> Result<(), DomainError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", SUBPROCESS_TABLE))
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete subprocess"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubprocessNotFound,
                format!("Subprocess not found: {}", id),
            ));
        }

        Ok(())
    }
}
