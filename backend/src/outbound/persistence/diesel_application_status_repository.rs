//! PostgreSQL-backed `ApplicationStatusRepository`.
//!
//! The upsert is one `INSERT ... ON CONFLICT (opportunity_id, student_id)
//! DO UPDATE` statement; concurrent writers for the same pair resolve
//! last-write-wins inside PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ApplicationStatusRepository, ApplicationStatusRepositoryError};
use crate::domain::{
    ApplicationKey, ApplicationStatus, ApplicationStatusRecord, OpportunityId, StatusChange,
    UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ApplicationStatusRow, NewApplicationStatusRow};
use super::pool::{DbPool, PoolError};
use super::schema::{application_statuses, opportunities};

#[derive(Clone)]
pub struct DieselApplicationStatusRepository {
    pool: DbPool,
}

impl DieselApplicationStatusRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ApplicationStatusRepositoryError {
    map_pool_error(error, ApplicationStatusRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ApplicationStatusRepositoryError {
    map_diesel_error(
        error,
        ApplicationStatusRepositoryError::query,
        ApplicationStatusRepositoryError::connection,
    )
}

fn row_to_record(
    row: ApplicationStatusRow,
) -> Result<ApplicationStatusRecord, ApplicationStatusRepositoryError> {
    let status: ApplicationStatus = row
        .status
        .parse()
        .map_err(|err| ApplicationStatusRepositoryError::query(format!("{err}")))?;
    Ok(ApplicationStatusRecord {
        opportunity_id: OpportunityId::from_uuid(row.opportunity_id),
        student_id: UserId::from_uuid(row.student_id),
        status,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl ApplicationStatusRepository for DieselApplicationStatusRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ApplicationStatusRecord>, ApplicationStatusRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let owned = opportunities::table
            .filter(opportunities::owner_id.eq(*owner.as_uuid()))
            .select(opportunities::id);
        let rows: Vec<ApplicationStatusRow> = application_statuses::table
            .filter(application_statuses::opportunity_id.eq_any(owned))
            .order((
                application_statuses::updated_at.desc(),
                application_statuses::student_id.asc(),
            ))
            .select(ApplicationStatusRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn find(
        &self,
        key: &ApplicationKey,
    ) -> Result<Option<ApplicationStatusRecord>, ApplicationStatusRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<ApplicationStatusRow> = application_statuses::table
            .find((*key.opportunity_id.as_uuid(), *key.student_id.as_uuid()))
            .select(ApplicationStatusRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn upsert(
        &self,
        change: &StatusChange,
        updated_at: DateTime<Utc>,
    ) -> Result<ApplicationStatusRecord, ApplicationStatusRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewApplicationStatusRow {
            opportunity_id: *change.opportunity_id.as_uuid(),
            student_id: *change.student_id.as_uuid(),
            status: change.status.as_str(),
            updated_at,
        };

        let stored: ApplicationStatusRow = diesel::insert_into(application_statuses::table)
            .values(&row)
            .on_conflict((
                application_statuses::opportunity_id,
                application_statuses::student_id,
            ))
            .do_update()
            .set((
                application_statuses::status.eq(excluded(application_statuses::status)),
                application_statuses::updated_at.eq(excluded(application_statuses::updated_at)),
            ))
            .returning(ApplicationStatusRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        row_to_record(stored)
    }
}
