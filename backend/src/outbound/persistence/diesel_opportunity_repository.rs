//! PostgreSQL-backed `OpportunityRepository`.
//!
//! Applicants live in the `applicant_ids uuid[]` column. Appends use a single
//! guarded `UPDATE` so concurrent applications by the same student cannot
//! produce duplicates.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Array, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{OpportunityRepository, OpportunityRepositoryError};
use crate::domain::{Opportunity, OpportunityId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::OpportunityRow;
use super::pool::{DbPool, PoolError};
use super::schema::opportunities;

diesel::define_sql_function! {
    /// PostgreSQL `array_append(anyarray, anyelement)` for uuid arrays.
    fn array_append(array: Array<SqlUuid>, element: SqlUuid) -> Array<SqlUuid>;
}

#[derive(Clone)]
pub struct DieselOpportunityRepository {
    pool: DbPool,
}

impl DieselOpportunityRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> OpportunityRepositoryError {
    map_pool_error(error, OpportunityRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> OpportunityRepositoryError {
    map_diesel_error(
        error,
        OpportunityRepositoryError::query,
        OpportunityRepositoryError::connection,
    )
}

fn row_to_opportunity(row: OpportunityRow) -> Opportunity {
    Opportunity {
        id: OpportunityId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.owner_id),
        project_title: row.project_title,
        category: row.category,
        budget: row.budget,
        payment_type: row.payment_type,
        experience_level: row.experience_level,
        project_description: row.project_description,
        required_skills: row.required_skills,
        created_at: row.created_at,
        applicants: row
            .applicant_ids
            .into_iter()
            .map(UserId::from_uuid)
            .collect(),
    }
}

fn opportunity_to_row(opportunity: &Opportunity) -> OpportunityRow {
    OpportunityRow {
        id: *opportunity.id.as_uuid(),
        owner_id: *opportunity.owner_id.as_uuid(),
        project_title: opportunity.project_title.clone(),
        category: opportunity.category.clone(),
        budget: opportunity.budget,
        payment_type: opportunity.payment_type.clone(),
        experience_level: opportunity.experience_level.clone(),
        project_description: opportunity.project_description.clone(),
        required_skills: opportunity.required_skills.clone(),
        applicant_ids: opportunity
            .applicants
            .iter()
            .map(|id| *id.as_uuid())
            .collect(),
        created_at: opportunity.created_at,
    }
}

#[async_trait]
impl OpportunityRepository for DieselOpportunityRepository {
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Opportunity>, OpportunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<OpportunityRow> = opportunities::table
            .filter(opportunities::owner_id.eq(owner.as_uuid()))
            .order((opportunities::created_at.desc(), opportunities::id.asc()))
            .select(OpportunityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(row_to_opportunity).collect())
    }

    async fn find_by_id(
        &self,
        id: &OpportunityId,
    ) -> Result<Option<Opportunity>, OpportunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<OpportunityRow> = opportunities::table
            .filter(opportunities::id.eq(id.as_uuid()))
            .select(OpportunityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(row_to_opportunity))
    }

    async fn insert(&self, opportunity: &Opportunity) -> Result<(), OpportunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(opportunities::table)
            .values(opportunity_to_row(opportunity))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: &OpportunityId) -> Result<bool, OpportunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let removed =
            diesel::delete(opportunities::table.filter(opportunities::id.eq(id.as_uuid())))
                .execute(&mut conn)
                .await
                .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn append_applicant(
        &self,
        id: &OpportunityId,
        applicant: &UserId,
    ) -> Result<bool, OpportunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let applicant_uuid = *applicant.as_uuid();

        let updated = diesel::update(
            opportunities::table
                .filter(opportunities::id.eq(id.as_uuid()))
                .filter(diesel::dsl::not(
                    opportunities::applicant_ids.contains(vec![applicant_uuid]),
                )),
        )
        .set(
            opportunities::applicant_ids
                .eq(array_append(opportunities::applicant_ids, applicant_uuid)),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        debug!(opportunity_id = %id, student_id = %applicant, updated, "applicant append");
        Ok(updated > 0)
    }
}
