//! Internal Diesel row structs.
//!
//! These types exist to satisfy Diesel's query and mutation traits and never
//! leave the persistence layer. Conversions to domain types live in the
//! repository modules.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{application_statuses, opportunities, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub profile: serde_json::Value,
}

/// Row read from or written to `opportunities`.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = opportunities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OpportunityRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub project_title: String,
    pub category: String,
    pub budget: i64,
    pub payment_type: String,
    pub experience_level: String,
    pub project_description: String,
    pub required_skills: Vec<String>,
    pub applicant_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Row read from `application_statuses`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = application_statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationStatusRow {
    pub opportunity_id: Uuid,
    pub student_id: Uuid,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

/// Insertable status row used by the upsert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = application_statuses)]
pub(crate) struct NewApplicationStatusRow<'a> {
    pub opportunity_id: Uuid,
    pub student_id: Uuid,
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}
