//! Application review HTTP handlers.
//!
//! ```text
//! GET /api/v1/applications/alumni
//! GET /api/v1/application-status/alumni
//! PUT /api/v1/application-status/update-status
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UpdateStatusRequest;
use crate::domain::reconciliation::{OpportunityApplications, PopulatedStatusRecord};
use crate::domain::{ApplicationStatusRecord, Error, StatusChange};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    OPPORTUNITY_ID, STATUS, STUDENT_ID, parse_opportunity_id, parse_status, parse_user_id, require,
};

/// Body of `PUT /application-status/update-status`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusBody {
    #[schema(format = Uuid)]
    pub opportunity_id: Option<String>,
    #[schema(format = Uuid)]
    pub student_id: Option<String>,
    /// One of `pending`, `accepted`, `rejected`.
    #[schema(example = "accepted")]
    pub status: Option<String>,
}

impl UpdateStatusBody {
    fn into_change(self) -> Result<StatusChange, Error> {
        let opportunity_id = require(self.opportunity_id, OPPORTUNITY_ID)?;
        let student_id = require(self.student_id, STUDENT_ID)?;
        let status = require(self.status, STATUS)?;
        Ok(StatusChange {
            opportunity_id: parse_opportunity_id(&opportunity_id, OPPORTUNITY_ID)?,
            student_id: parse_user_id(&student_id, STUDENT_ID)?,
            status: parse_status(&status)?,
        })
    }
}

/// Every applicant to the caller's opportunities with their resolved status.
#[utoipa::path(
    get,
    path = "/api/v1/applications/alumni",
    description = "Reconciled view grouped by opportunity; applicants without a recorded \
                   decision are pending.",
    responses(
        (
            status = 200,
            description = "Applications grouped by opportunity",
            body = [OpportunityApplications]
        ),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Caller may not review applications", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["applications"],
    operation_id = "listApplications"
)]
#[get("/applications/alumni")]
pub async fn list_applications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<OpportunityApplications>>> {
    let reviewer = session.require_user_id()?;
    let view = state.applications.list_applications(&reviewer).await?;
    Ok(web::Json(view))
}

/// Stored decisions for the caller's opportunities.
#[utoipa::path(
    get,
    path = "/api/v1/application-status/alumni",
    responses(
        (status = 200, description = "Recorded decisions", body = [PopulatedStatusRecord]),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Caller may not review applications", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["applications"],
    operation_id = "listApplicationStatuses"
)]
#[get("/application-status/alumni")]
pub async fn list_status_records(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<PopulatedStatusRecord>>> {
    let reviewer = session.require_user_id()?;
    let records = state.applications.list_status_records(&reviewer).await?;
    Ok(web::Json(records))
}

/// Record a decision for one applicant.
#[utoipa::path(
    put,
    path = "/api/v1/application-status/update-status",
    request_body = UpdateStatusBody,
    responses(
        (status = 200, description = "Stored decision", body = ApplicationStatusRecord),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Caller may not review this opportunity", body = Error),
        (status = 404, description = "Opportunity not found", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["applications"],
    operation_id = "updateApplicationStatus"
)]
#[put("/application-status/update-status")]
pub async fn update_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateStatusBody>,
) -> ApiResult<web::Json<ApplicationStatusRecord>> {
    let reviewer = session.require_user_id()?;
    let change = payload.into_inner().into_change()?;
    let record = state
        .application_status
        .update_status(UpdateStatusRequest { reviewer, change })
        .await?;
    Ok(web::Json(record))
}

#[cfg(test)]
#[path = "applications_tests.rs"]
mod tests;
