//! Opportunity HTTP handlers.
//!
//! ```text
//! GET    /api/v1/opportunities/alumni
//! POST   /api/v1/opportunities
//! DELETE /api/v1/opportunities/{id}
//! POST   /api/v1/opportunities/{id}/apply
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    ApplyOutcome, ApplyRequest, CreateOpportunityRequest, DeleteOpportunityRequest,
};
use crate::domain::reconciliation::PopulatedOpportunity;
use crate::domain::{Error, Opportunity, OpportunityDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, OPPORTUNITY_ID, parse_opportunity_id, require};

/// Body of `POST /opportunities`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOpportunityBody {
    #[schema(max_length = 200)]
    pub project_title: Option<String>,
    #[schema(max_length = 100)]
    pub category: Option<String>,
    pub budget: Option<i64>,
    #[schema(max_length = 32)]
    pub payment_type: Option<String>,
    #[schema(max_length = 32)]
    pub experience_level: Option<String>,
    pub project_description: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

impl CreateOpportunityBody {
    fn into_draft(self) -> Result<OpportunityDraft, Error> {
        Ok(OpportunityDraft {
            project_title: require(self.project_title, FieldName::new("projectTitle"))?,
            category: require(self.category, FieldName::new("category"))?,
            budget: require(self.budget, FieldName::new("budget"))?,
            payment_type: self.payment_type.unwrap_or_default(),
            experience_level: self.experience_level.unwrap_or_default(),
            project_description: require(
                self.project_description,
                FieldName::new("projectDescription"),
            )?,
            required_skills: self.required_skills,
        })
    }
}

/// Response of `POST /opportunities/{id}/apply`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResponse {
    #[schema(value_type = String, format = Uuid)]
    pub opportunity_id: String,
    /// `false` when the caller had already applied.
    pub newly_applied: bool,
}

impl From<ApplyOutcome> for ApplyResponse {
    fn from(outcome: ApplyOutcome) -> Self {
        Self {
            opportunity_id: outcome.opportunity_id.to_string(),
            newly_applied: outcome.newly_applied,
        }
    }
}

/// Opportunities posted by the caller, newest first, applicants populated.
#[utoipa::path(
    get,
    path = "/api/v1/opportunities/alumni",
    responses(
        (status = 200, description = "Caller's opportunities", body = [PopulatedOpportunity]),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Caller is not an alumnus", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["opportunities"],
    operation_id = "listOwnOpportunities"
)]
#[get("/opportunities/alumni")]
pub async fn list_own_opportunities(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<PopulatedOpportunity>>> {
    let owner = session.require_user_id()?;
    let opportunities = state.opportunities.list_for_owner(&owner).await?;
    Ok(web::Json(opportunities))
}

/// Post a new opportunity.
#[utoipa::path(
    post,
    path = "/api/v1/opportunities",
    request_body = CreateOpportunityBody,
    responses(
        (status = 201, description = "Created", body = Opportunity),
        (status = 400, description = "Invalid draft", body = Error),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Caller is not an alumnus", body = Error)
    ),
    tags = ["opportunities"],
    operation_id = "createOpportunity"
)]
#[post("/opportunities")]
pub async fn create_opportunity(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateOpportunityBody>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let created: Opportunity = state
        .opportunities_command
        .create(CreateOpportunityRequest { owner, draft })
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Delete an opportunity the caller owns.
#[utoipa::path(
    delete,
    path = "/api/v1/opportunities/{id}",
    params(("id" = String, Path, description = "Opportunity id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed id", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "No such opportunity", body = Error)
    ),
    tags = ["opportunities"],
    operation_id = "deleteOpportunity"
)]
#[delete("/opportunities/{id}")]
pub async fn delete_opportunity(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let opportunity_id = parse_opportunity_id(&path.into_inner(), OPPORTUNITY_ID)?;
    state
        .opportunities_command
        .delete(DeleteOpportunityRequest {
            owner,
            opportunity_id,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Apply to an opportunity. Re-applying succeeds without duplicating.
#[utoipa::path(
    post,
    path = "/api/v1/opportunities/{id}/apply",
    params(("id" = String, Path, description = "Opportunity id")),
    responses(
        (status = 200, description = "Applied", body = ApplyResponse),
        (status = 403, description = "Caller is not a student", body = Error),
        (status = 404, description = "No such opportunity", body = Error)
    ),
    tags = ["opportunities"],
    operation_id = "applyToOpportunity"
)]
#[post("/opportunities/{id}/apply")]
pub async fn apply_to_opportunity(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ApplyResponse>> {
    let student = session.require_user_id()?;
    let opportunity_id = parse_opportunity_id(&path.into_inner(), OPPORTUNITY_ID)?;
    let outcome = state
        .opportunities_command
        .apply(ApplyRequest {
            student,
            opportunity_id,
        })
        .await?;
    Ok(web::Json(outcome.into()))
}

#[cfg(test)]
#[path = "opportunities_tests.rs"]
mod tests;
