//! Opportunity lifecycle: posting, listing, deleting, and applying.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    ApplyOutcome, ApplyRequest, CreateOpportunityRequest, DeleteOpportunityRequest,
    OpportunitiesCommand, OpportunitiesQuery, OpportunityRepository, UserRepository,
};
use crate::domain::reconciliation::{self, PopulatedOpportunity, index_users};
use crate::domain::service_support::{is_reviewer, is_student, require_role};
use crate::domain::{Error, Opportunity, OpportunityId, OpportunityValidationError, UserId};

/// Service behind the opportunity endpoints.
#[derive(Clone)]
pub struct OpportunityService<U, O> {
    users: Arc<U>,
    opportunities: Arc<O>,
    clock: Arc<dyn Clock>,
}

impl<U, O> OpportunityService<U, O> {
    pub fn new(users: Arc<U>, opportunities: Arc<O>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            opportunities,
            clock,
        }
    }
}

fn validation_error(error: OpportunityValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

impl<U, O> OpportunityService<U, O>
where
    U: UserRepository,
    O: OpportunityRepository,
{
    async fn find_existing(&self, id: &OpportunityId) -> Result<Opportunity, Error> {
        self.opportunities
            .find_by_id(id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| {
                Error::not_found(format!("opportunity {id} not found"))
                    .with_details(json!({"opportunityId": id.to_string()}))
            })
    }
}

#[async_trait]
impl<U, O> OpportunitiesQuery for OpportunityService<U, O>
where
    U: UserRepository,
    O: OpportunityRepository,
{
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<PopulatedOpportunity>, Error> {
        require_role(self.users.as_ref(), owner, is_reviewer, "list postings").await?;
        let opportunities = self
            .opportunities
            .list_by_owner(owner)
            .await
            .map_err(Error::from)?;

        let applicant_ids = reconciliation::applicant_ids(&opportunities);
        let directory = if applicant_ids.is_empty() {
            Default::default()
        } else {
            index_users(
                self.users
                    .find_by_ids(&applicant_ids)
                    .await
                    .map_err(Error::from)?,
            )
        };

        Ok(opportunities
            .into_iter()
            .map(|opportunity| reconciliation::populate_opportunity(opportunity, &directory))
            .collect())
    }
}

#[async_trait]
impl<U, O> OpportunitiesCommand for OpportunityService<U, O>
where
    U: UserRepository,
    O: OpportunityRepository,
{
    async fn create(&self, request: CreateOpportunityRequest) -> Result<Opportunity, Error> {
        let CreateOpportunityRequest { owner, draft } = request;
        require_role(self.users.as_ref(), &owner, is_reviewer, "post opportunities").await?;

        let opportunity =
            Opportunity::create(owner, draft, self.clock.utc()).map_err(validation_error)?;
        self.opportunities
            .insert(&opportunity)
            .await
            .map_err(Error::from)?;
        info!(
            owner = %opportunity.owner_id,
            opportunity_id = %opportunity.id,
            "opportunity posted"
        );
        Ok(opportunity)
    }

    async fn delete(&self, request: DeleteOpportunityRequest) -> Result<(), Error> {
        let DeleteOpportunityRequest {
            owner,
            opportunity_id,
        } = request;
        require_role(self.users.as_ref(), &owner, is_reviewer, "delete opportunities").await?;

        let existing = self.find_existing(&opportunity_id).await?;
        if !existing.is_owned_by(&owner) {
            return Err(Error::forbidden("only the owner may delete an opportunity"));
        }
        let removed = self
            .opportunities
            .delete(&opportunity_id)
            .await
            .map_err(Error::from)?;
        if !removed {
            // Lost a race with another delete.
            return Err(Error::not_found(format!(
                "opportunity {opportunity_id} not found"
            )));
        }
        info!(owner = %owner, opportunity_id = %opportunity_id, "opportunity deleted");
        Ok(())
    }

    async fn apply(&self, request: ApplyRequest) -> Result<ApplyOutcome, Error> {
        let ApplyRequest {
            student,
            opportunity_id,
        } = request;
        require_role(self.users.as_ref(), &student, is_student, "apply to opportunities").await?;

        self.find_existing(&opportunity_id).await?;
        let newly_applied = self
            .opportunities
            .append_applicant(&opportunity_id, &student)
            .await
            .map_err(Error::from)?;
        info!(
            student_id = %student,
            opportunity_id = %opportunity_id,
            newly_applied,
            "application received"
        );
        Ok(ApplyOutcome {
            opportunity_id,
            newly_applied,
        })
    }
}

#[cfg(test)]
#[path = "opportunity_service_tests.rs"]
mod tests;
