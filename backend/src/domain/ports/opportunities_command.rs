//! Driving port for posting, deleting, and applying to opportunities.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Error, Opportunity, OpportunityDraft, OpportunityId, UserId};

/// Post a new opportunity on behalf of `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOpportunityRequest {
    pub owner: UserId,
    pub draft: OpportunityDraft,
}

/// Remove an opportunity; only its owner may do so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOpportunityRequest {
    pub owner: UserId,
    pub opportunity_id: OpportunityId,
}

/// Add `student` to an opportunity's applicant list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRequest {
    pub student: UserId,
    pub opportunity_id: OpportunityId,
}

/// Outcome of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub opportunity_id: OpportunityId,
    /// `false` when the student had already applied.
    pub newly_applied: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpportunitiesCommand: Send + Sync {
    async fn create(&self, request: CreateOpportunityRequest) -> Result<Opportunity, Error>;

    async fn delete(&self, request: DeleteOpportunityRequest) -> Result<(), Error>;

    async fn apply(&self, request: ApplyRequest) -> Result<ApplyOutcome, Error>;
}

/// Accepts every request without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOpportunitiesCommand;

#[async_trait]
impl OpportunitiesCommand for FixtureOpportunitiesCommand {
    async fn create(&self, request: CreateOpportunityRequest) -> Result<Opportunity, Error> {
        Opportunity::create(request.owner, request.draft, Utc::now())
            .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn delete(&self, _request: DeleteOpportunityRequest) -> Result<(), Error> {
        Ok(())
    }

    async fn apply(&self, request: ApplyRequest) -> Result<ApplyOutcome, Error> {
        Ok(ApplyOutcome {
            opportunity_id: request.opportunity_id,
            newly_applied: true,
        })
    }
}
