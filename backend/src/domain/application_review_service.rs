//! Application review: the reconciled view and the status update.
//!
//! Implements [`ApplicationsQuery`] and [`ApplicationStatusCommand`] over the
//! three driven ports. Reads of opportunities and status records run
//! concurrently; users are fetched once per request in a single batch.
//! Decisions may only be recorded by the owner of the opportunity.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    ApplicationStatusCommand, ApplicationStatusRepository, ApplicationsQuery,
    OpportunityRepository, UpdateStatusRequest, UserRepository,
};
use crate::domain::reconciliation::{
    self, OpportunityApplications, PopulatedStatusRecord, index_users,
};
use crate::domain::service_support::{is_reviewer, require_role};
use crate::domain::{ApplicationStatusRecord, Error, Opportunity, UserId};

/// Service behind the reviewer-facing application endpoints.
#[derive(Clone)]
pub struct ApplicationReviewService<U, O, S> {
    users: Arc<U>,
    opportunities: Arc<O>,
    statuses: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<U, O, S> ApplicationReviewService<U, O, S> {
    pub fn new(
        users: Arc<U>,
        opportunities: Arc<O>,
        statuses: Arc<S>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            opportunities,
            statuses,
            clock,
        }
    }
}

impl<U, O, S> ApplicationReviewService<U, O, S>
where
    U: UserRepository,
    O: OpportunityRepository,
    S: ApplicationStatusRepository,
{
    async fn load_owned(
        &self,
        reviewer: &UserId,
    ) -> Result<(Vec<Opportunity>, Vec<ApplicationStatusRecord>), Error> {
        try_join(
            async {
                self.opportunities
                    .list_by_owner(reviewer)
                    .await
                    .map_err(Error::from)
            },
            async {
                self.statuses
                    .list_for_owner(reviewer)
                    .await
                    .map_err(Error::from)
            },
        )
        .await
    }
}

#[async_trait]
impl<U, O, S> ApplicationsQuery for ApplicationReviewService<U, O, S>
where
    U: UserRepository,
    O: OpportunityRepository,
    S: ApplicationStatusRepository,
{
    async fn list_applications(
        &self,
        reviewer: &UserId,
    ) -> Result<Vec<OpportunityApplications>, Error> {
        require_role(
            self.users.as_ref(),
            reviewer,
            is_reviewer,
            "review applications",
        )
        .await?;
        let (opportunities, statuses) = self.load_owned(reviewer).await?;

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

        let populated: Vec<_> = opportunities
            .into_iter()
            .map(|opportunity| reconciliation::populate_opportunity(opportunity, &directory))
            .collect();
        let view = reconciliation::build_applications_view(&populated, &statuses);
        debug!(
            reviewer = %reviewer,
            opportunities = view.len(),
            statuses = statuses.len(),
            "applications reconciled"
        );
        Ok(view)
    }

    async fn list_status_records(
        &self,
        reviewer: &UserId,
    ) -> Result<Vec<PopulatedStatusRecord>, Error> {
        require_role(
            self.users.as_ref(),
            reviewer,
            is_reviewer,
            "review applications",
        )
        .await?;
        let (opportunities, records) = self.load_owned(reviewer).await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let mut student_ids: Vec<UserId> = records.iter().map(|r| r.student_id.clone()).collect();
        student_ids.sort_by(|a, b| a.as_uuid().cmp(b.as_uuid()));
        student_ids.dedup();
        let directory = index_users(
            self.users
                .find_by_ids(&student_ids)
                .await
                .map_err(Error::from)?,
        );

        Ok(reconciliation::populate_status_records(
            records,
            &opportunities,
            &directory,
        ))
    }
}

#[async_trait]
impl<U, O, S> ApplicationStatusCommand for ApplicationReviewService<U, O, S>
where
    U: UserRepository,
    O: OpportunityRepository,
    S: ApplicationStatusRepository,
{
    async fn update_status(
        &self,
        request: UpdateStatusRequest,
    ) -> Result<ApplicationStatusRecord, Error> {
        let UpdateStatusRequest { reviewer, change } = request;
        require_role(
            self.users.as_ref(),
            &reviewer,
            is_reviewer,
            "update application status",
        )
        .await?;

        // The student need not be a current applicant.
        let opportunity_id = change.opportunity_id;
        let opportunity = self
            .opportunities
            .find_by_id(&opportunity_id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| {
                Error::not_found(format!("opportunity {opportunity_id} not found"))
                    .with_details(json!({"opportunityId": opportunity_id.to_string()}))
            })?;
        if !opportunity.is_owned_by(&reviewer) {
            return Err(Error::forbidden(
                "only the owner may record decisions for an opportunity",
            ));
        }

        let record = self
            .statuses
            .upsert(&change, self.clock.utc())
            .await
            .map_err(Error::from)?;
        info!(
            reviewer = %reviewer,
            opportunity_id = %record.opportunity_id,
            student_id = %record.student_id,
            status = %record.status,
            "application status recorded"
        );
        Ok(record)
    }
}

#[cfg(test)]
#[path = "application_review_service_tests.rs"]
mod tests;
