//! Driving port for listing an alumnus's own postings.

use async_trait::async_trait;

use crate::domain::reconciliation::PopulatedOpportunity;
use crate::domain::{Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpportunitiesQuery: Send + Sync {
    /// Opportunities posted by `owner`, newest first, applicants resolved.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<PopulatedOpportunity>, Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOpportunitiesQuery;

#[async_trait]
impl OpportunitiesQuery for FixtureOpportunitiesQuery {
    async fn list_for_owner(&self, _owner: &UserId) -> Result<Vec<PopulatedOpportunity>, Error> {
        Ok(Vec::new())
    }
}
