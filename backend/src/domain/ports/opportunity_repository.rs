//! Port for opportunity persistence.
//!
//! Adapters store the applicant list as an ordered sequence and must never
//! reorder it. Appends are the only mutation the list sees.

use async_trait::async_trait;

use crate::domain::{Opportunity, OpportunityId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by opportunity repository adapters.
    pub enum OpportunityRepositoryError for "opportunity repository";
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpportunityRepository: Send + Sync {
    /// Opportunities posted by `owner`, newest first.
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Opportunity>, OpportunityRepositoryError>;

    async fn find_by_id(
        &self,
        id: &OpportunityId,
    ) -> Result<Option<Opportunity>, OpportunityRepositoryError>;

    /// Persist a new opportunity.
    async fn insert(&self, opportunity: &Opportunity) -> Result<(), OpportunityRepositoryError>;

    /// Delete an opportunity. Returns `false` when nothing matched.
    async fn delete(&self, id: &OpportunityId) -> Result<bool, OpportunityRepositoryError>;

    /// Append `applicant` to the applicant list unless already present.
    ///
    /// Returns `true` when the list changed. Implementations must make the
    /// membership check and append a single atomic step.
    async fn append_applicant(
        &self,
        id: &OpportunityId,
        applicant: &UserId,
    ) -> Result<bool, OpportunityRepositoryError>;
}

/// Empty store: lookups miss and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOpportunityRepository;

#[async_trait]
impl OpportunityRepository for FixtureOpportunityRepository {
    async fn list_by_owner(
        &self,
        _owner: &UserId,
    ) -> Result<Vec<Opportunity>, OpportunityRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: &OpportunityId,
    ) -> Result<Option<Opportunity>, OpportunityRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _opportunity: &Opportunity) -> Result<(), OpportunityRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: &OpportunityId) -> Result<bool, OpportunityRepositoryError> {
        Ok(false)
    }

    async fn append_applicant(
        &self,
        _id: &OpportunityId,
        _applicant: &UserId,
    ) -> Result<bool, OpportunityRepositoryError> {
        Ok(false)
    }
}
