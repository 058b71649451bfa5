//! Driving port for reading applications to the caller's opportunities.

use async_trait::async_trait;

use crate::domain::reconciliation::{OpportunityApplications, PopulatedStatusRecord};
use crate::domain::{Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationsQuery: Send + Sync {
    /// Reconciled view: every applicant to every opportunity the reviewer
    /// owns, grouped by opportunity, with missing decisions shown as pending.
    async fn list_applications(
        &self,
        reviewer: &UserId,
    ) -> Result<Vec<OpportunityApplications>, Error>;

    /// Stored decisions for the reviewer's opportunities with opportunity and
    /// student populated. Records that cannot be resolved are omitted.
    async fn list_status_records(
        &self,
        reviewer: &UserId,
    ) -> Result<Vec<PopulatedStatusRecord>, Error>;
}

/// Query that reports no applications.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureApplicationsQuery;

#[async_trait]
impl ApplicationsQuery for FixtureApplicationsQuery {
    async fn list_applications(
        &self,
        _reviewer: &UserId,
    ) -> Result<Vec<OpportunityApplications>, Error> {
        Ok(Vec::new())
    }

    async fn list_status_records(
        &self,
        _reviewer: &UserId,
    ) -> Result<Vec<PopulatedStatusRecord>, Error> {
        Ok(Vec::new())
    }
}
