//! Port for the application status store.
//!
//! One record per (opportunity, student) pair. Records are created lazily by
//! [`ApplicationStatusRepository::upsert`]; a missing record means `pending`.
//! The store holds no reference to opportunities, so records may outlive the
//! opportunity they name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ApplicationKey, ApplicationStatusRecord, StatusChange, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by application status repository adapters.
    pub enum ApplicationStatusRepositoryError for "application status repository";
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationStatusRepository: Send + Sync {
    /// Records for opportunities currently posted by `owner`.
    ///
    /// Resolved against the opportunity store at query time so it can run
    /// alongside [`OpportunityRepository::list_by_owner`] without waiting
    /// for its ids.
    ///
    /// [`OpportunityRepository::list_by_owner`]: super::OpportunityRepository::list_by_owner
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ApplicationStatusRecord>, ApplicationStatusRepositoryError>;

    async fn find(
        &self,
        key: &ApplicationKey,
    ) -> Result<Option<ApplicationStatusRecord>, ApplicationStatusRepositoryError>;

    /// Insert or overwrite the record for the change's key and return what
    /// was stored. Concurrent writers resolve last-write-wins.
    async fn upsert(
        &self,
        change: &StatusChange,
        updated_at: DateTime<Utc>,
    ) -> Result<ApplicationStatusRecord, ApplicationStatusRepositoryError>;
}

/// Store that holds no records and echoes upserts back without keeping them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureApplicationStatusRepository;

#[async_trait]
impl ApplicationStatusRepository for FixtureApplicationStatusRepository {
    async fn list_for_owner(
        &self,
        _owner: &UserId,
    ) -> Result<Vec<ApplicationStatusRecord>, ApplicationStatusRepositoryError> {
        Ok(Vec::new())
    }

    async fn find(
        &self,
        _key: &ApplicationKey,
    ) -> Result<Option<ApplicationStatusRecord>, ApplicationStatusRepositoryError> {
        Ok(None)
    }

    async fn upsert(
        &self,
        change: &StatusChange,
        updated_at: DateTime<Utc>,
    ) -> Result<ApplicationStatusRecord, ApplicationStatusRepositoryError> {
        Ok(ApplicationStatusRecord {
            opportunity_id: change.opportunity_id,
            student_id: change.student_id.clone(),
            status: change.status,
            updated_at,
        })
    }
}
