//! Driving port for recording review decisions.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{ApplicationStatusRecord, Error, StatusChange, UserId};

/// Decision submitted by a reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    /// Authenticated caller; must hold the alumni or admin role.
    pub reviewer: UserId,
    pub change: StatusChange,
}

/// Record a decision for exactly one (opportunity, student) pair.
///
/// The opportunity's applicant list is never touched. Repeating a request
/// succeeds and leaves the same stored status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationStatusCommand: Send + Sync {
    async fn update_status(
        &self,
        request: UpdateStatusRequest,
    ) -> Result<ApplicationStatusRecord, Error>;
}

/// Echoes the requested change as if it had been stored; nothing is persisted.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureApplicationStatusCommand;

#[async_trait]
impl ApplicationStatusCommand for FixtureApplicationStatusCommand {
    async fn update_status(
        &self,
        request: UpdateStatusRequest,
    ) -> Result<ApplicationStatusRecord, Error> {
        let StatusChange {
            opportunity_id,
            student_id,
            status,
        } = request.change;
        Ok(ApplicationStatusRecord {
            opportunity_id,
            student_id,
            status,
            updated_at: Utc::now(),
        })
    }
}
