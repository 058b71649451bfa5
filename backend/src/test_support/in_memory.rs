//! In-memory implementation of every driven port.
//!
//! Mirrors the PostgreSQL adapters closely enough for behaviour tests:
//! owner listings are newest first, applicant appends are idempotent, and
//! status writes are keyed upserts. A fault can be injected to make every
//! call fail as an unreachable store would.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    ApplicationStatusRepository, ApplicationStatusRepositoryError, OpportunityRepository,
    OpportunityRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    ApplicationKey, ApplicationStatusRecord, Opportunity, OpportunityId, StatusChange, User,
    UserId,
};

/// Failure injected into every repository call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFault {
    /// Behave like a pool checkout timeout.
    Unavailable,
    /// Behave like a failing query.
    QueryFailure,
}

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    opportunities: Vec<Opportunity>,
    statuses: Vec<ApplicationStatusRecord>,
    fault: Option<StoreFault>,
}

/// Shared store; clones see the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn insert_user(&self, user: User) {
        self.lock().users.insert(user.id().clone(), user);
    }

    /// Simulate an account deleted by the identity service.
    pub fn remove_user(&self, id: &UserId) {
        self.lock().users.remove(id);
    }

    pub fn insert_opportunity(&self, opportunity: Opportunity) {
        self.lock().opportunities.push(opportunity);
    }

    pub fn opportunity(&self, id: &OpportunityId) -> Option<Opportunity> {
        self.lock()
            .opportunities
            .iter()
            .find(|opportunity| &opportunity.id == id)
            .cloned()
    }

    /// Every stored status record, in write order.
    pub fn status_records(&self) -> Vec<ApplicationStatusRecord> {
        self.lock().statuses.clone()
    }

    /// Store a record directly, bypassing the service layer.
    pub fn insert_status(&self, record: ApplicationStatusRecord) {
        self.lock().statuses.push(record);
    }

    pub fn set_fault(&self, fault: Option<StoreFault>) {
        self.lock().fault = fault;
    }

    fn check<E>(
        &self,
        connection: impl FnOnce(&'static str) -> E,
        query: impl FnOnce(&'static str) -> E,
    ) -> Result<MutexGuard<'_, State>, E> {
        let state = self.lock();
        match state.fault {
            None => Ok(state),
            Some(StoreFault::Unavailable) => Err(connection("store unavailable")),
            Some(StoreFault::QueryFailure) => Err(query("query failed")),
        }
    }

    fn users(&self) -> Result<MutexGuard<'_, State>, UserRepositoryError> {
        self.check(UserRepositoryError::connection, UserRepositoryError::query)
    }

    fn opportunities(&self) -> Result<MutexGuard<'_, State>, OpportunityRepositoryError> {
        self.check(
            OpportunityRepositoryError::connection,
            OpportunityRepositoryError::query,
        )
    }

    fn statuses(&self) -> Result<MutexGuard<'_, State>, ApplicationStatusRepositoryError> {
        self.check(
            ApplicationStatusRepositoryError::connection,
            ApplicationStatusRepositoryError::query,
        )
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users()?.users.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        let state = self.users()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl OpportunityRepository for InMemoryStore {
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Opportunity>, OpportunityRepositoryError> {
        let mut owned: Vec<Opportunity> = self
            .opportunities()?
            .opportunities
            .iter()
            .filter(|opportunity| opportunity.is_owned_by(owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        Ok(owned)
    }

    async fn find_by_id(
        &self,
        id: &OpportunityId,
    ) -> Result<Option<Opportunity>, OpportunityRepositoryError> {
        Ok(self
            .opportunities()?
            .opportunities
            .iter()
            .find(|opportunity| &opportunity.id == id)
            .cloned())
    }

    async fn insert(&self, opportunity: &Opportunity) -> Result<(), OpportunityRepositoryError> {
        let mut state = self.opportunities()?;
        if state.opportunities.iter().any(|o| o.id == opportunity.id) {
            return Err(OpportunityRepositoryError::query("duplicate opportunity id"));
        }
        state.opportunities.push(opportunity.clone());
        Ok(())
    }

    async fn delete(&self, id: &OpportunityId) -> Result<bool, OpportunityRepositoryError> {
        let mut state = self.opportunities()?;
        let before = state.opportunities.len();
        state.opportunities.retain(|opportunity| &opportunity.id != id);
        Ok(state.opportunities.len() < before)
    }

    async fn append_applicant(
        &self,
        id: &OpportunityId,
        applicant: &UserId,
    ) -> Result<bool, OpportunityRepositoryError> {
        let mut state = self.opportunities()?;
        Ok(state
            .opportunities
            .iter_mut()
            .find(|opportunity| &opportunity.id == id)
            .is_some_and(|opportunity| opportunity.add_applicant(applicant.clone())))
    }
}

#[async_trait]
impl ApplicationStatusRepository for InMemoryStore {
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ApplicationStatusRecord>, ApplicationStatusRepositoryError> {
        let state = self.statuses()?;
        Ok(state
            .statuses
            .iter()
            .filter(|record| {
                state
                    .opportunities
                    .iter()
                    .any(|o| o.id == record.opportunity_id && o.is_owned_by(owner))
            })
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        key: &ApplicationKey,
    ) -> Result<Option<ApplicationStatusRecord>, ApplicationStatusRepositoryError> {
        Ok(self
            .statuses()?
            .statuses
            .iter()
            .find(|record| &record.key() == key)
            .cloned())
    }

    async fn upsert(
        &self,
        change: &StatusChange,
        updated_at: DateTime<Utc>,
    ) -> Result<ApplicationStatusRecord, ApplicationStatusRepositoryError> {
        let mut state = self.statuses()?;
        let record = ApplicationStatusRecord {
            opportunity_id: change.opportunity_id,
            student_id: change.student_id.clone(),
            status: change.status,
            updated_at,
        };
        match state
            .statuses
            .iter_mut()
            .find(|existing| existing.key() == record.key())
        {
            Some(existing) => *existing = record.clone(),
            None => state.statuses.push(record.clone()),
        }
        Ok(record)
    }
}
