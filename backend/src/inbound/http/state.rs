//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on driving ports,
//! so they can be exercised with fixtures or mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ApplicationStatusCommand, ApplicationsQuery, FixtureApplicationStatusCommand,
    FixtureApplicationsQuery, FixtureOpportunitiesCommand, FixtureOpportunitiesQuery,
    OpportunitiesCommand, OpportunitiesQuery,
};

/// Port implementations used by the handlers.
#[derive(Clone)]
pub struct HttpState {
    pub applications: Arc<dyn ApplicationsQuery>,
    pub application_status: Arc<dyn ApplicationStatusCommand>,
    pub opportunities: Arc<dyn OpportunitiesQuery>,
    pub opportunities_command: Arc<dyn OpportunitiesCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use alumni_connect::domain::ports::{
    ///     FixtureApplicationStatusCommand, FixtureApplicationsQuery,
    ///     FixtureOpportunitiesCommand, FixtureOpportunitiesQuery,
    /// };
    /// use alumni_connect::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureApplicationsQuery),
    ///     Arc::new(FixtureApplicationStatusCommand),
    ///     Arc::new(FixtureOpportunitiesQuery),
    ///     Arc::new(FixtureOpportunitiesCommand),
    /// );
    /// let _applications = state.applications.clone();
    /// ```
    pub fn new(
        applications: Arc<dyn ApplicationsQuery>,
        application_status: Arc<dyn ApplicationStatusCommand>,
        opportunities: Arc<dyn OpportunitiesQuery>,
        opportunities_command: Arc<dyn OpportunitiesCommand>,
    ) -> Self {
        Self {
            applications,
            application_status,
            opportunities,
            opportunities_command,
        }
    }

    /// State backed entirely by fixture ports; used when no database is
    /// configured.
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureApplicationsQuery),
            Arc::new(FixtureApplicationStatusCommand),
            Arc::new(FixtureOpportunitiesQuery),
            Arc::new(FixtureOpportunitiesCommand),
        )
    }

    /// Replace the review ports with a single service implementing both.
    #[must_use]
    pub fn with_review_service<S>(mut self, service: Arc<S>) -> Self
    where
        S: ApplicationsQuery + ApplicationStatusCommand + 'static,
    {
        self.applications = service.clone();
        self.application_status = service;
        self
    }

    /// Replace the opportunity ports with a single service implementing both.
    #[must_use]
    pub fn with_opportunity_service<S>(mut self, service: Arc<S>) -> Self
    where
        S: OpportunitiesQuery + OpportunitiesCommand + 'static,
    {
        self.opportunities = service.clone();
        self.opportunities_command = service;
        self
    }
}
