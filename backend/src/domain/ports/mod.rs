//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Query`, `*Command`) are implemented by domain services and called
//! by inbound adapters. Each port ships a `Fixture*` implementation for tests
//! that do not exercise it.

mod macros;
pub(crate) use macros::define_port_error;

mod application_status_command;
mod application_status_repository;
mod applications_query;
mod opportunities_command;
mod opportunities_query;
mod opportunity_repository;
mod user_repository;

pub use application_status_command::{
    ApplicationStatusCommand, FixtureApplicationStatusCommand, UpdateStatusRequest,
};
#[cfg(test)]
pub use application_status_command::MockApplicationStatusCommand;
pub use application_status_repository::{
    ApplicationStatusRepository, ApplicationStatusRepositoryError,
    FixtureApplicationStatusRepository,
};
#[cfg(test)]
pub use application_status_repository::MockApplicationStatusRepository;
pub use applications_query::{ApplicationsQuery, FixtureApplicationsQuery};
#[cfg(test)]
pub use applications_query::MockApplicationsQuery;
pub use opportunities_command::{
    ApplyOutcome, ApplyRequest, CreateOpportunityRequest, DeleteOpportunityRequest,
    FixtureOpportunitiesCommand, OpportunitiesCommand,
};
#[cfg(test)]
pub use opportunities_command::MockOpportunitiesCommand;
pub use opportunities_query::{FixtureOpportunitiesQuery, OpportunitiesQuery};
#[cfg(test)]
pub use opportunities_query::MockOpportunitiesQuery;
pub use opportunity_repository::{
    FixtureOpportunityRepository, OpportunityRepository, OpportunityRepositoryError,
};
#[cfg(test)]
pub use opportunity_repository::MockOpportunityRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
