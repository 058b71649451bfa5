//! Domain entities, services, and ports.
//!
//! Purpose: model students, alumni, opportunities, and review decisions
//! without any transport or storage concerns. Inbound adapters call the
//! driving ports; outbound adapters implement the driven ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserId, UserRole, UserProfile: identity read model.
//! - Opportunity, OpportunityId, OpportunityDraft: postings and applicants.
//! - ApplicationStatus, ApplicationKey, ApplicationStatusRecord: decisions.
//! - reconciliation: the read-time join of applicants and decisions.
//! - ApplicationReviewService, OpportunityService: driving port implementations.

pub mod application_review_service;
pub mod application_status;
pub mod error;
pub mod opportunity;
pub mod opportunity_service;
pub mod ports;
pub mod reconciliation;
mod service_support;
pub mod trace_id;
pub mod user;

pub use self::application_review_service::ApplicationReviewService;
pub use self::application_status::{
    ApplicationKey, ApplicationStatus, ApplicationStatusRecord, ParseApplicationStatusError,
    StatusChange,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::opportunity::{
    Opportunity, OpportunityDraft, OpportunityId, OpportunityValidationError,
};
pub use self::opportunity_service::OpportunityService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserProfile, UserRole, UserValidationError};
