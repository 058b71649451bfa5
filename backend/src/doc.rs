//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary for client generation.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::reconciliation::{
    ApplicantSummary, ApplicationView, OpportunityApplications, OpportunitySummary,
    PopulatedOpportunity, PopulatedStatusRecord,
};
use crate::domain::{
    ApplicationStatus, ApplicationStatusRecord, Error, ErrorCode, Opportunity, User, UserProfile,
    UserRole,
};
use crate::inbound::http::applications::UpdateStatusBody;
use crate::inbound::http::opportunities::{ApplyResponse, CreateOpportunityBody};

/// Registers the session cookie issued by the auth service.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the alumni-connect auth service.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Alumni connect backend API",
        description = "Opportunities posted by alumni, student applications, and review decisions."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::opportunities::list_own_opportunities,
        crate::inbound::http::opportunities::create_opportunity,
        crate::inbound::http::opportunities::delete_opportunity,
        crate::inbound::http::opportunities::apply_to_opportunity,
        crate::inbound::http::applications::list_applications,
        crate::inbound::http::applications::list_status_records,
        crate::inbound::http::applications::update_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        UserRole,
        UserProfile,
        Opportunity,
        ApplicationStatus,
        ApplicationStatusRecord,
        OpportunitySummary,
        ApplicantSummary,
        ApplicationView,
        OpportunityApplications,
        PopulatedOpportunity,
        PopulatedStatusRecord,
        UpdateStatusBody,
        CreateOpportunityBody,
        ApplyResponse,
    )),
    tags(
        (name = "opportunities", description = "Postings and applications to them"),
        (name = "applications", description = "Reviewing applicants"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
