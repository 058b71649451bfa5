//! Read-time join of opportunities, applicant references, and status records.
//!
//! Two stores answer different questions: the opportunity's `applicants`
//! list says who applied, the status store says what was decided. Every read
//! model that combines them is built here so the defaulting and orphan rules
//! live in one place:
//!
//! - an applicant with no status record is `pending`;
//! - a status record whose opportunity or student is not in view is ignored;
//! - an applicant reference whose user no longer exists is dropped.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{
    ApplicationKey, ApplicationStatus, ApplicationStatusRecord, Opportunity, OpportunityId, User,
    UserId,
};

/// Users keyed by id for constant-time lookup while populating references.
pub type UserDirectory = HashMap<UserId, User>;

/// Index a batch of users by id.
pub fn index_users(users: impl IntoIterator<Item = User>) -> UserDirectory {
    users
        .into_iter()
        .map(|user| (user.id().clone(), user))
        .collect()
}

/// Distinct applicant ids across `opportunities`, in first-seen order.
pub fn applicant_ids<'a>(
    opportunities: impl IntoIterator<Item = &'a Opportunity>,
) -> Vec<UserId> {
    let mut seen = std::collections::HashSet::new();
    opportunities
        .into_iter()
        .flat_map(|opportunity| opportunity.applicants.iter())
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}

/// Identifying fields of an opportunity repeated on every application row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpportunitySummary {
    #[schema(value_type = String, format = Uuid)]
    pub id: OpportunityId,
    pub project_title: String,
    pub category: String,
}

impl From<&Opportunity> for OpportunitySummary {
    fn from(value: &Opportunity) -> Self {
        Self {
            id: value.id,
            project_title: value.project_title.clone(),
            category: value.category.clone(),
        }
    }
}

/// Applicant fields a reviewer needs to make a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSummary {
    #[schema(value_type = String, format = Uuid)]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_link: Option<String>,
}

impl From<&User> for ApplicantSummary {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: user.id().clone(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            branch: profile.branch.clone(),
            graduation_year: profile.graduation_year,
            skills: profile.skills.clone(),
            cv_link: profile.cv_link.clone(),
        }
    }
}

/// Opportunity with applicant references resolved to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedOpportunity {
    #[serde(flatten)]
    #[schema(inline)]
    pub summary: OpportunitySummary,
    #[schema(value_type = String, format = Uuid)]
    pub owner_id: UserId,
    pub budget: i64,
    pub payment_type: String,
    pub experience_level: String,
    pub project_description: String,
    pub required_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub applicants: Vec<User>,
}

/// Resolve applicant references, dropping ids with no matching user.
pub fn populate_opportunity(
    opportunity: Opportunity,
    users: &UserDirectory,
) -> PopulatedOpportunity {
    let applicants = opportunity
        .applicants
        .iter()
        .filter_map(|id| users.get(id).cloned())
        .collect();
    PopulatedOpportunity {
        summary: OpportunitySummary::from(&opportunity),
        owner_id: opportunity.owner_id,
        budget: opportunity.budget,
        payment_type: opportunity.payment_type,
        experience_level: opportunity.experience_level,
        project_description: opportunity.project_description,
        required_skills: opportunity.required_skills,
        created_at: opportunity.created_at,
        applicants,
    }
}

/// One application as shown to the reviewing alumnus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    /// Composite key `"{opportunityId}-{studentId}"`.
    #[schema(example = "5b0f3c1e-8f64-4d69-9d3c-2f1f6f2e4a11-3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub opportunity: OpportunitySummary,
    pub applicant: ApplicantSummary,
    pub status: ApplicationStatus,
}

/// Applications for one opportunity, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityApplications {
    pub opportunity: OpportunitySummary,
    pub applications: Vec<ApplicationView>,
}

fn status_index(
    records: &[ApplicationStatusRecord],
) -> HashMap<ApplicationKey, ApplicationStatus> {
    records
        .iter()
        .map(|record| (record.key(), record.status))
        .collect()
}

/// Emit one view per (opportunity, applicant) pair.
///
/// Opportunity order and applicant order are preserved. Pairs with no status
/// record resolve to [`ApplicationStatus::Pending`]; records that match no
/// pair are never consulted.
pub fn reconcile(
    opportunities: &[PopulatedOpportunity],
    statuses: &[ApplicationStatusRecord],
) -> Vec<ApplicationView> {
    let index = status_index(statuses);
    let mut views = Vec::new();
    for opportunity in opportunities {
        for applicant in &opportunity.applicants {
            let key = ApplicationKey::new(opportunity.summary.id, applicant.id().clone());
            let status = index.get(&key).copied().unwrap_or_default();
            views.push(ApplicationView {
                id: key.to_string(),
                opportunity: opportunity.summary.clone(),
                applicant: ApplicantSummary::from(applicant),
                status,
            });
        }
    }
    views
}

/// Group views by opportunity, keeping first-seen opportunity order.
pub fn group_by_opportunity(views: Vec<ApplicationView>) -> Vec<OpportunityApplications> {
    let mut groups: Vec<OpportunityApplications> = Vec::new();
    let mut positions: HashMap<OpportunityId, usize> = HashMap::new();
    for view in views {
        let position = *positions.entry(view.opportunity.id).or_insert_with(|| {
            groups.push(OpportunityApplications {
                opportunity: view.opportunity.clone(),
                applications: Vec::new(),
            });
            groups.len() - 1
        });
        if let Some(group) = groups.get_mut(position) {
            group.applications.push(view);
        }
    }
    groups
}

/// Reconcile and group in one step. Opportunities without applicants are
/// omitted.
///
/// # Examples
/// ```
/// use alumni_connect::domain::reconciliation::build_applications_view;
///
/// assert!(build_applications_view(&[], &[]).is_empty());
/// ```
pub fn build_applications_view(
    opportunities: &[PopulatedOpportunity],
    statuses: &[ApplicationStatusRecord],
) -> Vec<OpportunityApplications> {
    group_by_opportunity(reconcile(opportunities, statuses))
}

/// Status record with its opportunity and student resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedStatusRecord {
    /// Composite key `"{opportunityId}-{studentId}"`.
    pub id: String,
    pub opportunity: OpportunitySummary,
    pub student: ApplicantSummary,
    pub status: ApplicationStatus,
    pub updated_at: DateTime<Utc>,
}

/// Populate status records, dropping any whose opportunity is not among
/// `opportunities` or whose student cannot be resolved.
pub fn populate_status_records(
    records: Vec<ApplicationStatusRecord>,
    opportunities: &[Opportunity],
    users: &UserDirectory,
) -> Vec<PopulatedStatusRecord> {
    let by_id: HashMap<OpportunityId, &Opportunity> = opportunities
        .iter()
        .map(|opportunity| (opportunity.id, opportunity))
        .collect();
    records
        .into_iter()
        .filter_map(|record| {
            let opportunity = by_id.get(&record.opportunity_id)?;
            let student = users.get(&record.student_id)?;
            Some(PopulatedStatusRecord {
                id: record.key().to_string(),
                opportunity: OpportunitySummary::from(*opportunity),
                student: ApplicantSummary::from(student),
                status: record.status,
                updated_at: record.updated_at,
            })
        })
        .collect()
}
