//! Opportunities posted by alumni and the ordered applicant list they carry.
//!
//! The `applicants` sequence is the only record of who applied. Insertion
//! order is application order and is preserved by every read path.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Validation errors raised while building opportunities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpportunityValidationError {
    #[error("opportunity id must be a valid UUID")]
    InvalidId,
    #[error("project title must not be empty")]
    EmptyTitle,
    #[error("category must not be empty")]
    EmptyCategory,
    #[error("project description must not be empty")]
    EmptyDescription,
    #[error("budget must not be negative")]
    NegativeBudget,
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl OpportunityValidationError {
    /// Request field the failure relates to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "opportunityId",
            Self::EmptyTitle => "projectTitle",
            Self::EmptyCategory => "category",
            Self::EmptyDescription => "projectDescription",
            Self::NegativeBudget => "budget",
            Self::TooLong { field, .. } => *field,
        }
    }

    /// Stable machine-readable code for error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_uuid",
            Self::EmptyTitle | Self::EmptyCategory | Self::EmptyDescription => "empty_field",
            Self::NegativeBudget => "negative_budget",
            Self::TooLong { .. } => "too_long",
        }
    }
}

/// Opportunity identifier.
///
/// # Examples
/// ```
/// use alumni_connect::domain::OpportunityId;
///
/// let id = OpportunityId::new("5b0f3c1e-8f64-4d69-9d3c-2f1f6f2e4a11").expect("uuid");
/// assert_eq!(id.to_string(), "5b0f3c1e-8f64-4d69-9d3c-2f1f6f2e4a11");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OpportunityId(Uuid);

impl OpportunityId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, OpportunityValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(OpportunityValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| OpportunityValidationError::InvalidId)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OpportunityId> for String {
    fn from(value: OpportunityId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for OpportunityId {
    type Error = OpportunityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Column widths of the `opportunities` table, in characters.
pub const PROJECT_TITLE_MAX: usize = 200;
pub const CATEGORY_MAX: usize = 100;
pub const PAYMENT_TYPE_MAX: usize = 32;
pub const EXPERIENCE_LEVEL_MAX: usize = 32;

fn within(
    value: String,
    field: &'static str,
    max: usize,
) -> Result<String, OpportunityValidationError> {
    if value.chars().count() > max {
        return Err(OpportunityValidationError::TooLong { field, max });
    }
    Ok(value)
}

/// Caller-supplied content of a new posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpportunityDraft {
    pub project_title: String,
    pub category: String,
    pub budget: i64,
    pub payment_type: String,
    pub experience_level: String,
    pub project_description: String,
    pub required_skills: Vec<String>,
}

impl OpportunityDraft {
    /// Check the draft and normalise surrounding whitespace.
    ///
    /// Lengths are counted after trimming. Skills that are blank after
    /// trimming are dropped.
    pub fn validate(self) -> Result<Self, OpportunityValidationError> {
        let project_title = self.project_title.trim().to_owned();
        if project_title.is_empty() {
            return Err(OpportunityValidationError::EmptyTitle);
        }
        let project_title = within(project_title, "projectTitle", PROJECT_TITLE_MAX)?;
        let category = self.category.trim().to_owned();
        if category.is_empty() {
            return Err(OpportunityValidationError::EmptyCategory);
        }
        let category = within(category, "category", CATEGORY_MAX)?;
        let project_description = self.project_description.trim().to_owned();
        if project_description.is_empty() {
            return Err(OpportunityValidationError::EmptyDescription);
        }
        if self.budget < 0 {
            return Err(OpportunityValidationError::NegativeBudget);
        }
        let payment_type = within(
            self.payment_type.trim().to_owned(),
            "paymentType",
            PAYMENT_TYPE_MAX,
        )?;
        let experience_level = within(
            self.experience_level.trim().to_owned(),
            "experienceLevel",
            EXPERIENCE_LEVEL_MAX,
        )?;
        Ok(Self {
            project_title,
            category,
            budget: self.budget,
            payment_type,
            experience_level,
            project_description,
            required_skills: self
                .required_skills
                .into_iter()
                .map(|skill| skill.trim().to_owned())
                .filter(|skill| !skill.is_empty())
                .collect(),
        })
    }
}

/// A posting together with its applicant references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    #[schema(value_type = String, format = Uuid)]
    pub id: OpportunityId,
    #[schema(value_type = String, format = Uuid)]
    pub owner_id: UserId,
    pub project_title: String,
    pub category: String,
    pub budget: i64,
    pub payment_type: String,
    pub experience_level: String,
    pub project_description: String,
    pub required_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Vec<String>)]
    pub applicants: Vec<UserId>,
}

impl Opportunity {
    /// Create a fresh posting from a draft. The applicant list starts empty.
    ///
    /// # Examples
    /// ```
    /// use alumni_connect::domain::{Opportunity, OpportunityDraft, UserId};
    /// use chrono::Utc;
    ///
    /// let draft = OpportunityDraft {
    ///     project_title: "Landing page".into(),
    ///     category: "Web".into(),
    ///     budget: 500,
    ///     payment_type: "fixed".into(),
    ///     experience_level: "Entry".into(),
    ///     project_description: "Build a landing page".into(),
    ///     required_skills: vec!["html".into()],
    /// };
    /// let opportunity = Opportunity::create(UserId::random(), draft, Utc::now()).expect("valid");
    /// assert!(opportunity.applicants.is_empty());
    /// ```
    pub fn create(
        owner_id: UserId,
        draft: OpportunityDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OpportunityValidationError> {
        let draft = draft.validate()?;
        Ok(Self {
            id: OpportunityId::random(),
            owner_id,
            project_title: draft.project_title,
            category: draft.category,
            budget: draft.budget,
            payment_type: draft.payment_type,
            experience_level: draft.experience_level,
            project_description: draft.project_description,
            required_skills: draft.required_skills,
            created_at,
            applicants: Vec::new(),
        })
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    pub fn has_applicant(&self, user: &UserId) -> bool {
        self.applicants.contains(user)
    }

    /// Append `user` unless already present. Returns whether the list changed.
    pub fn add_applicant(&mut self, user: UserId) -> bool {
        if self.has_applicant(&user) {
            return false;
        }
        self.applicants.push(user);
        true
    }
}
