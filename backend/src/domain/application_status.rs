//! Decisions recorded against individual applications.
//!
//! A status record exists only once a reviewer has changed the decision for a
//! given (opportunity, student) pair. A pair with no record is `pending`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{OpportunityId, UserId};

/// Review decision for one application.
///
/// # Examples
/// ```
/// use alumni_connect::domain::ApplicationStatus;
///
/// assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
/// assert_eq!("accepted".parse(), Ok(ApplicationStatus::Accepted));
/// assert!("maybe".parse::<ApplicationStatus>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Every accepted value, in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Accepted, Self::Rejected];

    /// Database and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a status outside the allowed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be one of pending, accepted, rejected (got `{input}`)")]
pub struct ParseApplicationStatusError {
    pub input: String,
}

impl FromStr for ApplicationStatus {
    type Err = ParseApplicationStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseApplicationStatusError {
                input: s.to_owned(),
            })
    }
}

/// Composite key joining the applicant list to the status store.
///
/// Rendered as `"{opportunityId}-{studentId}"`, the id the read side gives
/// each application.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApplicationKey {
    pub opportunity_id: OpportunityId,
    pub student_id: UserId,
}

impl ApplicationKey {
    pub fn new(opportunity_id: OpportunityId, student_id: UserId) -> Self {
        Self {
            opportunity_id,
            student_id,
        }
    }
}

impl fmt::Display for ApplicationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.opportunity_id, self.student_id)
    }
}

/// Stored decision for one (opportunity, student) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatusRecord {
    #[schema(value_type = String, format = Uuid)]
    pub opportunity_id: OpportunityId,
    #[schema(value_type = String, format = Uuid)]
    pub student_id: UserId,
    pub status: ApplicationStatus,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationStatusRecord {
    pub fn key(&self) -> ApplicationKey {
        ApplicationKey::new(self.opportunity_id, self.student_id.clone())
    }
}

/// Request to record a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub opportunity_id: OpportunityId,
    pub student_id: UserId,
    pub status: ApplicationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const OPPORTUNITY: &str = "5b0f3c1e-8f64-4d69-9d3c-2f1f6f2e4a11";
    const STUDENT: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    #[case("pending", ApplicationStatus::Pending)]
    #[case("accepted", ApplicationStatus::Accepted)]
    #[case("rejected", ApplicationStatus::Rejected)]
    fn parses_known_statuses(#[case] raw: &str, #[case] expected: ApplicationStatus) {
        assert_eq!(raw.parse::<ApplicationStatus>(), Ok(expected));
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    #[case("maybe")]
    #[case("Accepted")]
    #[case("")]
    #[case(" pending")]
    fn rejects_unknown_statuses(#[case] raw: &str) {
        let err = raw.parse::<ApplicationStatus>().expect_err("unknown status");
        assert_eq!(err.input, raw);
    }

    #[rstest]
    fn key_renders_both_hyphenated_uuids() {
        let key = ApplicationKey::new(
            OpportunityId::new(OPPORTUNITY).expect("uuid"),
            UserId::new(STUDENT).expect("uuid"),
        );
        let rendered = key.to_string();
        assert_eq!(rendered, format!("{OPPORTUNITY}-{STUDENT}"));
    }
}
