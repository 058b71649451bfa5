//! Role checks shared by the domain services.

use serde_json::json;

use crate::domain::ports::UserRepository;
use crate::domain::{Error, User, UserId, UserRole};

/// Resolve the session user and check their role.
///
/// A session naming a user the identity store no longer knows is treated as
/// unauthenticated.
pub(crate) async fn require_role<U>(
    users: &U,
    user_id: &UserId,
    permitted: fn(UserRole) -> bool,
    action: &str,
) -> Result<User, Error>
where
    U: UserRepository + ?Sized,
{
    let user = users
        .find_by_id(user_id)
        .await
        .map_err(Error::from)?
        .ok_or_else(|| Error::unauthorized("session user not found"))?;
    if permitted(user.role()) {
        return Ok(user);
    }
    Err(
        Error::forbidden(format!("role {} may not {action}", user.role())).with_details(json!({
            "role": user.role(),
            "code": "role_not_permitted",
        })),
    )
}

pub(crate) fn is_reviewer(role: UserRole) -> bool {
    role.can_review_applications()
}

pub(crate) fn is_student(role: UserRole) -> bool {
    matches!(role, UserRole::Student)
}
