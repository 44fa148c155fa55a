//! Permission lookups on a user's directly attached permissions.

use crate::error::CoreError;
use crate::models::user::User;

/// Full administrative access, including workflow resets.
pub const PERM_ADMIN: &str = "admin";
/// May create and edit retrospec bike records.
pub const PERM_CREATE_BIKE: &str = "Create bike";
/// May sign off the safety check (Creation) step.
pub const PERM_SAFETY_CHECK: &str = "Safety check";

/// Whether `user` holds a permission named exactly `name`.
///
/// No user means no permissions.
pub fn check_user_permissions(user: Option<&User>, name: &str) -> bool {
    user.is_some_and(|u| u.permissions.iter().any(|p| p.name == name))
}

/// Like [`check_user_permissions`], as a `Forbidden` error for early returns.
pub fn require_permission(user: Option<&User>, name: &str) -> Result<(), CoreError> {
    if check_user_permissions(user, name) {
        return Ok(());
    }
    let who = user.map_or_else(|| "anonymous user".to_string(), |u| u.username.clone());
    Err(CoreError::Forbidden(format!(
        "{who} lacks the '{name}' permission"
    )))
}
