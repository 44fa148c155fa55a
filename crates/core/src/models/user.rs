//! Users, roles and permissions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::DbId;
use crate::validation::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
}

impl Entity for Permission {
    const NAME: &'static str = "permission";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub role_id: Uuid,
    pub name: String,
    pub disabled: bool,
    pub description: Option<String>,
}

impl Entity for Role {
    const NAME: &'static str = "role";
}

/// A shop user. `username` is the campus netid.
///
/// Permissions are attached directly to the user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub active: bool,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

impl Entity for User {
    const NAME: &'static str = "user";
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "first name is required"))]
    pub firstname: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub lastname: String,
    #[validate(length(min = 2, max = 16))]
    pub username: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateRole {
    #[validate(length(min = 1, message = "role name is required"))]
    pub name: String,
    pub disabled: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreatePermission {
    #[validate(length(min = 1, message = "permission name is required"))]
    pub name: String,
    pub description: Option<String>,
}
