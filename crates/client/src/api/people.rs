//! Customers, users, roles and permissions.

use reqwest::Method;
use uuid::Uuid;
use wheelhouse_core::models::{
    CreateCustomer, CreatePermission, CreateRole, CreateUser, Customer, Permission, Role, User,
};
use wheelhouse_core::types::DbId;
use wheelhouse_core::validation::validate_request;

use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    // ---- customers ----

    pub async fn fetch_customers(&self) -> Result<Vec<Customer>, ClientError> {
        self.get_list("Failed to load customers", "/customers")
            .await
    }

    pub async fn create_customer(&self, body: &CreateCustomer) -> Result<Customer, ClientError> {
        validate_request(body)?;
        self.send_one("Failed to create customer", Method::POST, "/customers", body)
            .await
    }

    // ---- users ----

    pub async fn fetch_users(&self) -> Result<Vec<User>, ClientError> {
        self.get_list("Failed to load users", "/users").await
    }

    /// Fetch a user by netid, with their permissions attached.
    pub async fn fetch_user(&self, netid: &str) -> Result<User, ClientError> {
        self.receive_one(
            "Failed to load user",
            self.request_segment(Method::GET, "/users", netid),
        )
        .await
    }

    pub async fn create_user(&self, body: &CreateUser) -> Result<User, ClientError> {
        validate_request(body)?;
        self.send_one("Failed to create user", Method::POST, "/users", body)
            .await
    }

    pub async fn update_user(&self, user_id: Uuid, body: &CreateUser) -> Result<User, ClientError> {
        validate_request(body)?;
        self.send_one(
            "Failed to update user",
            Method::PUT,
            &format!("/users/{user_id}"),
            body,
        )
        .await
    }

    // ---- roles ----

    /// All roles. The server answers 404 when none exist yet.
    pub async fn fetch_roles(&self) -> Result<Vec<Role>, ClientError> {
        self.get_list_or_empty("Failed to load roles", "/roles")
            .await
    }

    pub async fn create_role(&self, body: &CreateRole) -> Result<Role, ClientError> {
        validate_request(body)?;
        self.send_one("Failed to create role", Method::POST, "/roles", body)
            .await
    }

    pub async fn update_role(&self, role_id: Uuid, body: &CreateRole) -> Result<Role, ClientError> {
        validate_request(body)?;
        self.send_one(
            "Failed to update role",
            Method::PUT,
            &format!("/roles/{role_id}"),
            body,
        )
        .await
    }

    pub async fn delete_role(&self, role_id: Uuid) -> Result<(), ClientError> {
        self.delete("Failed to delete role", &format!("/roles/{role_id}"))
            .await
    }

    // ---- permissions ----

    pub async fn fetch_permissions(&self) -> Result<Vec<Permission>, ClientError> {
        self.get_list("Failed to load permissions", "/permissions")
            .await
    }

    pub async fn create_permission(
        &self,
        body: &CreatePermission,
    ) -> Result<Permission, ClientError> {
        validate_request(body)?;
        self.send_one(
            "Failed to create permission",
            Method::POST,
            "/permissions",
            body,
        )
        .await
    }

    pub async fn update_permission(
        &self,
        permission_id: DbId,
        body: &CreatePermission,
    ) -> Result<Permission, ClientError> {
        validate_request(body)?;
        self.send_one(
            "Failed to update permission",
            Method::PUT,
            &format!("/permissions/{permission_id}"),
            body,
        )
        .await
    }

    pub async fn delete_permission(&self, permission_id: DbId) -> Result<(), ClientError> {
        self.delete(
            "Failed to delete permission",
            &format!("/permissions/{permission_id}"),
        )
        .await
    }
}
