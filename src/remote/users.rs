//! User management endpoints (admin view)

use serde::Serialize;
use std::sync::Arc;

use super::{ApiClient, ApiError};
use crate::models::{Role, User};

/// Teacher-provisioning form payload.
#[derive(Debug, Clone, Serialize)]
pub struct TeacherInput {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

/// Thin wrapper over the `/users` endpoints.
#[derive(Debug, Clone)]
pub struct UserApi {
    client: Arc<ApiClient>,
}

impl UserApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// GET /users
    pub async fn list(&self, token: &str) -> Result<Vec<User>, ApiError> {
        self.client
            .get("/users", Some(token), &[])
            .await?
            .into_data()
    }

    /// POST /users/teachers - provision a teacher account.
    pub async fn create_teacher(&self, token: &str, input: &TeacherInput) -> Result<User, ApiError> {
        self.client
            .post("/users/teachers", Some(token), input)
            .await?
            .into_data()
    }

    /// PUT /users/{id} - role change.
    pub async fn update(&self, token: &str, id: &str, role: Role) -> Result<User, ApiError> {
        self.client
            .put(
                &format!("/users/{}", id),
                Some(token),
                &serde_json::json!({ "role": role }),
            )
            .await?
            .into_data()
    }

    /// DELETE /users/{id}
    pub async fn delete(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.client
            .delete::<serde_json::Value>(&format!("/users/{}", id), Some(token))
            .await?
            .into_ack()
    }
}
