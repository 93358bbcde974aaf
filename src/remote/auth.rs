//! Auth endpoints
//!
//! Pure request/response pass-through for `/auth/*`. Session persistence is
//! the session provider's job, not this module's: `login` and
//! `verify_email` return the whole envelope so the caller can inspect the
//! soft-fail `code` before deciding to persist anything.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiClient, ApiError, Envelope};
use crate::models::User;

/// Login form credentials.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration payload (the confirmation field never leaves the portal).
#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Payload of a successful authentication: the credential token plus the
/// user's profile fields, flattened the way the API returns them.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub user: User,
}

/// Thin wrapper over the `/auth/*` endpoints.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// POST /auth/register - creates the account and sends the code.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<Envelope<AuthData>, ApiError> {
        self.client.post("/auth/register", None, payload).await
    }

    /// POST /auth/login
    pub async fn login(&self, credentials: &Credentials) -> Result<Envelope<AuthData>, ApiError> {
        self.client.post("/auth/login", None, credentials).await
    }

    /// POST /auth/verify-email - verification is what authenticates a new
    /// account, so a token is expected on success.
    pub async fn verify_email(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Envelope<AuthData>, ApiError> {
        self.client
            .post(
                "/auth/verify-email",
                None,
                &serde_json::json!({ "email": email, "code": code }),
            )
            .await
    }

    /// POST /auth/resend-code
    pub async fn resend_code(&self, email: &str) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.client
            .post("/auth/resend-code", None, &serde_json::json!({ "email": email }))
            .await
    }

    /// POST /auth/forgot-password
    pub async fn forgot_password(
        &self,
        email: &str,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.client
            .post(
                "/auth/forgot-password",
                None,
                &serde_json::json!({ "email": email }),
            )
            .await
    }

    /// POST /auth/reset-password
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.client
            .post(
                "/auth/reset-password",
                None,
                &serde_json::json!({
                    "email": email,
                    "code": code,
                    "newPassword": new_password,
                }),
            )
            .await
    }
}
