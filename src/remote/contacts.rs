//! Contact endpoints
//!
//! The public contact form posts without a credential; listing and triage
//! are admin operations and carry the bearer token.

use serde::Serialize;
use std::sync::Arc;

use super::{ApiClient, ApiError};
use crate::models::{ContactMessage, ContactStatus, ContactSubject};

/// Public contact form payload.
#[derive(Debug, Clone, Serialize)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: ContactSubject,
    pub message: String,
}

/// Thin wrapper over the `/contact` endpoints.
#[derive(Debug, Clone)]
pub struct ContactApi {
    client: Arc<ApiClient>,
}

impl ContactApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// POST /contact - public, no credential.
    pub async fn send_message(&self, input: &ContactInput) -> Result<(), ApiError> {
        self.client
            .post::<serde_json::Value>("/contact", None, input)
            .await?
            .into_ack()
    }

    /// GET /contact - admin triage list, optionally filtered by status.
    pub async fn list(
        &self,
        token: &str,
        status: Option<ContactStatus>,
    ) -> Result<Vec<ContactMessage>, ApiError> {
        let query = match status {
            Some(status) => vec![("status", status.to_string())],
            None => Vec::new(),
        };
        self.client
            .get("/contact", Some(token), &query)
            .await?
            .into_data()
    }

    /// PUT /contact/{id} - status change from the triage view.
    pub async fn update(
        &self,
        token: &str,
        id: &str,
        status: ContactStatus,
    ) -> Result<ContactMessage, ApiError> {
        self.client
            .put(
                &format!("/contact/{}", id),
                Some(token),
                &serde_json::json!({ "status": status }),
            )
            .await?
            .into_data()
    }
}
