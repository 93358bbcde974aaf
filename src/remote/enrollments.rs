//! Enrollment endpoints

use serde::Serialize;
use std::sync::Arc;

use super::{ApiClient, ApiError};
use crate::models::{Enrollment, EnrollmentStatus};

/// Partial update for an enrollment (progress tracking).
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnrollmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EnrollmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

/// Thin wrapper over the `/enrollments` endpoints.
#[derive(Debug, Clone)]
pub struct EnrollmentApi {
    client: Arc<ApiClient>,
}

impl EnrollmentApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// POST /enrollments - enroll the authenticated student in a course.
    pub async fn enroll(&self, token: &str, course_id: &str) -> Result<Enrollment, ApiError> {
        self.client
            .post(
                "/enrollments",
                Some(token),
                &serde_json::json!({ "courseId": course_id }),
            )
            .await?
            .into_data()
    }

    /// GET /enrollments/my-enrollments - the authenticated student's own.
    pub async fn my_enrollments(&self, token: &str) -> Result<Vec<Enrollment>, ApiError> {
        self.client
            .get("/enrollments/my-enrollments", Some(token), &[])
            .await?
            .into_data()
    }

    /// GET /enrollments - every enrollment (teacher/admin overview).
    pub async fn list_all(&self, token: &str) -> Result<Vec<Enrollment>, ApiError> {
        self.client
            .get("/enrollments", Some(token), &[])
            .await?
            .into_data()
    }

    /// PUT /enrollments/{id}
    pub async fn update(
        &self,
        token: &str,
        id: &str,
        update: &EnrollmentUpdate,
    ) -> Result<Enrollment, ApiError> {
        self.client
            .put(&format!("/enrollments/{}", id), Some(token), update)
            .await?
            .into_data()
    }
}
