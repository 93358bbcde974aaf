//! Course endpoints

use serde::Serialize;
use std::sync::Arc;

use super::{ApiClient, ApiError};
use crate::models::Course;

/// Catalog filters. Absent filters are omitted from the query string, the
/// same way the catalog view omits them.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl CourseFilter {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(category) = &self.category {
            query.push(("category", category.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        query
    }
}

/// Form data for creating or updating a course.
#[derive(Debug, Clone, Serialize)]
pub struct CourseInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub duration: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(rename = "instructorName")]
    pub instructor_name: String,
}

/// Thin wrapper over the `/courses` endpoints.
#[derive(Debug, Clone)]
pub struct CourseApi {
    client: Arc<ApiClient>,
}

impl CourseApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// GET /courses - public catalog, optionally filtered.
    pub async fn list(&self, filter: &CourseFilter) -> Result<Vec<Course>, ApiError> {
        self.client
            .get("/courses", None, &filter.to_query())
            .await?
            .into_data()
    }

    /// GET /courses/{id}
    pub async fn get(&self, id: &str) -> Result<Course, ApiError> {
        self.client
            .get(&format!("/courses/{}", id), None, &[])
            .await?
            .into_data()
    }

    /// POST /courses
    pub async fn create(&self, token: &str, input: &CourseInput) -> Result<Course, ApiError> {
        self.client
            .post("/courses", Some(token), input)
            .await?
            .into_data()
    }

    /// PUT /courses/{id}
    pub async fn update(
        &self,
        token: &str,
        id: &str,
        input: &CourseInput,
    ) -> Result<Course, ApiError> {
        self.client
            .put(&format!("/courses/{}", id), Some(token), input)
            .await?
            .into_data()
    }

    /// DELETE /courses/{id}
    pub async fn delete(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.client
            .delete::<serde_json::Value>(&format!("/courses/{}", id), Some(token))
            .await?
            .into_ack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_omits_absent_params() {
        assert!(CourseFilter::default().to_query().is_empty());

        let filter = CourseFilter {
            category: Some("tech".into()),
            search: None,
        };
        assert_eq!(filter.to_query(), vec![("category", "tech".to_string())]);
    }

    #[test]
    fn test_filter_includes_both_params() {
        let filter = CourseFilter {
            category: Some("art".into()),
            search: Some("pintura".into()),
        };
        let query = filter.to_query();
        assert_eq!(query.len(), 2);
        assert!(query.contains(&("search", "pintura".to_string())));
    }
}
