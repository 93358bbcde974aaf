//! Course model

use serde::{Deserialize, Serialize};

/// A course in the academic catalog.
///
/// Created and edited only through the teacher/admin views; read by the
/// public catalog and the dashboard alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Course title
    pub title: String,
    /// Description shown on the catalog card
    #[serde(default)]
    pub description: String,
    /// Category key (tech, art, science, languages, business)
    #[serde(default)]
    pub category: String,
    /// Difficulty level
    #[serde(default)]
    pub level: String,
    /// Human-readable duration (e.g. "3 meses")
    #[serde(default)]
    pub duration: String,
    /// Price in the school's currency
    #[serde(default)]
    pub price: f64,
    /// Cover image URL (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Instructor user id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    /// Instructor display name
    #[serde(rename = "instructorName", default)]
    pub instructor_name: String,
    /// Number of enrolled students
    #[serde(rename = "studentsCount", default)]
    pub students_count: i64,
    /// Average rating
    #[serde(default)]
    pub rating: f64,
}
