//! Enrollment model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Course;

/// A student's enrollment in a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    /// Unique identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Enrolled student's user id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<String>,
    /// The course, either populated or as a bare id
    pub course: CourseRef,
    /// Enrollment status
    #[serde(default)]
    pub status: EnrollmentStatus,
    /// Completion percentage (0-100)
    #[serde(default)]
    pub progress: u8,
}

/// The API populates `course` on dashboard reads but returns a bare id
/// right after enrolling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseRef {
    Full(Course),
    Id(String),
}

impl CourseRef {
    /// Course id regardless of population
    pub fn id(&self) -> &str {
        match self {
            CourseRef::Full(course) => &course.id,
            CourseRef::Id(id) => id,
        }
    }

    /// Course title when populated
    pub fn title(&self) -> Option<&str> {
        match self {
            CourseRef::Full(course) => Some(&course.title),
            CourseRef::Id(_) => None,
        }
    }
}

/// Enrollment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// Active - the default right after enrolling
    #[default]
    Active,
    /// Completed
    Completed,
    /// Pending - awaiting approval or payment
    Pending,
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentStatus::Active => write!(f, "active"),
            EnrollmentStatus::Completed => write!(f, "completed"),
            EnrollmentStatus::Pending => write!(f, "pending"),
        }
    }
}
