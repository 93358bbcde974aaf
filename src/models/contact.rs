//! Contact message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A message submitted through the public contact form.
///
/// Status is mutated only by admins in the triage view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Unique identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Sender phone (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Message subject category
    #[serde(default)]
    pub subject: ContactSubject,
    /// Message body
    pub message: String,
    /// Triage status
    #[serde(default)]
    pub status: ContactStatus,
    /// Submission timestamp
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Subject category of a contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactSubject {
    /// Admissions inquiry
    Admissions,
    /// Course information
    Courses,
    /// Financial matters
    Financial,
    /// Anything else
    #[default]
    Other,
}

impl fmt::Display for ContactSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactSubject::Admissions => write!(f, "admissions"),
            ContactSubject::Courses => write!(f, "courses"),
            ContactSubject::Financial => write!(f, "financial"),
            ContactSubject::Other => write!(f, "other"),
        }
    }
}

/// Triage status of a contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ContactStatus {
    /// Awaiting triage
    #[default]
    #[serde(rename = "pending")]
    Pending,
    /// Being handled
    #[serde(rename = "in-progress")]
    InProgress,
    /// Resolved
    #[serde(rename = "resolved")]
    Resolved,
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactStatus::Pending => write!(f, "pending"),
            ContactStatus::InProgress => write!(f, "in-progress"),
            ContactStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl FromStr for ContactStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ContactStatus::Pending),
            "in-progress" => Ok(ContactStatus::InProgress),
            "resolved" => Ok(ContactStatus::Resolved),
            _ => Err(anyhow::anyhow!("Invalid contact status: {}", s)),
        }
    }
}
