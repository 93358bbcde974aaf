//! User model and roles
//!
//! The portal never stores capability flags: everything the views need to
//! know about a user's permissions is recomputed from the `Role` enum, so
//! the flags cannot drift from the role field.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user account as reported by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (MongoDB-style `_id` on the wire)
    #[serde(rename = "_id")]
    pub id: String,
    /// Full name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// User role
    #[serde(default)]
    pub role: Role,
    /// Phone number (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Whether the email address has been verified
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
}

/// User role for authorization.
///
/// Determines which protected views and actions the portal exposes.
/// The remote API enforces the same rules again on every call; the
/// client-side checks are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Student - dashboard and enrollments only
    #[default]
    Student,
    /// Teacher - can manage courses
    Teacher,
    /// Admin - full access
    Admin,
}

impl Role {
    /// Check if this is the admin role
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    /// Check if this is the teacher role
    pub fn is_teacher(self) -> bool {
        self == Role::Teacher
    }

    /// Course management is open to teachers and admins
    pub fn can_manage_courses(self) -> bool {
        matches!(self, Role::Teacher | Role::Admin)
    }

    /// User provisioning is admin-only
    pub fn can_manage_users(self) -> bool {
        self.is_admin()
    }

    /// Contact-message triage is admin-only
    pub fn can_manage_contacts(self) -> bool {
        self.is_admin()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Teacher => write!(f, "teacher"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "admin" => Ok(Role::Admin),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Role) -> User {
        User {
            id: "u1".to_string(),
            name: "Test User".to_string(),
            email: "test@colegio.com".to_string(),
            role,
            phone: None,
            is_verified: true,
        }
    }

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Admin.can_manage_courses());
        assert!(Role::Admin.can_manage_users());
        assert!(Role::Admin.can_manage_contacts());

        assert!(Role::Teacher.can_manage_courses());
        assert!(!Role::Teacher.can_manage_users());
        assert!(!Role::Teacher.can_manage_contacts());

        assert!(!Role::Student.can_manage_courses());
        assert!(!Role::Student.can_manage_users());
        assert!(!Role::Student.can_manage_contacts());
    }

    #[test]
    fn test_role_display_round_trip() {
        for role in [Role::Student, Role::Teacher, Role::Admin] {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
        assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
        assert!(Role::from_str("editor").is_err());
    }

    #[test]
    fn test_role_default_is_student() {
        assert_eq!(Role::default(), Role::Student);
    }

    #[test]
    fn test_user_deserializes_wire_format() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "64ab",
            "name": "Ana",
            "email": "ana@colegio.com",
            "role": "teacher",
            "isVerified": true
        }))
        .unwrap();
        assert_eq!(user.id, "64ab");
        assert_eq!(user.role, Role::Teacher);
        assert!(user.is_verified);
        assert!(user.phone.is_none());
    }

    #[test]
    fn test_user_missing_role_defaults_to_student() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "64ac",
            "name": "Luis",
            "email": "luis@colegio.com"
        }))
        .unwrap();
        assert_eq!(user.role, Role::Student);
        assert!(!user.is_verified);
    }

    #[test]
    fn test_capabilities_follow_role() {
        let admin = user_with_role(Role::Admin);
        let student = user_with_role(Role::Student);
        assert!(admin.role.can_manage_users());
        assert!(!student.role.can_manage_users());
    }
}
