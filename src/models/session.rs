//! Session model

use serde::{Deserialize, Serialize};

use super::{Role, User};

/// The client-held record of the authenticated identity.
///
/// Lives from successful authentication until explicit logout. The portal
/// performs no expiry check of its own; a stale credential simply starts
/// failing at the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque credential token issued by the remote API
    pub token: String,
    /// The authenticated user's profile
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Role of the authenticated user
    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.role.is_admin()
    }

    pub fn is_teacher(&self) -> bool {
        self.user.role.is_teacher()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_role_accessors_derive_from_user() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "name": "Dir. Ruiz",
            "email": "ruiz@colegio.com",
            "role": "admin",
            "isVerified": true
        }))
        .unwrap();
        let session = Session::new("tok", user);
        assert!(session.is_admin());
        assert!(!session.is_teacher());
        assert_eq!(session.role(), Role::Admin);
    }
}
