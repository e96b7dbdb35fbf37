//! Session data models.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::token::AccessToken;

/// A user's role flag.
///
/// Roles gate navigation and actions in the view layer only; authorization
/// is enforced server-side by the backend's token-scoped policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
    Superuser,
}

impl Role {
    /// Whether the role grants access to the admin back-office.
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::Superuser)
    }

    /// Whether the role may manage other users' roles.
    #[must_use]
    pub fn is_superuser(self) -> bool {
        matches!(self, Self::Superuser)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
            Self::Superuser => "superuser",
        }
    }
}

/// The signed-in user's profile row.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub facebook_link: Option<String>,
    pub facebook_name: Option<String>,
    pub birthday: Option<Date>,
    pub role: Role,
    pub created_at: Timestamp,
}

/// An authenticated session issued by the backend.
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer credential sent with every gateway request.
    pub access_token: AccessToken,

    /// Opaque credential used to mint a fresh access token.
    pub refresh_token: AccessToken,

    /// When the access token stops being accepted.
    pub expires_at: Timestamp,

    /// Identity this session was issued to.
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_superuser_gate_the_back_office() {
        assert!(!Role::Customer.is_admin());
        assert!(Role::Admin.is_admin());
        assert!(Role::Superuser.is_admin());
    }

    #[test]
    fn only_superuser_manages_roles() {
        assert!(!Role::Admin.is_superuser());
        assert!(Role::Superuser.is_superuser());
    }

    #[test]
    fn roles_deserialize_from_lowercase() {
        let role: Role = serde_json::from_str("\"superuser\"").unwrap();

        assert_eq!(role, Role::Superuser);
    }
}
