//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_password::UserPassword, user_role::UserRole,
};

/// Registered account
///
/// `green_points` is only changed through the repository's atomic balance
/// operations, never by writing the entity back.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    /// Login identifier (unique, case-sensitive)
    pub email: Email,
    pub password: UserPassword,
    pub name: DisplayName,
    pub role: UserRole,
    pub address: Option<String>,
    /// Municipal ward; reports are routed to verifiers by owner zone
    pub zone: Option<String>,
    pub green_points: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id and the role's signup bonus
    pub fn new(
        email: Email,
        password: UserPassword,
        name: DisplayName,
        role: UserRole,
        address: Option<String>,
        zone: Option<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            email,
            password,
            name,
            role,
            address: address.filter(|a| !a.is_empty()),
            zone: zone.filter(|z| !z.is_empty()),
            green_points: role.signup_bonus(),
            created_at: Utc::now(),
        }
    }

    /// Whether the owner of this account belongs to `zone` (exact match)
    pub fn is_in_zone(&self, zone: &str) -> bool {
        self.zone.as_deref() == Some(zone)
    }
}

/// Outcome of a conditional balance debit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Debit {
    /// Cost was subtracted; carries the new balance
    Applied { balance: i32 },
    /// Balance was lower than the cost; nothing changed
    InsufficientBalance { balance: i32 },
    UserNotFound,
}

impl Debit {
    pub fn is_applied(&self) -> bool {
        matches!(self, Debit::Applied { .. })
    }
}
