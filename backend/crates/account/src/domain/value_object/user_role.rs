use serde::{Deserialize, Serialize};
use std::fmt;

/// Starting balance granted to newly registered citizens
pub const CITIZEN_SIGNUP_BONUS: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum UserRole {
    Citizen = 0,
    /// Green Champion. Reviews reports in their zone.
    #[serde(alias = "champion")]
    Verifier = 1,
    Admin = 2,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Citizen => "citizen",
            Verifier => "verifier",
            Admin => "admin",
        }
    }

    /// Points credited when an account with this role is created
    #[inline]
    pub const fn signup_bonus(&self) -> i32 {
        match self {
            UserRole::Citizen => CITIZEN_SIGNUP_BONUS,
            UserRole::Verifier | UserRole::Admin => 0,
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        use UserRole::*;
        match id {
            0 => Some(Citizen),
            1 => Some(Verifier),
            2 => Some(Admin),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "citizen" => Some(Citizen),
            "verifier" | "champion" => Some(Verifier),
            "admin" => Some(Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
