//! Email Value Object
//!
//! Represents a validated email address used as the login identifier.
//! The address is stored exactly as entered (after trimming), so lookups and
//! the uniqueness check are case-sensitive.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;
use std::str::FromStr;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local part length (per RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

/// Non-alphanumeric characters allowed in the local part, besides single dots
const LOCAL_SYMBOLS: &str = "!#$%&'*+/=?^_`{|}~-";

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Trim and validate
    ///
    /// The error message names the first rule that failed; callers fold it
    /// into `invalid data` and only log it.
    pub fn new(email: impl AsRef<str>) -> AppResult<Self> {
        let email = email.as_ref().trim();
        Self::check(email).map_err(|rule| AppError::bad_request(format!("Email {rule}")))?;
        Ok(Self(email.to_string()))
    }

    fn check(email: &str) -> Result<(), &'static str> {
        if email.is_empty() {
            return Err("cannot be empty");
        }
        if email.len() > EMAIL_MAX_LENGTH {
            return Err("is longer than 254 characters");
        }

        let (local, domain) = match email.split('@').collect::<Vec<_>>()[..] {
            [local, domain] => (local, domain),
            _ => return Err("must contain exactly one @"),
        };

        match local.len() {
            0 => return Err("has an empty local part"),
            n if n > LOCAL_PART_MAX_LENGTH => return Err("local part is longer than 64 characters"),
            _ => {}
        }
        let local_char = |c: char| c.is_ascii_alphanumeric() || c == '.' || LOCAL_SYMBOLS.contains(c);
        if !local.chars().all(local_char) {
            return Err("local part contains an invalid character");
        }
        if local.split('.').any(str::is_empty) {
            return Err("local part has a misplaced dot");
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return Err("domain is not a dotted host name");
        }
        for label in labels {
            if label.is_empty() {
                return Err("domain has an empty label");
            }
            if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err("domain is not a dotted host name");
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err("domain label starts or ends with a hyphen");
            }
        }

        Ok(())
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
