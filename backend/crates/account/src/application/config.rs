//! Application Configuration
//!
//! Configuration for the Account application layer.

use platform::password::HashCost;

/// Account application configuration
#[derive(Debug, Clone, Default)]
pub struct AccountConfig {
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2id cost for newly created hashes
    pub hash_cost: HashCost,
}

impl AccountConfig {
    /// Cheap hashing for tests and local tooling
    pub fn with_fast_hashing() -> Self {
        Self {
            hash_cost: HashCost::FAST,
            ..Self::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
