//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - In-memory and PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration for citizens, verifiers (Green Champions) and admins
//! - Email + password login (no session is issued)
//! - Green point balance with atomic credit and conditional debit
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Password hashes never leave the crate in responses

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use domain::{Debit, User, UserRepository};
pub use error::{AccountError, AccountResult};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::router::{account_router, account_router_generic};

pub mod models {
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
