//! Ledger Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Reports, rewards, repository traits
//! - `application/` - Use cases and the reward catalog
//! - `infra/` - In-memory and PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Points Model
//! - Citizens file reports; verifiers mark them verified or rejected
//! - A verified report credits its category's points to the owner
//! - Points are redeemed against a fixed reward catalog
//! - Balance check and debit are a single atomic step per user

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{LedgerConfig, default_catalog};
pub use domain::{ReportRepository, RewardRepository};
pub use error::{LedgerError, LedgerResult};
pub use infra::{InMemoryLedgerRepository, PgLedgerRepository};
pub use presentation::router::{ledger_router, ledger_router_generic};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
