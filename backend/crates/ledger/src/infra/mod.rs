//! Infrastructure Layer
//!
//! Storage backends for reports and the reward catalog.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryLedgerRepository;
pub use postgres::PgLedgerRepository;
