//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::LedgerAppState;
pub use router::{ledger_router, ledger_router_generic};
