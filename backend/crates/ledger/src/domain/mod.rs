//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Report, Reward)
//! - Domain value objects (ReportCategory, ReportStatus, RewardKind, Location)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;

pub use entities::{Report, Reward};
pub use repository::{ReportRepository, RewardRepository};
pub use value_objects::{Location, ReportCategory, ReportStatus, RewardKind};
