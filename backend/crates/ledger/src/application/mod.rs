//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod config;
pub mod list_reports;
pub mod list_rewards;
pub mod redeem_reward;
pub mod submit_report;
pub mod verify_report;

pub use config::LedgerConfig;
pub use list_reports::{ListReportsUseCase, ReportScope};
pub use list_rewards::ListRewardsUseCase;
pub use redeem_reward::{RedeemRewardInput, RedeemRewardUseCase};
pub use submit_report::{SubmitReportInput, SubmitReportUseCase};
pub use verify_report::{VerifyReportInput, VerifyReportUseCase};
