//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{ReportId, RewardId, UserId};

use crate::domain::entities::{Report, Reward};
use crate::domain::value_objects::ReportStatus;
use crate::error::LedgerResult;

/// Report repository trait
///
/// Listings are ordered by creation time, oldest first.
#[trait_variant::make(ReportRepository: Send)]
pub trait LocalReportRepository {
    /// Insert a new report
    async fn create(&self, report: &Report) -> LedgerResult<()>;

    /// Find report by ID
    async fn find_by_id(&self, report_id: &ReportId) -> LedgerResult<Option<Report>>;

    /// Reports owned by one user
    async fn list_by_user(&self, user_id: &UserId) -> LedgerResult<Vec<Report>>;

    /// Reports owned by any of `user_ids`
    async fn list_by_users(&self, user_ids: &[UserId]) -> LedgerResult<Vec<Report>>;

    /// Every report
    async fn list_all(&self) -> LedgerResult<Vec<Report>>;

    /// Apply [`Report::review`] atomically. Returns the updated report and the
    /// points to credit, or `None` when the report does not exist.
    async fn review(
        &self,
        report_id: &ReportId,
        status: ReportStatus,
        verified_by: Option<UserId>,
    ) -> LedgerResult<Option<(Report, Option<i32>)>>;
}

/// Reward catalog repository trait
#[trait_variant::make(RewardRepository: Send)]
pub trait LocalRewardRepository {
    /// Insert catalog entries whose id is not present yet. Returns the number inserted.
    async fn seed(&self, rewards: &[Reward]) -> LedgerResult<u64>;

    /// Whole catalog, ordered by cost
    async fn list_rewards(&self) -> LedgerResult<Vec<Reward>>;

    /// Find reward by ID
    async fn find_reward(&self, reward_id: &RewardId) -> LedgerResult<Option<Reward>>;
}
