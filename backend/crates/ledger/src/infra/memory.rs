//! In-memory Repository Implementation
//!
//! Volatile storage used when no database is configured and in tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use kernel::id::{ReportId, RewardId, UserId};
use tokio::sync::RwLock;

use crate::domain::entities::{Report, Reward};
use crate::domain::repository::{ReportRepository, RewardRepository};
use crate::domain::value_objects::ReportStatus;
use crate::error::LedgerResult;

#[derive(Default)]
struct Tables {
    /// Insertion order is creation order
    reports: Vec<Report>,
    positions: HashMap<ReportId, usize>,
    rewards: Vec<Reward>,
}

/// In-memory ledger repository. Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryLedgerRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryLedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportRepository for InMemoryLedgerRepository {
    async fn create(&self, report: &Report) -> LedgerResult<()> {
        let mut tables = self.tables.write().await;
        let position = tables.reports.len();
        tables.reports.push(report.clone());
        tables.positions.insert(report.id, position);
        Ok(())
    }

    async fn find_by_id(&self, report_id: &ReportId) -> LedgerResult<Option<Report>> {
        let tables = self.tables.read().await;
        Ok(tables
            .positions
            .get(report_id)
            .map(|&i| tables.reports[i].clone()))
    }

    async fn list_by_user(&self, user_id: &UserId) -> LedgerResult<Vec<Report>> {
        Ok(self
            .tables
            .read()
            .await
            .reports
            .iter()
            .filter(|r| r.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn list_by_users(&self, user_ids: &[UserId]) -> LedgerResult<Vec<Report>> {
        let owners: HashSet<&UserId> = user_ids.iter().collect();
        Ok(self
            .tables
            .read()
            .await
            .reports
            .iter()
            .filter(|r| owners.contains(&r.user_id))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> LedgerResult<Vec<Report>> {
        Ok(self.tables.read().await.reports.clone())
    }

    async fn review(
        &self,
        report_id: &ReportId,
        status: ReportStatus,
        verified_by: Option<UserId>,
    ) -> LedgerResult<Option<(Report, Option<i32>)>> {
        let mut tables = self.tables.write().await;

        let Some(&position) = tables.positions.get(report_id) else {
            return Ok(None);
        };

        let report = &mut tables.reports[position];
        let credit = report.review(status, verified_by);
        Ok(Some((report.clone(), credit)))
    }
}

impl RewardRepository for InMemoryLedgerRepository {
    async fn seed(&self, rewards: &[Reward]) -> LedgerResult<u64> {
        let mut tables = self.tables.write().await;

        let existing: HashSet<RewardId> = tables.rewards.iter().map(|r| r.id).collect();
        let fresh: Vec<Reward> = rewards
            .iter()
            .filter(|r| !existing.contains(&r.id))
            .cloned()
            .collect();
        let inserted = fresh.len() as u64;

        tables.rewards.extend(fresh);
        tables.rewards.sort_by_key(|r| r.cost);

        Ok(inserted)
    }

    async fn list_rewards(&self) -> LedgerResult<Vec<Reward>> {
        Ok(self.tables.read().await.rewards.clone())
    }

    async fn find_reward(&self, reward_id: &RewardId) -> LedgerResult<Option<Reward>> {
        Ok(self
            .tables
            .read()
            .await
            .rewards
            .iter()
            .find(|r| r.id == *reward_id)
            .cloned())
    }
}
