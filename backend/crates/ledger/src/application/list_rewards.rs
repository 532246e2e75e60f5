//! List Rewards Use Case

use std::sync::Arc;

use crate::domain::entities::Reward;
use crate::domain::repository::RewardRepository;
use crate::error::LedgerResult;

pub struct ListRewardsUseCase<W>
where
    W: RewardRepository,
{
    reward_repo: Arc<W>,
}

impl<W> ListRewardsUseCase<W>
where
    W: RewardRepository,
{
    pub fn new(reward_repo: Arc<W>) -> Self {
        Self { reward_repo }
    }

    pub async fn execute(&self) -> LedgerResult<Vec<Reward>> {
        self.reward_repo.list_rewards().await
    }
}
