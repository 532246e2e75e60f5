//! Redeem Reward Use Case
//!
//! Every refusal (unknown user, unknown reward, short balance) surfaces as the
//! same `RedeemFailed` error; the reason is only logged.

use std::sync::Arc;

use account::{Debit, UserRepository};
use kernel::id::{RewardId, UserId};

use crate::domain::repository::RewardRepository;
use crate::error::{LedgerError, LedgerResult};

/// Input DTO for redeem reward
#[derive(Debug, Clone)]
pub struct RedeemRewardInput {
    pub user_id: String,
    pub reward_id: String,
}

pub struct RedeemRewardUseCase<W, U>
where
    W: RewardRepository,
    U: UserRepository,
{
    reward_repo: Arc<W>,
    user_repo: Arc<U>,
}

impl<W, U> RedeemRewardUseCase<W, U>
where
    W: RewardRepository,
    U: UserRepository,
{
    pub fn new(reward_repo: Arc<W>, user_repo: Arc<U>) -> Self {
        Self {
            reward_repo,
            user_repo,
        }
    }

    /// Returns the balance left after the debit
    pub async fn execute(&self, input: RedeemRewardInput) -> LedgerResult<i32> {
        let (Ok(user_id), Ok(reward_id)) = (
            input.user_id.parse::<UserId>(),
            input.reward_id.parse::<RewardId>(),
        ) else {
            tracing::debug!("Redeem with malformed ids");
            return Err(LedgerError::RedeemFailed);
        };

        let Some(reward) = self.reward_repo.find_reward(&reward_id).await? else {
            tracing::warn!(reward_id = %reward_id, "Redeem of unknown reward");
            return Err(LedgerError::RedeemFailed);
        };

        match self
            .user_repo
            .debit_if_sufficient(&user_id, reward.cost)
            .await?
        {
            Debit::Applied { balance } => {
                tracing::info!(
                    user_id = %user_id,
                    reward_id = %reward.id,
                    cost = reward.cost,
                    balance,
                    "Reward redeemed"
                );
                Ok(balance)
            }
            Debit::InsufficientBalance { balance } => {
                tracing::warn!(
                    user_id = %user_id,
                    reward_id = %reward.id,
                    cost = reward.cost,
                    balance,
                    "Insufficient green points"
                );
                Err(LedgerError::RedeemFailed)
            }
            Debit::UserNotFound => {
                tracing::warn!(user_id = %user_id, "Redeem by unknown user");
                Err(LedgerError::RedeemFailed)
            }
        }
    }
}
