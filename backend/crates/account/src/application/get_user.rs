//! Get User Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

pub struct GetUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Look up by raw path segment. Malformed ids cannot exist, so they are
    /// reported as not found.
    pub async fn execute(&self, raw_id: &str) -> AccountResult<User> {
        let user_id: UserId = raw_id.parse().map_err(|_| AccountError::UserNotFound)?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }
}
