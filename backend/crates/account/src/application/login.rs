//! Login Use Case
//!
//! Checks credentials and returns the account. No session is issued.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AccountError, AccountResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountResult<User> {
        let email = Email::new(&input.email).map_err(AccountError::invalid)?;
        if input.password.is_empty() {
            return Err(AccountError::InvalidData("password is empty".to_string()));
        }

        // Anything that could never have been registered cannot match
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AccountError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !user.password.verify(&raw_password, self.config.pepper()) {
            tracing::warn!(user_id = %user.id, "Password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(user)
    }
}
