//! Register Use Case
//!
//! Creates a new account. Citizens receive the signup bonus.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AccountError, AccountResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
    pub address: Option<String>,
    pub zone: Option<String>,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<User> {
        let email = Email::new(&input.email).map_err(AccountError::invalid)?;
        let name = DisplayName::new(&input.name).map_err(AccountError::invalid)?;
        let raw_password = RawPassword::new(input.password).map_err(AccountError::invalid)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AccountError::EmailTaken);
        }

        let password = UserPassword::from_raw(
            &raw_password,
            self.config.pepper(),
            self.config.hash_cost,
        )
        .map_err(|e| AccountError::Internal(e.to_string()))?;

        let user = User::new(
            email,
            password,
            name,
            input.role,
            input.address,
            input.zone,
        );

        // The repository re-checks uniqueness; a concurrent signup loses here
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.id,
            role = %user.role,
            zone = user.zone.as_deref().unwrap_or("-"),
            green_points = user.green_points,
            "User registered"
        );

        Ok(user)
    }
}
