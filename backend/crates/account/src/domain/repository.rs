//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::{Debit, User};
use crate::domain::value_object::email::Email;
use crate::error::AccountResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. Fails with `EmailTaken` when the email is present.
    async fn create(&self, user: &User) -> AccountResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>>;

    /// Find user by exact email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool>;

    /// IDs of every user whose zone equals `zone` exactly
    async fn find_ids_by_zone(&self, zone: &str) -> AccountResult<Vec<UserId>>;

    /// Atomically add `delta` to the balance. Returns the new balance, or
    /// `None` when the user does not exist.
    async fn adjust_points(&self, user_id: &UserId, delta: i32) -> AccountResult<Option<i32>>;

    /// Atomically subtract `amount` if the balance covers it
    async fn debit_if_sufficient(&self, user_id: &UserId, amount: i32) -> AccountResult<Debit>;
}
