//! In-memory Repository Implementation
//!
//! Volatile storage used when no database is configured and in tests.
//! Every balance mutation runs inside a single write-lock section.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::{Debit, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AccountError, AccountResult};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
}

/// In-memory user repository. Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        let mut tables = self.tables.write().await;

        if tables.by_email.contains_key(user.email.as_str()) {
            return Err(AccountError::EmailTaken);
        }

        tables
            .by_email
            .insert(user.email.as_str().to_string(), user.id);
        tables.users.insert(user.id, user.clone());

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        Ok(self.tables.read().await.users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_email
            .get(email.as_str())
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .by_email
            .contains_key(email.as_str()))
    }

    async fn find_ids_by_zone(&self, zone: &str) -> AccountResult<Vec<UserId>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .filter(|u| u.is_in_zone(zone))
            .map(|u| u.id)
            .collect())
    }

    async fn adjust_points(&self, user_id: &UserId, delta: i32) -> AccountResult<Option<i32>> {
        let mut tables = self.tables.write().await;

        Ok(tables.users.get_mut(user_id).map(|user| {
            user.green_points = user.green_points.saturating_add(delta);
            user.green_points
        }))
    }

    async fn debit_if_sufficient(&self, user_id: &UserId, amount: i32) -> AccountResult<Debit> {
        let mut tables = self.tables.write().await;

        let Some(user) = tables.users.get_mut(user_id) else {
            return Ok(Debit::UserNotFound);
        };

        if user.green_points < amount {
            return Ok(Debit::InsufficientBalance {
                balance: user.green_points,
            });
        }

        user.green_points -= amount;
        Ok(Debit::Applied {
            balance: user.green_points,
        })
    }
}
