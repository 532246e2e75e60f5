//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Debit, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AccountError, AccountResult};

const USER_COLUMNS: &str = r#"
    id,
    email,
    password_hash,
    name,
    role,
    address,
    zone,
    green_points,
    created_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Borrow the pool (shared with the ledger repositories)
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id,
                email,
                password_hash,
                name,
                role,
                address,
                zone,
                green_points,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.name.as_str())
        .bind(user.role.id())
        .bind(user.address.as_deref())
        .bind(user.zone.as_deref())
        .bind(user.green_points)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AccountError::EmailTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_ids_by_zone(&self, zone: &str) -> AccountResult<Vec<UserId>> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE zone = $1")
            .bind(zone)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids.into_iter().map(UserId::from_uuid).collect())
    }

    async fn adjust_points(&self, user_id: &UserId, delta: i32) -> AccountResult<Option<i32>> {
        let balance = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE users SET green_points = green_points + $2
            WHERE id = $1
            RETURNING green_points
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(delta)
        .fetch_optional(&self.pool)
        .await?;

        Ok(balance)
    }

    async fn debit_if_sufficient(&self, user_id: &UserId, amount: i32) -> AccountResult<Debit> {
        // Single conditional UPDATE: the check and the write cannot interleave
        let debited = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE users SET green_points = green_points - $2
            WHERE id = $1 AND green_points >= $2
            RETURNING green_points
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(amount)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(balance) = debited {
            return Ok(Debit::Applied { balance });
        }

        let current =
            sqlx::query_scalar::<_, i32>("SELECT green_points FROM users WHERE id = $1")
                .bind(user_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        Ok(match current {
            Some(balance) => Debit::InsufficientBalance { balance },
            None => Debit::UserNotFound,
        })
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    role: i16,
    address: Option<String>,
    zone: Option<String>,
    green_points: i32,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let password = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        let role = UserRole::from_id(self.role)
            .ok_or_else(|| AccountError::Internal(format!("Invalid role id: {}", self.role)))?;

        Ok(User {
            id: UserId::from_uuid(self.id),
            email: Email::from_db(self.email),
            password,
            name: DisplayName::from_db(self.name),
            role,
            address: self.address,
            zone: self.zone,
            green_points: self.green_points,
            created_at: self.created_at,
        })
    }
}
