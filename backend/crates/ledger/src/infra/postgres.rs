//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{ReportId, RewardId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Report, Reward};
use crate::domain::repository::{ReportRepository, RewardRepository};
use crate::domain::value_objects::{Location, ReportCategory, ReportStatus, RewardKind};
use crate::error::{LedgerError, LedgerResult};

const REPORT_COLUMNS: &str = r#"
    id,
    user_id,
    category,
    location,
    description,
    status,
    points,
    verified_by,
    created_at
"#;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgLedgerRepository {
    pool: PgPool,
}

impl PgLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ReportRepository for PgLedgerRepository {
    async fn create(&self, report: &Report) -> LedgerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reports (
                id,
                user_id,
                category,
                location,
                description,
                status,
                points,
                verified_by,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(report.id.as_uuid())
        .bind(report.user_id.as_uuid())
        .bind(report.category.id())
        .bind(report.location.as_str())
        .bind(report.description.as_deref())
        .bind(report.status.id())
        .bind(report.points)
        .bind(report.verified_by.map(|id| id.into_uuid()))
        .bind(report.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, report_id: &ReportId) -> LedgerResult<Option<Report>> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
        ))
        .bind(report_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ReportRow::into_report).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> LedgerResult<Vec<Report>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE user_id = $1 ORDER BY created_at, id"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReportRow::into_report).collect()
    }

    async fn list_by_users(&self, user_ids: &[UserId]) -> LedgerResult<Vec<Report>> {
        let ids: Vec<Uuid> = user_ids.iter().map(|id| id.into_uuid()).collect();

        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE user_id = ANY($1) ORDER BY created_at, id"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReportRow::into_report).collect()
    }

    async fn list_all(&self) -> LedgerResult<Vec<Report>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReportRow::into_report).collect()
    }

    async fn review(
        &self,
        report_id: &ReportId,
        status: ReportStatus,
        verified_by: Option<UserId>,
    ) -> LedgerResult<Option<(Report, Option<i32>)>> {
        let mut tx = self.pool.begin().await?;

        // Row lock keeps concurrent reviews of the same report serialized
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1 FOR UPDATE"
        ))
        .bind(report_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut report = row.into_report()?;
        let credit = report.review(status, verified_by);

        sqlx::query(
            r#"
            UPDATE reports SET
                status = $2,
                verified_by = $3,
                points = $4
            WHERE id = $1
            "#,
        )
        .bind(report.id.as_uuid())
        .bind(report.status.id())
        .bind(report.verified_by.map(|id| id.into_uuid()))
        .bind(report.points)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some((report, credit)))
    }
}

impl RewardRepository for PgLedgerRepository {
    async fn seed(&self, rewards: &[Reward]) -> LedgerResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for reward in rewards {
            inserted += sqlx::query(
                r#"
                INSERT INTO rewards (id, name, description, cost, kind)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(reward.id.as_uuid())
            .bind(&reward.name)
            .bind(&reward.description)
            .bind(reward.cost)
            .bind(reward.kind.id())
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;

        Ok(inserted)
    }

    async fn list_rewards(&self) -> LedgerResult<Vec<Reward>> {
        let rows = sqlx::query_as::<_, RewardRow>(
            "SELECT id, name, description, cost, kind FROM rewards ORDER BY cost, id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RewardRow::into_reward).collect()
    }

    async fn find_reward(&self, reward_id: &RewardId) -> LedgerResult<Option<Reward>> {
        let row = sqlx::query_as::<_, RewardRow>(
            "SELECT id, name, description, cost, kind FROM rewards WHERE id = $1",
        )
        .bind(reward_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RewardRow::into_reward).transpose()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ReportRow {
    id: Uuid,
    user_id: Uuid,
    category: i16,
    location: String,
    description: Option<String>,
    status: i16,
    points: i32,
    verified_by: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl ReportRow {
    fn into_report(self) -> LedgerResult<Report> {
        let category = ReportCategory::from_id(self.category).ok_or_else(|| {
            LedgerError::Internal(format!("Invalid report category id: {}", self.category))
        })?;
        let status = ReportStatus::from_id(self.status).ok_or_else(|| {
            LedgerError::Internal(format!("Invalid report status id: {}", self.status))
        })?;

        Ok(Report {
            id: ReportId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            category,
            location: Location::from_db(self.location),
            description: self.description,
            status,
            points: self.points,
            verified_by: self.verified_by.map(UserId::from_uuid),
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RewardRow {
    id: Uuid,
    name: String,
    description: String,
    cost: i32,
    kind: i16,
}

impl RewardRow {
    fn into_reward(self) -> LedgerResult<Reward> {
        let kind = RewardKind::from_id(self.kind)
            .ok_or_else(|| LedgerError::Internal(format!("Invalid reward kind id: {}", self.kind)))?;

        Ok(Reward::new(
            RewardId::from_uuid(self.id),
            self.name,
            self.description,
            self.cost,
            kind,
        ))
    }
}
