//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{ReportId, RewardId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Report, Reward};
use crate::domain::value_objects::{ReportCategory, ReportStatus, RewardKind};

/// Request for POST /api/reports
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportRequest {
    pub user_id: UserId,
    #[serde(alias = "type")]
    pub category: ReportCategory,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request for PATCH /api/reports/{id}/verify
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyReportRequest {
    pub status: ReportStatus,
    #[serde(default)]
    pub verified_by: Option<UserId>,
}

/// Request for POST /api/rewards/redeem
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub user_id: String,
    pub reward_id: String,
}

/// Response for POST /api/rewards/redeem
#[derive(Debug, Clone, Serialize)]
pub struct RedeemResponse {
    pub success: bool,
}

/// Report representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: ReportId,
    pub user_id: UserId,
    pub category: ReportCategory,
    pub location: String,
    pub description: Option<String>,
    pub status: ReportStatus,
    pub points: i32,
    pub verified_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            user_id: report.user_id,
            category: report.category,
            location: report.location.as_str().to_string(),
            description: report.description,
            status: report.status,
            points: report.points,
            verified_by: report.verified_by,
            created_at: report.created_at,
        }
    }
}

/// Reward representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardResponse {
    pub id: RewardId,
    pub name: String,
    pub description: String,
    pub cost: i32,
    #[serde(rename = "type")]
    pub kind: RewardKind,
}

impl From<Reward> for RewardResponse {
    fn from(reward: Reward) -> Self {
        Self {
            id: reward.id,
            name: reward.name,
            description: reward.description,
            cost: reward.cost,
            kind: reward.kind,
        }
    }
}
