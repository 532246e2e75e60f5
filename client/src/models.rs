//! Wire types shared with the server's JSON API

use chrono::{DateTime, Utc};
use kernel::id::{ReportId, RewardId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Verifier,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    Dumping,
    Segregation,
    Composting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Verified,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    Electricity,
    Water,
    Voucher,
    Tree,
}

/// Signed-in user as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub address: Option<String>,
    pub zone: Option<String>,
    pub green_points: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: RewardId,
    pub name: String,
    pub description: String,
    pub cost: i32,
    #[serde(rename = "type")]
    pub kind: RewardKind,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Report fields entered by the user; the owner comes from the session
#[derive(Debug, Clone)]
pub struct NewReport {
    pub category: ReportCategory,
    pub location: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitReportRequest<'a> {
    pub user_id: UserId,
    pub category: ReportCategory,
    pub location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyReportRequest {
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<UserId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RedeemRequest {
    pub user_id: UserId,
    pub reward_id: RewardId,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthResponse {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RedeemResponse {
    pub success: bool,
}
