//! HTTP Handlers

use account::UserRepository;
use axum::Json;
use axum::extract::{Path, State};
use kernel::extract::JsonBody;
use std::sync::Arc;

use crate::application::{
    ListReportsUseCase, ListRewardsUseCase, RedeemRewardInput, RedeemRewardUseCase, ReportScope,
    SubmitReportInput, SubmitReportUseCase, VerifyReportInput, VerifyReportUseCase,
};
use crate::domain::repository::{ReportRepository, RewardRepository};
use crate::error::LedgerResult;
use crate::presentation::dto::{
    RedeemRequest, RedeemResponse, ReportResponse, RewardResponse, SubmitReportRequest,
    VerifyReportRequest,
};

/// Shared state for ledger handlers
#[derive(Clone)]
pub struct LedgerAppState<R, U>
where
    R: ReportRepository + RewardRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub users: Arc<U>,
}

fn report_list(reports: Vec<crate::domain::Report>) -> Json<Vec<ReportResponse>> {
    Json(reports.into_iter().map(ReportResponse::from).collect())
}

/// POST /api/reports
pub async fn submit_report<R, U>(
    State(state): State<LedgerAppState<R, U>>,
    JsonBody(req): JsonBody<SubmitReportRequest>,
) -> LedgerResult<Json<ReportResponse>>
where
    R: ReportRepository + RewardRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SubmitReportUseCase::new(state.repo.clone(), state.users.clone());

    let report = use_case
        .execute(SubmitReportInput {
            user_id: req.user_id,
            category: req.category,
            location: req.location,
            description: req.description,
        })
        .await?;

    Ok(Json(report.into()))
}

/// GET /api/reports/user/{user_id}
pub async fn list_user_reports<R, U>(
    State(state): State<LedgerAppState<R, U>>,
    Path(user_id): Path<String>,
) -> LedgerResult<Json<Vec<ReportResponse>>>
where
    R: ReportRepository + RewardRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let reports = ListReportsUseCase::new(state.repo.clone(), state.users.clone())
        .execute(ReportScope::User(user_id))
        .await?;
    Ok(report_list(reports))
}

/// GET /api/reports/zone/{zone}
pub async fn list_zone_reports<R, U>(
    State(state): State<LedgerAppState<R, U>>,
    Path(zone): Path<String>,
) -> LedgerResult<Json<Vec<ReportResponse>>>
where
    R: ReportRepository + RewardRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let reports = ListReportsUseCase::new(state.repo.clone(), state.users.clone())
        .execute(ReportScope::Zone(zone))
        .await?;
    Ok(report_list(reports))
}

/// GET /api/reports
pub async fn list_all_reports<R, U>(
    State(state): State<LedgerAppState<R, U>>,
) -> LedgerResult<Json<Vec<ReportResponse>>>
where
    R: ReportRepository + RewardRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let reports = ListReportsUseCase::new(state.repo.clone(), state.users.clone())
        .execute(ReportScope::All)
        .await?;
    Ok(report_list(reports))
}

/// PATCH /api/reports/{id}/verify
pub async fn verify_report<R, U>(
    State(state): State<LedgerAppState<R, U>>,
    Path(report_id): Path<String>,
    JsonBody(req): JsonBody<VerifyReportRequest>,
) -> LedgerResult<Json<ReportResponse>>
where
    R: ReportRepository + RewardRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = VerifyReportUseCase::new(state.repo.clone(), state.users.clone());

    let report = use_case
        .execute(VerifyReportInput {
            report_id,
            status: req.status,
            verified_by: req.verified_by,
        })
        .await?;

    Ok(Json(report.into()))
}

/// GET /api/rewards
pub async fn list_rewards<R, U>(
    State(state): State<LedgerAppState<R, U>>,
) -> LedgerResult<Json<Vec<RewardResponse>>>
where
    R: ReportRepository + RewardRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let rewards = ListRewardsUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(rewards.into_iter().map(RewardResponse::from).collect()))
}

/// POST /api/rewards/redeem
pub async fn redeem_reward<R, U>(
    State(state): State<LedgerAppState<R, U>>,
    JsonBody(req): JsonBody<RedeemRequest>,
) -> LedgerResult<Json<RedeemResponse>>
where
    R: ReportRepository + RewardRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RedeemRewardUseCase::new(state.repo.clone(), state.users.clone());

    use_case
        .execute(RedeemRewardInput {
            user_id: req.user_id,
            reward_id: req.reward_id,
        })
        .await?;

    Ok(Json(RedeemResponse { success: true }))
}
