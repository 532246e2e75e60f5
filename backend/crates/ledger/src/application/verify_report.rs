//! Verify Report Use Case
//!
//! A verifier's decision on a report. Repeated decisions are not guarded:
//! every `verified` decision credits the owner again.

use std::sync::Arc;

use account::UserRepository;
use kernel::id::{ReportId, UserId};

use crate::domain::entities::Report;
use crate::domain::repository::ReportRepository;
use crate::domain::value_objects::ReportStatus;
use crate::error::{LedgerError, LedgerResult};

/// Input DTO for verify report
#[derive(Debug, Clone)]
pub struct VerifyReportInput {
    /// Raw report id from the path
    pub report_id: String,
    pub status: ReportStatus,
    pub verified_by: Option<UserId>,
}

pub struct VerifyReportUseCase<R, U>
where
    R: ReportRepository,
    U: UserRepository,
{
    report_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> VerifyReportUseCase<R, U>
where
    R: ReportRepository,
    U: UserRepository,
{
    pub fn new(report_repo: Arc<R>, user_repo: Arc<U>) -> Self {
        Self {
            report_repo,
            user_repo,
        }
    }

    pub async fn execute(&self, input: VerifyReportInput) -> LedgerResult<Report> {
        let report_id: ReportId = input
            .report_id
            .parse()
            .map_err(|_| LedgerError::ReportNotFound)?;

        let (report, credit) = self
            .report_repo
            .review(&report_id, input.status, input.verified_by)
            .await?
            .ok_or(LedgerError::ReportNotFound)?;

        tracing::info!(
            report_id = %report.id,
            status = %report.status,
            verified_by = ?report.verified_by.map(|id| id.to_string()),
            "Report reviewed"
        );

        if let Some(points) = credit {
            match self.user_repo.adjust_points(&report.user_id, points).await? {
                Some(balance) => tracing::info!(
                    user_id = %report.user_id,
                    points,
                    balance,
                    "Green points credited"
                ),
                None => tracing::warn!(
                    user_id = %report.user_id,
                    report_id = %report.id,
                    "Report owner missing, points not credited"
                ),
            }
        }

        Ok(report)
    }
}
