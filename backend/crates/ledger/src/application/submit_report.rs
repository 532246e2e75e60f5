//! Submit Report Use Case

use std::sync::Arc;

use account::UserRepository;
use kernel::id::UserId;

use crate::domain::entities::Report;
use crate::domain::repository::ReportRepository;
use crate::domain::value_objects::{Location, ReportCategory};
use crate::error::{LedgerError, LedgerResult};

/// Input DTO for submit report
#[derive(Debug, Clone)]
pub struct SubmitReportInput {
    pub user_id: UserId,
    pub category: ReportCategory,
    pub location: String,
    pub description: Option<String>,
}

/// Submit Report Use Case
pub struct SubmitReportUseCase<R, U>
where
    R: ReportRepository,
    U: UserRepository,
{
    report_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> SubmitReportUseCase<R, U>
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

    pub async fn execute(&self, input: SubmitReportInput) -> LedgerResult<Report> {
        let location = Location::new(&input.location).map_err(LedgerError::invalid)?;

        if self.user_repo.find_by_id(&input.user_id).await?.is_none() {
            return Err(LedgerError::UserNotFound);
        }

        let report = Report::new(
            input.user_id,
            input.category,
            location,
            input.description.filter(|d| !d.trim().is_empty()),
        );
        self.report_repo.create(&report).await?;

        tracing::info!(
            report_id = %report.id,
            user_id = %report.user_id,
            category = %report.category,
            "Report submitted"
        );

        Ok(report)
    }
}
