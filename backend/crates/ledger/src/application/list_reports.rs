//! List Reports Use Case
//!
//! Three read views over the report table: by owner, by owner zone, all.

use std::sync::Arc;

use account::UserRepository;
use kernel::id::UserId;

use crate::domain::entities::Report;
use crate::domain::repository::ReportRepository;
use crate::error::LedgerResult;

/// Which reports to list
#[derive(Debug, Clone)]
pub enum ReportScope {
    /// Raw owner id from the path; malformed ids match nothing
    User(String),
    /// Owner's zone, exact match
    Zone(String),
    All,
}

pub struct ListReportsUseCase<R, U>
where
    R: ReportRepository,
    U: UserRepository,
{
    report_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> ListReportsUseCase<R, U>
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

    pub async fn execute(&self, scope: ReportScope) -> LedgerResult<Vec<Report>> {
        match scope {
            ReportScope::User(raw_id) => match raw_id.parse::<UserId>() {
                Ok(user_id) => self.report_repo.list_by_user(&user_id).await,
                Err(_) => Ok(Vec::new()),
            },
            ReportScope::Zone(zone) => {
                let owners = self.user_repo.find_ids_by_zone(&zone).await?;
                if owners.is_empty() {
                    return Ok(Vec::new());
                }
                self.report_repo.list_by_users(&owners).await
            }
            ReportScope::All => self.report_repo.list_all().await,
        }
    }
}
