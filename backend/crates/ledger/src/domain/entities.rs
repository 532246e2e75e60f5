//! Domain Entities
//!
//! Core business entities for the ledger domain.

use chrono::{DateTime, Utc};
use kernel::id::{ReportId, RewardId, UserId};

use crate::domain::value_objects::{Location, ReportCategory, ReportStatus, RewardKind};

/// Report entity - a citizen's claim of a civic action awaiting review
#[derive(Debug, Clone)]
pub struct Report {
    pub id: ReportId,
    pub user_id: UserId,
    pub category: ReportCategory,
    pub location: Location,
    pub description: Option<String>,
    pub status: ReportStatus,
    /// 0 until verified, then the category's points
    pub points: i32,
    pub verified_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Create a new pending report
    pub fn new(
        user_id: UserId,
        category: ReportCategory,
        location: Location,
        description: Option<String>,
    ) -> Self {
        Self {
            id: ReportId::new(),
            user_id,
            category,
            location,
            description,
            status: ReportStatus::Pending,
            points: 0,
            verified_by: None,
            created_at: Utc::now(),
        }
    }

    /// Record a review decision
    ///
    /// Status and verifier are overwritten even when the report was already
    /// reviewed. A `verified` decision stamps the category points and returns
    /// them so the caller can credit the owner; other decisions leave any
    /// previously stamped points in place and return `None`.
    pub fn review(&mut self, status: ReportStatus, verified_by: Option<UserId>) -> Option<i32> {
        self.status = status;
        self.verified_by = verified_by;

        if status == ReportStatus::Verified {
            self.points = self.category.points();
            Some(self.points)
        } else {
            None
        }
    }
}

/// Reward entity - a catalog item redeemable for green points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reward {
    pub id: RewardId,
    pub name: String,
    pub description: String,
    pub cost: i32,
    pub kind: RewardKind,
}

impl Reward {
    pub fn new(
        id: RewardId,
        name: impl Into<String>,
        description: impl Into<String>,
        cost: i32,
        kind: RewardKind,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            cost,
            kind,
        }
    }
}
