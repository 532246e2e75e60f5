//! Domain Value Objects
//!
//! Immutable value types for the ledger domain.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of civic action a citizen reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum ReportCategory {
    /// Illegal dumping spotted
    Dumping = 0,
    /// Household waste segregated at source
    Segregation = 1,
    /// Home composting set up
    Composting = 2,
}

impl ReportCategory {
    /// Points credited to the owner when a report of this category is verified
    #[inline]
    pub const fn points(&self) -> i32 {
        match self {
            ReportCategory::Dumping => 10,
            ReportCategory::Segregation => 15,
            ReportCategory::Composting => 20,
        }
    }

    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ReportCategory::Dumping => "dumping",
            ReportCategory::Segregation => "segregation",
            ReportCategory::Composting => "composting",
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(ReportCategory::Dumping),
            1 => Some(ReportCategory::Segregation),
            2 => Some(ReportCategory::Composting),
            _ => None,
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Review state of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum ReportStatus {
    #[default]
    Pending = 0,
    Verified = 1,
    Rejected = 2,
}

impl ReportStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Verified => "verified",
            ReportStatus::Rejected => "rejected",
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(ReportStatus::Pending),
            1 => Some(ReportStatus::Verified),
            2 => Some(ReportStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Display tag for a reward. Has no effect on redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum RewardKind {
    Electricity = 0,
    Water = 1,
    Voucher = 2,
    Tree = 3,
}

impl RewardKind {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(RewardKind::Electricity),
            1 => Some(RewardKind::Water),
            2 => Some(RewardKind::Voucher),
            3 => Some(RewardKind::Tree),
            _ => None,
        }
    }
}

/// Free-text location of a report (address, landmark, or coordinates)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AppError::bad_request("Location cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
