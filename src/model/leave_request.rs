use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use utoipa::ToSchema;

use crate::error::AppError;

/// Stored as `NEW` / `ACP` / `DEN`.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveStatus {
    #[strum(serialize = "NEW")]
    New,
    #[strum(serialize = "ACP")]
    Accepted,
    #[strum(serialize = "DEN")]
    Denied,
}

impl LeaveStatus {
    pub fn code(&self) -> &str {
        self.as_ref()
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, LeaveStatus::New)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "id": 12,
    "requester_id": 1,
    "approver_id": 3,
    "start_date": "2026-08-03",
    "end_date": "2026-08-14",
    "status": "ACCEPTED",
    "declinement_reason": null
}))]
pub struct LeaveRequest {
    pub id: u64,
    pub requester_id: u64,
    /// Set only once a terminal decision was made.
    #[schema(nullable = true)]
    pub approver_id: Option<u64>,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
    #[schema(nullable = true)]
    pub declinement_reason: Option<String>,
}

impl LeaveRequest {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// True if `[start_date, end_date]` intersects `[from, to]`.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date <= to && self.end_date >= from
    }

    pub fn is_accepted(&self) -> bool {
        self.status == LeaveStatus::Accepted
    }
}

/// Row shape of the `leave_requests` table.
#[derive(Debug, sqlx::FromRow)]
pub struct LeaveRequestRow {
    pub id: u64,
    pub requester_id: u64,
    pub approver_id: Option<u64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub declinement_reason: Option<String>,
}

impl TryFrom<LeaveRequestRow> for LeaveRequest {
    type Error = AppError;

    fn try_from(row: LeaveRequestRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<LeaveStatus>()
            .map_err(|_| AppError::UnknownCode {
                kind: "leave status",
                code: row.status.clone(),
            })?;

        Ok(LeaveRequest {
            id: row.id,
            requester_id: row.requester_id,
            approver_id: row.approver_id,
            start_date: row.start_date,
            end_date: row.end_date,
            status,
            declinement_reason: row.declinement_reason,
        })
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "2026-08-03", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-08-14", format = "date", value_type = String)]
    pub end_date: NaiveDate,
}

impl CreateLeave {
    /// Rejects inverted ranges before anything is persisted.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.start_date > self.end_date {
            return Err(AppError::InvalidRange {
                start_date: self.start_date,
                end_date: self.end_date,
            });
        }
        Ok(())
    }
}
