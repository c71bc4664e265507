//! Collaborator interfaces the engine reads from and writes to.
//!
//! The service runs on [`mysql::MySqlStore`]; tests use an in-memory store.
#![allow(async_fn_in_trait)]

use chrono::NaiveDate;

use crate::error::AppResult;
use crate::model::employee::{Employee, Jurisdiction};
use crate::model::holiday::{Holiday, Subdivision};
use crate::model::leave_request::{CreateLeave, LeaveRequest, LeaveStatus};

#[cfg(test)]
pub mod memory;
pub mod mysql;

/// A terminal decision on a pending request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub status: LeaveStatus,
    pub approver_id: u64,
    pub declinement_reason: Option<String>,
}

pub trait EmployeeDirectory {
    async fn employee(&self, id: u64) -> AppResult<Option<Employee>>;
}

pub trait LeaveStore {
    /// Persists a validated request in status `NEW` and returns its id.
    async fn create_request(&self, requester_id: u64, form: &CreateLeave) -> AppResult<u64>;

    async fn request(&self, id: u64) -> AppResult<Option<LeaveRequest>>;

    async fn requests_by(&self, requester_id: u64) -> AppResult<Vec<LeaveRequest>>;

    /// Every request, latest start date first.
    async fn all_requests(&self) -> AppResult<Vec<LeaveRequest>>;

    /// Accepted requests intersecting `[from, to]`, optionally of one requester.
    async fn accepted_overlapping(
        &self,
        requester_id: Option<u64>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<LeaveRequest>>;

    /// Deletes the request only while it is still `NEW` and owned by
    /// `requester_id`. Returns whether a row was removed.
    async fn delete_pending(&self, id: u64, requester_id: u64) -> AppResult<bool>;

    /// Applies `decision` only while the request is still `NEW`. Returns
    /// whether the write happened.
    async fn decide(&self, id: u64, decision: Decision) -> AppResult<bool>;
}

pub trait HolidayStore {
    async fn holidays_between(
        &self,
        jurisdiction: &Jurisdiction,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Holiday>>;

    async fn save_subdivision(&self, subdivision: &Subdivision) -> AppResult<()>;

    /// Inserts holidays, skipping ones already present. Returns the number
    /// of new rows.
    async fn save_holidays(&self, holidays: &[Holiday]) -> AppResult<u64>;
}

/// Everything the HTTP layer reads and writes through.
pub trait Store: EmployeeDirectory + LeaveStore + HolidayStore + 'static {}

impl<T> Store for T where T: EmployeeDirectory + LeaveStore + HolidayStore + 'static {}
