//! Vacation day accounting.
//!
//! Usage is derived on every call from the accepted requests of an
//! employee: each request is clipped to the year, then every weekday in
//! the clipped interval that is not a public holiday in the employee's
//! jurisdiction counts as one day. Nothing is cached.

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

use crate::engine::holiday_calendar::{HolidayCalendar, HolidaySet};
use crate::error::{AppError, AppResult};
use crate::model::employee::{Employee, Jurisdiction};
use crate::model::leave_request::LeaveRequest;
use crate::store::{HolidayStore, LeaveStore};

/// Falls back to the current calendar year.
pub fn resolve_year(year: Option<i32>) -> i32 {
    year.unwrap_or_else(|| Local::now().year())
}

/// First and last day of `year`.
pub fn year_bounds(year: i32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    let last = NaiveDate::from_ymd_opt(year, 12, 31);

    first.zip(last).ok_or(AppError::InvalidYear(year))
}

pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Number of working days in `[start, end]`, walked in date order.
pub fn count_vacation_days<H: HolidayCalendar>(
    start: NaiveDate,
    end: NaiveDate,
    jurisdiction: &Jurisdiction,
    holidays: &H,
) -> i64 {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| is_weekday(*day) && !holidays.is_holiday(*day, jurisdiction))
        .count() as i64
}

/// Days consumed by `employee` in `year`.
///
/// `requests` may contain anything; only the employee's accepted requests
/// overlapping the year are counted. Overlapping requests are not
/// de-duplicated.
pub fn compute_usage<H: HolidayCalendar>(
    employee: &Employee,
    year: i32,
    requests: &[LeaveRequest],
    holidays: &H,
) -> AppResult<i64> {
    let (start_of_year, end_of_year) = year_bounds(year)?;
    let jurisdiction = employee.jurisdiction();

    let used = requests
        .iter()
        .filter(|r| r.requester_id == employee.id && r.is_accepted())
        .filter(|r| r.overlaps(start_of_year, end_of_year))
        .map(|r| {
            let start = r.start_date.max(start_of_year);
            let end = r.end_date.min(end_of_year);
            count_vacation_days(start, end, &jurisdiction, holidays)
        })
        .sum();

    Ok(used)
}

/// `entitlement - usage + correction`; negative results are kept.
///
/// Entitlement and correction are stored as `INT`, so the sum is taken in
/// `i64` where it cannot overflow.
pub fn remaining_days(employee: &Employee, used: i64) -> i64 {
    i64::from(employee.vacation_entitlement) - used
        + i64::from(employee.manual_vacation_correction)
}

pub fn compute_remaining<H: HolidayCalendar>(
    employee: &Employee,
    year: i32,
    requests: &[LeaveRequest],
    holidays: &H,
) -> AppResult<i64> {
    let used = compute_usage(employee, year, requests, holidays)?;
    Ok(remaining_days(employee, used))
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "employee_id": 1,
    "year": 2026,
    "vacation_entitlement": 30,
    "manual_vacation_correction": 2,
    "used": 12,
    "remaining": 20
}))]
pub struct VacationSummary {
    pub employee_id: u64,
    pub year: i32,
    pub vacation_entitlement: i32,
    pub manual_vacation_correction: i32,
    pub used: i64,
    pub remaining: i64,
}

impl VacationSummary {
    pub fn compute<H: HolidayCalendar>(
        employee: &Employee,
        year: i32,
        requests: &[LeaveRequest],
        holidays: &H,
    ) -> AppResult<Self> {
        let used = compute_usage(employee, year, requests, holidays)?;

        Ok(VacationSummary {
            employee_id: employee.id,
            year,
            vacation_entitlement: employee.vacation_entitlement,
            manual_vacation_correction: employee.manual_vacation_correction,
            used,
            remaining: remaining_days(employee, used),
        })
    }
}

/// Loads the employee's accepted requests and holidays for `year` and
/// computes the summary.
pub async fn summary_for<S>(store: &S, employee: &Employee, year: i32) -> AppResult<VacationSummary>
where
    S: LeaveStore + HolidayStore,
{
    let (from, to) = year_bounds(year)?;

    let requests = store
        .accepted_overlapping(Some(employee.id), from, to)
        .await?;
    let records = store
        .holidays_between(&employee.jurisdiction(), from, to)
        .await?;

    tracing::debug!(
        employee_id = employee.id,
        year,
        requests = requests.len(),
        holidays = records.len(),
        "Computing vacation summary"
    );

    let holidays: HolidaySet = records.iter().collect();
    VacationSummary::compute(employee, year, &requests, &holidays)
}
