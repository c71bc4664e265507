//! Year → month → week → day grid for the calendar view.
//!
//! Weeks are month-local: a week is closed after its Sunday or after the
//! last day of the month, so the first and the last week of a month may be
//! partial. The builder is stateless; the selected year is owned by the
//! caller and moved with [`YearStep`].

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::accounting::year_bounds;
use crate::engine::holiday_calendar::{HolidayCalendar, HolidaySet};
use crate::error::{AppError, AppResult};
use crate::model::employee::Employee;
use crate::model::leave_request::LeaveRequest;
use crate::store::{HolidayStore, LeaveStore};

const MONTH_NAMES: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Weekday label, ordered Monday first.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayLabel {
    Mo,
    Di,
    Mi,
    Do,
    Fr,
    Sa,
    So,
}

impl From<Weekday> for DayLabel {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayLabel::Mo,
            Weekday::Tue => DayLabel::Di,
            Weekday::Wed => DayLabel::Mi,
            Weekday::Thu => DayLabel::Do,
            Weekday::Fri => DayLabel::Fr,
            Weekday::Sat => DayLabel::Sa,
            Weekday::Sun => DayLabel::So,
        }
    }
}

/// Whose accepted requests are shown on each day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GridScope {
    /// Only the viewing employee.
    #[default]
    Personal,
    /// Everyone, for the administrative view.
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Day {
    pub label: DayLabel,
    pub day_number: u32,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub entries: Vec<LeaveRequest>,
    pub holiday: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, ToSchema)]
pub struct Week {
    #[schema(value_type = Object)]
    pub days: BTreeMap<DayLabel, Day>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthGrid {
    pub month_number: u32,
    pub month_name: String,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct YearGrid {
    pub year: i32,
    pub months: Vec<MonthGrid>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum YearStep {
    Previous,
    Next,
}

impl YearStep {
    pub fn apply(self, year: i32) -> i32 {
        match self {
            YearStep::Previous => year - 1,
            YearStep::Next => year + 1,
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if month == 12 {
        return NaiveDate::from_ymd_opt(year, 12, 31);
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1)?.pred_opt()
}

fn build_month<H: HolidayCalendar>(
    year: i32,
    month: u32,
    viewer: &Employee,
    requests: &[&LeaveRequest],
    holidays: &H,
) -> AppResult<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(AppError::InvalidYear(year))?;
    let last = last_day_of_month(year, month).ok_or(AppError::InvalidYear(year))?;
    let jurisdiction = viewer.jurisdiction();

    let mut weeks = Vec::new();
    let mut current = Week::default();

    for date in first.iter_days().take_while(|d| *d <= last) {
        let label = DayLabel::from(date.weekday());
        let entries = requests
            .iter()
            .filter(|r| r.covers(date))
            .map(|r| (*r).clone())
            .collect();

        current.days.insert(
            label,
            Day {
                label,
                day_number: date.day(),
                date,
                entries,
                holiday: holidays.is_holiday(date, &jurisdiction),
            },
        );

        if label == DayLabel::So || date == last {
            weeks.push(std::mem::take(&mut current));
        }
    }

    Ok(MonthGrid {
        month_number: month,
        month_name: MONTH_NAMES[(month - 1) as usize].to_string(),
        weeks,
    })
}

/// Builds the annotated grid for `year` as seen by `viewer`.
///
/// Only accepted requests are placed on days; with [`GridScope::Personal`]
/// they are further limited to the viewer's own. Holiday flags use the
/// viewer's jurisdiction.
pub fn build_year<H: HolidayCalendar>(
    year: i32,
    viewer: &Employee,
    scope: GridScope,
    requests: &[LeaveRequest],
    holidays: &H,
) -> AppResult<YearGrid> {
    let (first, last) = year_bounds(year)?;

    let visible: Vec<&LeaveRequest> = requests
        .iter()
        .filter(|r| r.is_accepted() && r.overlaps(first, last))
        .filter(|r| scope == GridScope::All || r.requester_id == viewer.id)
        .collect();

    let months = (1..=12)
        .map(|month| build_month(year, month, viewer, &visible, holidays))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(YearGrid { year, months })
}

/// Loads accepted requests in scope and the viewer's holidays, then builds
/// the grid.
pub async fn year_grid_for<S>(
    store: &S,
    viewer: &Employee,
    scope: GridScope,
    year: i32,
) -> AppResult<YearGrid>
where
    S: LeaveStore + HolidayStore,
{
    let (from, to) = year_bounds(year)?;
    let requester = match scope {
        GridScope::Personal => Some(viewer.id),
        GridScope::All => None,
    };

    let requests = store.accepted_overlapping(requester, from, to).await?;
    let holidays: HolidaySet = store
        .holidays_between(&viewer.jurisdiction(), from, to)
        .await?
        .iter()
        .collect();

    build_year(year, viewer, scope, &requests, &holidays)
}
