use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::NaiveDate;

use super::{Decision, EmployeeDirectory, HolidayStore, LeaveStore};
use crate::error::AppResult;
use crate::model::employee::{Employee, Jurisdiction};
use crate::model::holiday::{Holiday, Subdivision};
use crate::model::leave_request::{CreateLeave, LeaveRequest, LeaveStatus};

#[derive(Debug, Default)]
struct State {
    employees: BTreeMap<u64, Employee>,
    requests: BTreeMap<u64, LeaveRequest>,
    holidays: Vec<Holiday>,
    subdivisions: Vec<Subdivision>,
}

/// Store backed by process memory, with the same conditional-write
/// semantics as the MySQL store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn add_employee(&self, employee: Employee) {
        self.state
            .lock()
            .unwrap()
            .employees
            .insert(employee.id, employee);
    }

    pub fn add_request(&self, request: LeaveRequest) {
        self.state
            .lock()
            .unwrap()
            .requests
            .insert(request.id, request);
    }

    pub fn add_holiday(&self, holiday: Holiday) {
        self.state.lock().unwrap().holidays.push(holiday);
    }

    pub fn subdivisions(&self) -> Vec<Subdivision> {
        self.state.lock().unwrap().subdivisions.clone()
    }
}

impl EmployeeDirectory for MemoryStore {
    async fn employee(&self, id: u64) -> AppResult<Option<Employee>> {
        Ok(self.state.lock().unwrap().employees.get(&id).cloned())
    }
}

impl LeaveStore for MemoryStore {
    async fn create_request(&self, requester_id: u64, form: &CreateLeave) -> AppResult<u64> {
        let mut state = self.state.lock().unwrap();
        let id = state.requests.keys().next_back().map_or(1, |last| last + 1);
        state.requests.insert(
            id,
            LeaveRequest {
                id,
                requester_id,
                approver_id: None,
                start_date: form.start_date,
                end_date: form.end_date,
                status: LeaveStatus::New,
                declinement_reason: None,
            },
        );
        Ok(id)
    }

    async fn request(&self, id: u64) -> AppResult<Option<LeaveRequest>> {
        Ok(self.state.lock().unwrap().requests.get(&id).cloned())
    }

    async fn requests_by(&self, requester_id: u64) -> AppResult<Vec<LeaveRequest>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .requests
            .values()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect())
    }

    async fn all_requests(&self) -> AppResult<Vec<LeaveRequest>> {
        let mut all: Vec<LeaveRequest> =
            self.state.lock().unwrap().requests.values().cloned().collect();
        all.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(all)
    }

    async fn accepted_overlapping(
        &self,
        requester_id: Option<u64>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<LeaveRequest>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .requests
            .values()
            .filter(|r| r.is_accepted() && r.overlaps(from, to))
            .filter(|r| requester_id.is_none_or(|id| r.requester_id == id))
            .cloned()
            .collect())
    }

    async fn delete_pending(&self, id: u64, requester_id: u64) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        let removable = state
            .requests
            .get(&id)
            .is_some_and(|r| r.status == LeaveStatus::New && r.requester_id == requester_id);
        if removable {
            state.requests.remove(&id);
        }
        Ok(removable)
    }

    async fn decide(&self, id: u64, decision: Decision) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        match state.requests.get_mut(&id) {
            Some(r) if r.status == LeaveStatus::New => {
                r.status = decision.status;
                r.approver_id = Some(decision.approver_id);
                r.declinement_reason = decision.declinement_reason;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl HolidayStore for MemoryStore {
    async fn holidays_between(
        &self,
        jurisdiction: &Jurisdiction,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Holiday>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .holidays
            .iter()
            .filter(|h| h.country == jurisdiction.country && h.subdivision == jurisdiction.subdivision)
            .filter(|h| from <= h.date && h.date <= to)
            .cloned()
            .collect())
    }

    async fn save_subdivision(&self, subdivision: &Subdivision) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        if !state.subdivisions.contains(subdivision) {
            state.subdivisions.push(subdivision.clone());
        }
        Ok(())
    }

    async fn save_holidays(&self, holidays: &[Holiday]) -> AppResult<u64> {
        let mut state = self.state.lock().unwrap();
        let mut inserted = 0;
        for holiday in holidays {
            if !state.holidays.contains(holiday) {
                state.holidays.push(holiday.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}
