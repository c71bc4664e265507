use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::{debug, error};

use super::{Decision, EmployeeDirectory, HolidayStore, LeaveStore};
use crate::error::AppResult;
use crate::model::employee::{Employee, EmployeeRow, Jurisdiction};
use crate::model::holiday::{Holiday, Subdivision};
use crate::model::leave_request::{CreateLeave, LeaveRequest, LeaveRequestRow, LeaveStatus};

const LEAVE_COLUMNS: &str =
    "id, requester_id, approver_id, start_date, end_date, status, declinement_reason";

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn into_requests(rows: Vec<LeaveRequestRow>) -> AppResult<Vec<LeaveRequest>> {
    rows.into_iter().map(LeaveRequest::try_from).collect()
}

impl EmployeeDirectory for MySqlStore {
    async fn employee(&self, id: u64) -> AppResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, first_name, last_name, email, role,
                   vacation_entitlement, manual_vacation_correction,
                   country, subdivision
            FROM employees
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = id, "Failed to fetch employee");
            e
        })?;

        row.map(Employee::try_from).transpose()
    }
}

impl LeaveStore for MySqlStore {
    async fn create_request(&self, requester_id: u64, form: &CreateLeave) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (requester_id, start_date, end_date, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(requester_id)
        .bind(form.start_date)
        .bind(form.end_date)
        .bind(LeaveStatus::New.code())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, requester_id, "Failed to create leave request");
            e
        })?;

        Ok(result.last_insert_id())
    }

    async fn request(&self, id: u64) -> AppResult<Option<LeaveRequest>> {
        let sql = format!("SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = ?");

        let row = sqlx::query_as::<_, LeaveRequestRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(LeaveRequest::try_from).transpose()
    }

    async fn requests_by(&self, requester_id: u64) -> AppResult<Vec<LeaveRequest>> {
        let sql = format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE requester_id = ? ORDER BY start_date DESC"
        );

        let rows = sqlx::query_as::<_, LeaveRequestRow>(&sql)
            .bind(requester_id)
            .fetch_all(&self.pool)
            .await?;

        into_requests(rows)
    }

    async fn all_requests(&self) -> AppResult<Vec<LeaveRequest>> {
        let sql = format!("SELECT {LEAVE_COLUMNS} FROM leave_requests ORDER BY start_date DESC");

        let rows = sqlx::query_as::<_, LeaveRequestRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        into_requests(rows)
    }

    async fn accepted_overlapping(
        &self,
        requester_id: Option<u64>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<LeaveRequest>> {
        let mut sql = format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests \
             WHERE status = ? AND start_date <= ? AND end_date >= ?"
        );
        if requester_id.is_some() {
            sql.push_str(" AND requester_id = ?");
        }
        sql.push_str(" ORDER BY start_date");
        debug!(sql = %sql, ?requester_id, %from, %to, "Fetching accepted leave");

        let mut query = sqlx::query_as::<_, LeaveRequestRow>(&sql)
            .bind(LeaveStatus::Accepted.code())
            .bind(to)
            .bind(from);
        if let Some(id) = requester_id {
            query = query.bind(id);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            error!(error = %e, "Failed to fetch accepted leave");
            e
        })?;

        into_requests(rows)
    }

    async fn delete_pending(&self, id: u64, requester_id: u64) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM leave_requests
            WHERE id = ?
            AND requester_id = ?
            AND status = ?
            "#,
        )
        .bind(id)
        .bind(requester_id)
        .bind(LeaveStatus::New.code())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, leave_id = id, "Withdraw leave failed");
            e
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn decide(&self, id: u64, decision: Decision) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE leave_requests
            SET status = ?, approver_id = ?, declinement_reason = ?
            WHERE id = ?
            AND status = ?
            "#,
        )
        .bind(decision.status.code())
        .bind(decision.approver_id)
        .bind(decision.declinement_reason)
        .bind(id)
        .bind(LeaveStatus::New.code())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, leave_id = id, "Leave decision failed");
            e
        })?;

        Ok(result.rows_affected() > 0)
    }
}

impl HolidayStore for MySqlStore {
    async fn holidays_between(
        &self,
        jurisdiction: &Jurisdiction,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Holiday>> {
        // `<=>` so that a missing subdivision matches country-wide rows
        let holidays = sqlx::query_as::<_, Holiday>(
            r#"
            SELECT date, country, subdivision, name
            FROM holidays
            WHERE country = ?
            AND subdivision <=> ?
            AND date BETWEEN ? AND ?
            ORDER BY date
            "#,
        )
        .bind(&jurisdiction.country)
        .bind(jurisdiction.subdivision.as_deref())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(holidays)
    }

    async fn save_subdivision(&self, subdivision: &Subdivision) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO subdivisions (country, code, name)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE name = VALUES(name)
            "#,
        )
        .bind(&subdivision.country)
        .bind(&subdivision.code)
        .bind(&subdivision.name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save_holidays(&self, holidays: &[Holiday]) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for holiday in holidays {
            let result = sqlx::query(
                r#"
                INSERT IGNORE INTO holidays (date, country, subdivision, name)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(holiday.date)
            .bind(&holiday.country)
            .bind(holiday.subdivision.as_deref())
            .bind(&holiday.name)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
