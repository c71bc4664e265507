use crate::auth::auth::AuthUser;
use crate::engine::accounting::{VacationSummary, resolve_year, summary_for};
use crate::engine::lifecycle::{Authorization, RolePolicy};
use crate::error::{AppError, AppResult};
use crate::store::{EmployeeDirectory, HolidayStore, LeaveStore};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct VacationQuery {
    /// Calendar year, defaults to the current one
    #[param(example = 2026)]
    pub year: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/vacation",
    params(VacationQuery),
    responses(
        (status = 200, description = "Vacation account of the caller", body = VacationSummary),
        (status = 400, description = "Year out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Vacation"
)]
pub async fn my_vacation<S>(
    auth: AuthUser,
    store: web::Data<S>,
    query: web::Query<VacationQuery>,
) -> AppResult<HttpResponse>
where
    S: EmployeeDirectory + LeaveStore + HolidayStore,
{
    let employee = auth.employee(store.get_ref()).await?;
    let summary = summary_for(store.get_ref(), &employee, resolve_year(query.year)).await?;
    Ok(HttpResponse::Ok().json(summary))
}

#[utoipa::path(
    get,
    path = "/api/vacation/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee whose account is requested"),
        VacationQuery
    ),
    responses(
        (status = 200, description = "Vacation account of the employee", body = VacationSummary),
        (status = 400, description = "Year out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Management only"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Vacation"
)]
pub async fn employee_vacation<S>(
    auth: AuthUser,
    store: web::Data<S>,
    path: web::Path<u64>,
    query: web::Query<VacationQuery>,
) -> AppResult<HttpResponse>
where
    S: EmployeeDirectory + LeaveStore + HolidayStore,
{
    let viewer = auth.employee(store.get_ref()).await?;
    if !RolePolicy.can_manage(&viewer) {
        return Err(AppError::Forbidden("Management only"));
    }

    let employee = store
        .employee(path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Employee"))?;
    let summary = summary_for(store.get_ref(), &employee, resolve_year(query.year)).await?;
    Ok(HttpResponse::Ok().json(summary))
}
