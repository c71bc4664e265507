use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::engine::lifecycle::{self, Action, Authorization, RolePolicy};
use crate::error::{AppError, AppResult};
use crate::model::leave_request::{CreateLeave, LeaveRequest};
use crate::store::{EmployeeDirectory, LeaveStore};
use actix_web::{HttpResponse, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "data": [{
        "id": 12,
        "requester_id": 1,
        "approver_id": null,
        "start_date": "2026-08-03",
        "end_date": "2026-08-14",
        "status": "NEW",
        "declinement_reason": null
    }],
    "total": 1
}))]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub total: usize,
}

impl From<Vec<LeaveRequest>> for LeaveListResponse {
    fn from(data: Vec<LeaveRequest>) -> Self {
        Self {
            total: data.len(),
            data,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeclineLeave {
    /// Shown to the requester. Blank reasons are dropped.
    #[schema(example = "Team is at minimum staffing that week", nullable = true)]
    pub reason: Option<String>,
}

/// Every lifecycle endpoint lands on the administration listing, whether or
/// not the transition took effect.
fn see_administration(config: &Config) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((
            header::LOCATION,
            format!("{}/leave/administration", config.api_prefix),
        ))
        .finish()
}

async fn transition<S>(
    auth: AuthUser,
    store: web::Data<S>,
    config: web::Data<Config>,
    leave_id: u64,
    action: Action,
) -> AppResult<HttpResponse>
where
    S: EmployeeDirectory + LeaveStore,
{
    let actor = auth.employee(store.get_ref()).await?;
    lifecycle::apply(store.get_ref(), leave_id, &actor, action, &RolePolicy).await?;
    Ok(see_administration(&config))
}

/* =========================
Create leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = Object,
         example = json!({ "id": 12, "status": "NEW" })
        ),
        (status = 400, description = "start_date is after end_date", body = Object,
         example = json!({ "field": "start_date", "message": "start_date cannot be after end_date" })
        ),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn create_leave<S>(
    auth: AuthUser,
    store: web::Data<S>,
    payload: web::Json<CreateLeave>,
) -> AppResult<HttpResponse>
where
    S: EmployeeDirectory + LeaveStore,
{
    let employee = auth.employee(store.get_ref()).await?;
    payload.validate()?;

    let id = store.create_request(employee.id, &payload).await?;
    tracing::info!(
        leave_id = id,
        employee_id = employee.id,
        start_date = %payload.start_date,
        end_date = %payload.end_date,
        "Leave request created"
    );

    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": id,
        "status": "NEW"
    })))
}

/// The caller's own leave requests.
#[utoipa::path(
    get,
    path = "/api/leave",
    responses(
        (status = 200, description = "Own leave requests", body = LeaveListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn my_leaves<S>(auth: AuthUser, store: web::Data<S>) -> AppResult<HttpResponse>
where
    S: EmployeeDirectory + LeaveStore,
{
    let employee = auth.employee(store.get_ref()).await?;
    let requests = store.requests_by(employee.id).await?;
    Ok(HttpResponse::Ok().json(LeaveListResponse::from(requests)))
}

/// All leave requests, latest start date first.
#[utoipa::path(
    get,
    path = "/api/leave/administration",
    responses(
        (status = 200, description = "All leave requests", body = LeaveListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Management only")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn administration<S>(
    auth: AuthUser,
    store: web::Data<S>,
) -> AppResult<HttpResponse>
where
    S: EmployeeDirectory + LeaveStore,
{
    let employee = auth.employee(store.get_ref()).await?;
    if !RolePolicy.can_manage(&employee) {
        return Err(AppError::Forbidden("Management only"));
    }

    let requests = store.all_requests().await?;
    Ok(HttpResponse::Ok().json(LeaveListResponse::from(requests)))
}

#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Neither owner nor management"),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn get_leave<S>(
    auth: AuthUser,
    store: web::Data<S>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse>
where
    S: EmployeeDirectory + LeaveStore,
{
    let employee = auth.employee(store.get_ref()).await?;
    let leave_id = path.into_inner();

    let request = store
        .request(leave_id)
        .await?
        .ok_or(AppError::NotFound("Leave request"))?;

    if request.requester_id != employee.id && !RolePolicy.can_manage(&employee) {
        return Err(AppError::Forbidden("Not your leave request"));
    }

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Lifecycle transitions
========================= */
#[utoipa::path(
    post,
    path = "/api/leave/{leave_id}/withdraw",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to withdraw")
    ),
    responses(
        (status = 303, description = "Redirect to the administration listing, also when nothing changed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn withdraw_leave<S>(
    auth: AuthUser,
    store: web::Data<S>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse>
where
    S: EmployeeDirectory + LeaveStore,
{
    transition(auth, store, config, path.into_inner(), Action::Withdraw).await
}

#[utoipa::path(
    post,
    path = "/api/leave/{leave_id}/decline",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to decline")
    ),
    request_body(
        content = DeclineLeave,
        description = "Optional reason shown to the requester",
        content_type = "application/json"
    ),
    responses(
        (status = 303, description = "Redirect to the administration listing, also when nothing changed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn decline_leave<S>(
    auth: AuthUser,
    store: web::Data<S>,
    config: web::Data<Config>,
    path: web::Path<u64>,
    payload: Option<web::Json<DeclineLeave>>,
) -> AppResult<HttpResponse>
where
    S: EmployeeDirectory + LeaveStore,
{
    let reason = payload.and_then(|p| p.into_inner().reason);
    transition(
        auth,
        store,
        config,
        path.into_inner(),
        Action::Decline { reason },
    )
    .await
}

#[utoipa::path(
    post,
    path = "/api/leave/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 303, description = "Redirect to the administration listing, also when nothing changed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn approve_leave<S>(
    auth: AuthUser,
    store: web::Data<S>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse>
where
    S: EmployeeDirectory + LeaveStore,
{
    transition(auth, store, config, path.into_inner(), Action::Approve).await
}
