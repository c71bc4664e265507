use crate::auth::auth::AuthUser;
use crate::engine::accounting::resolve_year;
use crate::engine::calendar_grid::{GridScope, YearGrid, YearStep, year_grid_for};
use crate::engine::lifecycle::{Authorization, RolePolicy};
use crate::error::{AppError, AppResult};
use crate::store::{EmployeeDirectory, HolidayStore, LeaveStore};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CalendarQuery {
    /// Selected year, defaults to the current one
    #[param(example = 2026)]
    pub year: Option<i32>,
    /// `personal` (default) or `all`
    pub scope: Option<GridScope>,
}

/// The grid plus the years the client moves to with previous/next.
#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarResponse {
    pub previous_year: i32,
    pub next_year: i32,
    pub grid: YearGrid,
}

impl CalendarResponse {
    fn new(grid: YearGrid) -> Self {
        Self {
            previous_year: YearStep::Previous.apply(grid.year),
            next_year: YearStep::Next.apply(grid.year),
            grid,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Year grid with accepted leave and holidays", body = CalendarResponse),
        (status = 400, description = "Year out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Scope `all` is management only")
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
pub async fn year_calendar<S>(
    auth: AuthUser,
    store: web::Data<S>,
    query: web::Query<CalendarQuery>,
) -> AppResult<HttpResponse>
where
    S: EmployeeDirectory + LeaveStore + HolidayStore,
{
    let viewer = auth.employee(store.get_ref()).await?;
    let scope = query.scope.unwrap_or_default();
    if scope == GridScope::All && !RolePolicy.can_manage(&viewer) {
        return Err(AppError::Forbidden("Management only"));
    }

    let grid = year_grid_for(store.get_ref(), &viewer, scope, resolve_year(query.year)).await?;
    Ok(HttpResponse::Ok().json(CalendarResponse::new(grid)))
}
