use crate::api::calendar::CalendarResponse;
use crate::api::leave_request::{DeclineLeave, LeaveListResponse};
use crate::engine::accounting::VacationSummary;
use crate::engine::calendar_grid::{Day, DayLabel, GridScope, MonthGrid, Week, YearGrid};
use crate::model::employee::{Employee, Jurisdiction};
use crate::model::holiday::Holiday;
use crate::model::leave_request::{CreateLeave, LeaveRequest, LeaveStatus};
use crate::model::role::Role;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Urlaub API",
        version = "0.1.0",
        description = r#"
## Vacation and leave management

- **Leave requests**: submit, withdraw, approve or decline
- **Vacation account**: yearly entitlement, days used and days remaining
- **Calendar**: year grid with accepted leave and public holidays

Days used count weekdays that are not public holidays in the employee's
state, clipped to the requested year.

### Security
All endpoints take a **JWT Bearer** token. Approving and declining needs a
supervisor role or higher; the administration views need head of
department or administration.
"#,
    ),
    paths(
        crate::api::leave_request::create_leave,
        crate::api::leave_request::my_leaves,
        crate::api::leave_request::administration,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::withdraw_leave,
        crate::api::leave_request::decline_leave,
        crate::api::leave_request::approve_leave,

        crate::api::vacation::my_vacation,
        crate::api::vacation::employee_vacation,

        crate::api::calendar::year_calendar
    ),
    components(
        schemas(
            CreateLeave,
            DeclineLeave,
            LeaveRequest,
            LeaveStatus,
            LeaveListResponse,
            VacationSummary,
            CalendarResponse,
            YearGrid,
            MonthGrid,
            Week,
            Day,
            DayLabel,
            GridScope,
            Employee,
            Jurisdiction,
            Role,
            Holiday
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Leave", description = "Leave request lifecycle"),
        (name = "Vacation", description = "Vacation day accounting"),
        (name = "Calendar", description = "Year calendar grid"),
    )
)]
pub struct ApiDoc;
