use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use utoipa::ToSchema;

/// Capability level of an employee, stored as a three letter code.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[strum(serialize = "EMP")]
    Employee,
    #[strum(serialize = "SUP")]
    Supervisor,
    #[strum(serialize = "HOD")]
    HeadOfDepartment,
    #[strum(serialize = "ADM")]
    Admin,
}

impl Role {
    pub fn from_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }

    pub fn code(&self) -> &str {
        self.as_ref()
    }
}
