use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::role::Role;

/// The (country, subdivision) pair that selects a holiday set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Jurisdiction {
    #[schema(example = "DE")]
    pub country: String,
    #[schema(example = "BY", nullable = true)]
    pub subdivision: Option<String>,
}

impl Jurisdiction {
    pub fn new(country: impl Into<String>, subdivision: Option<&str>) -> Self {
        Self {
            country: country.into(),
            subdivision: subdivision.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "first_name": "Jana",
        "last_name": "Berger",
        "email": "jana.berger@company.de",
        "role": "employee",
        "vacation_entitlement": 30,
        "manual_vacation_correction": 2,
        "country": "DE",
        "subdivision": "BY"
    })
)]
pub struct Employee {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    /// Contractual yearly allotment in days.
    pub vacation_entitlement: i32,
    /// Carry-over or manual HR correction, may be negative.
    pub manual_vacation_correction: i32,
    pub country: String,
    #[schema(nullable = true)]
    pub subdivision: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn jurisdiction(&self) -> Jurisdiction {
        Jurisdiction::new(self.country.clone(), self.subdivision.as_deref())
    }
}

/// Row shape of the `employees` table.
#[derive(Debug, sqlx::FromRow)]
pub struct EmployeeRow {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub vacation_entitlement: i32,
    pub manual_vacation_correction: i32,
    pub country: String,
    pub subdivision: Option<String>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = AppError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let role = Role::from_code(&row.role).ok_or_else(|| AppError::UnknownCode {
            kind: "role",
            code: row.role.clone(),
        })?;

        Ok(Employee {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            role,
            vacation_entitlement: row.vacation_entitlement,
            manual_vacation_correction: row.manual_vacation_correction,
            country: row.country,
            subdivision: row.subdivision,
        })
    }
}
