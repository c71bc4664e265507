use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Immutable reference data, one row per (date, jurisdiction, name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Holiday {
    #[schema(example = "2026-10-03", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "DE")]
    pub country: String,
    #[schema(example = "BE", nullable = true)]
    pub subdivision: Option<String>,
    #[schema(example = "Tag der Deutschen Einheit")]
    pub name: String,
}

/// Province or state a holiday set is seeded for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subdivision {
    pub country: String,
    pub code: String,
    pub name: String,
}
