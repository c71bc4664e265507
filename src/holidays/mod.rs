//! Offline seeding of the holiday reference store.

pub mod germany;

use std::ops::Range;

use tracing::info;

use crate::error::AppResult;
use crate::model::holiday::{Holiday, Subdivision};
use crate::store::HolidayStore;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub subdivisions: usize,
    pub generated: usize,
    pub inserted: u64,
}

/// Every German state holiday for the years in `years`.
pub fn german_holidays(state: &str, years: Range<i32>) -> Vec<Holiday> {
    years
        .flat_map(|year| germany::holidays(year, state))
        .map(|(date, name)| Holiday {
            date,
            country: germany::COUNTRY.to_string(),
            subdivision: Some(state.to_string()),
            name: name.to_string(),
        })
        .collect()
}

/// Writes all German states and their holidays for `years` into `store`.
/// Safe to run repeatedly; existing rows are kept.
pub async fn seed_germany<S: HolidayStore>(store: &S, years: Range<i32>) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    for (code, name) in germany::STATES {
        store
            .save_subdivision(&Subdivision {
                country: germany::COUNTRY.to_string(),
                code: code.to_string(),
                name: name.to_string(),
            })
            .await?;
        report.subdivisions += 1;

        let holidays = german_holidays(code, years.clone());
        let inserted = store.save_holidays(&holidays).await?;
        info!(
            state = code,
            generated = holidays.len(),
            inserted,
            "Seeded holidays for {name}"
        );

        report.generated += holidays.len();
        report.inserted += inserted;
    }

    Ok(report)
}
