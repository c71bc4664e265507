//! Public holiday lookup.
//!
//! A [`HolidayCalendar`] answers whether a date is a public holiday for a
//! jurisdiction. Missing data is never an error: an unseeded year or an
//! unknown jurisdiction simply yields `false`.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::model::employee::Jurisdiction;
use crate::model::holiday::Holiday;

pub trait HolidayCalendar {
    /// Return `true` if `date` is a public holiday in `jurisdiction`.
    fn is_holiday(&self, date: NaiveDate, jurisdiction: &Jurisdiction) -> bool;
}

impl<T: HolidayCalendar + ?Sized> HolidayCalendar for &T {
    fn is_holiday(&self, date: NaiveDate, jurisdiction: &Jurisdiction) -> bool {
        (**self).is_holiday(date, jurisdiction)
    }
}

/// Seeded holiday records indexed by exact jurisdiction.
#[derive(Debug, Clone, Default)]
pub struct HolidaySet {
    dates: HashMap<Jurisdiction, BTreeSet<NaiveDate>>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, holiday: &Holiday) {
        let key = Jurisdiction::new(holiday.country.clone(), holiday.subdivision.as_deref());
        self.dates.entry(key).or_default().insert(holiday.date);
    }
}

impl<'a> FromIterator<&'a Holiday> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = &'a Holiday>>(iter: I) -> Self {
        let mut set = HolidaySet::new();
        for holiday in iter {
            set.insert(holiday);
        }
        set
    }
}

impl HolidayCalendar for HolidaySet {
    fn is_holiday(&self, date: NaiveDate, jurisdiction: &Jurisdiction) -> bool {
        self.dates
            .get(jurisdiction)
            .is_some_and(|dates| dates.contains(&date))
    }
}
