//! German public holidays per federal state.
//!
//! Nationwide holidays plus the feasts each state observes on its own,
//! named in German. Rules that changed over time are bounded by year.

use chrono::{Datelike, Duration, NaiveDate};

use crate::engine::holiday_calendar::HolidayCalendar;
use crate::model::employee::Jurisdiction;

pub const COUNTRY: &str = "DE";

/// State code and display name.
pub const STATES: [(&str, &str); 16] = [
    ("BW", "Baden-Württemberg"),
    ("BY", "Bayern"),
    ("BE", "Berlin"),
    ("BB", "Brandenburg"),
    ("HB", "Bremen"),
    ("HH", "Hamburg"),
    ("HE", "Hessen"),
    ("MV", "Mecklenburg-Vorpommern"),
    ("NI", "Niedersachsen"),
    ("NW", "Nordrhein-Westfalen"),
    ("RP", "Rheinland-Pfalz"),
    ("SL", "Saarland"),
    ("SN", "Sachsen"),
    ("ST", "Sachsen-Anhalt"),
    ("SH", "Schleswig-Holstein"),
    ("TH", "Thüringen"),
];

pub fn is_state(code: &str) -> bool {
    STATES.iter().any(|(c, _)| *c == code)
}

/// Easter Sunday, anonymous Gregorian algorithm.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Wednesday before November 23rd.
fn repentance_day(year: i32) -> Option<NaiveDate> {
    let nov22 = NaiveDate::from_ymd_opt(year, 11, 22)?;
    let back = (nov22.weekday().num_days_from_monday() + 5) % 7;
    Some(nov22 - Duration::days(back as i64))
}

fn in_states(state: &str, states: &[&str]) -> bool {
    states.contains(&state)
}

/// All holidays of `state` in `year`, sorted by date.
///
/// Unknown state codes get no holidays at all.
pub fn holidays(year: i32, state: &str) -> Vec<(NaiveDate, &'static str)> {
    if !is_state(state) {
        return Vec::new();
    }
    let (Some(easter), Some(repentance)) = (easter_sunday(year), repentance_day(year)) else {
        return Vec::new();
    };
    let fixed = |month: u32, day: u32| NaiveDate::from_ymd_opt(year, month, day);
    let easter_offset = |days: i64| Some(easter + Duration::days(days));

    let rules: [(Option<NaiveDate>, &'static str, bool); 20] = [
        (fixed(1, 1), "Neujahr", true),
        (
            fixed(1, 6),
            "Heilige Drei Könige",
            in_states(state, &["BW", "BY", "ST"]),
        ),
        (
            fixed(3, 8),
            "Internationaler Frauentag",
            (state == "BE" && year >= 2019) || (state == "MV" && year >= 2023),
        ),
        (easter_offset(-2), "Karfreitag", true),
        (easter_offset(0), "Ostersonntag", state == "BB"),
        (easter_offset(1), "Ostermontag", true),
        (fixed(5, 1), "Erster Mai", true),
        (
            fixed(5, 8),
            "Tag der Befreiung",
            state == "BE" && (year == 2020 || year == 2025),
        ),
        (easter_offset(39), "Christi Himmelfahrt", true),
        (easter_offset(49), "Pfingstsonntag", state == "BB"),
        (easter_offset(50), "Pfingstmontag", true),
        (
            easter_offset(60),
            "Fronleichnam",
            in_states(state, &["BW", "BY", "HE", "NW", "RP", "SL"]),
        ),
        (fixed(8, 15), "Mariä Himmelfahrt", state == "SL"),
        (
            fixed(9, 20),
            "Weltkindertag",
            state == "TH" && year >= 2019,
        ),
        (fixed(10, 3), "Tag der Deutschen Einheit", year >= 1990),
        (
            fixed(10, 31),
            "Reformationstag",
            in_states(state, &["BB", "MV", "SN", "ST", "TH"])
                || year == 2017
                || (year >= 2018 && in_states(state, &["HB", "HH", "NI", "SH"])),
        ),
        (
            fixed(11, 1),
            "Allerheiligen",
            in_states(state, &["BW", "BY", "NW", "RP", "SL"]),
        ),
        (
            Some(repentance),
            "Buß- und Bettag",
            state == "SN" || year <= 1994,
        ),
        (fixed(12, 25), "Erster Weihnachtstag", true),
        (fixed(12, 26), "Zweiter Weihnachtstag", true),
    ];

    let mut days: Vec<(NaiveDate, &'static str)> = rules
        .into_iter()
        .filter(|(_, _, observed)| *observed)
        .filter_map(|(date, name, _)| date.map(|d| (d, name)))
        .collect();
    days.sort();
    days
}

/// Rule based calendar, usable without seeded data.
#[derive(Debug, Clone, Copy, Default)]
pub struct GermanHolidays;

impl HolidayCalendar for GermanHolidays {
    fn is_holiday(&self, date: NaiveDate, jurisdiction: &Jurisdiction) -> bool {
        if jurisdiction.country != COUNTRY {
            return false;
        }
        let Some(state) = jurisdiction.subdivision.as_deref() else {
            return false;
        };
        holidays(date.year(), state).iter().any(|(d, _)| *d == date)
    }
}
