//! Leave accounting core: pure computations over plain data, plus thin
//! async loaders that fetch that data from a store.

pub mod accounting;
pub mod calendar_grid;
pub mod holiday_calendar;
pub mod lifecycle;
