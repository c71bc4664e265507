pub mod calendar;
pub mod leave_request;
pub mod vacation;
