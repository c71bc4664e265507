pub mod employee;
pub mod holiday;
pub mod leave_request;
pub mod role;
