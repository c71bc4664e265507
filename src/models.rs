use serde::{Deserialize, Serialize};

/// Bearer token payload. Only the employee id is trusted; role and
/// jurisdiction are always re-read from the employee directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub employee_id: u64,
    pub exp: usize,
    pub jti: String,
}
