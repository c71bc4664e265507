//! Errors surfaced by the leave service.
//!
//! Only conditions a caller can act on get their own variant. Lifecycle
//! transitions that are not permitted are deliberately absent here: they
//! are absorbed as no-ops by [`crate::engine::lifecycle`].
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("start_date cannot be after end_date")]
    InvalidRange {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    #[error("year {0} is out of range")]
    InvalidYear(i32),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("unknown {kind} code \"{code}\"")]
    UnknownCode { kind: &'static str, code: String },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRange { .. } | AppError::InvalidYear(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::UnknownCode { .. } | AppError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            // field-level error, the form layer attaches it to start_date
            AppError::InvalidRange { .. } => json!({
                "field": "start_date",
                "message": self.to_string(),
            }),
            AppError::UnknownCode { .. } | AppError::Database(_) => {
                tracing::error!(error = %self, "Request failed");
                json!({ "message": "Internal Server Error" })
            }
            _ => json!({ "message": self.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_range_is_a_bad_request() {
        let err = AppError::InvalidRange {
            start_date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "start_date cannot be after end_date");
    }

    #[test]
    fn database_errors_are_hidden_from_callers() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn forbidden_keeps_its_message() {
        let err = AppError::Forbidden("Management only");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Management only");
    }
}
