use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

/// Failures raised by the storage traits.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("attendance for person {person_id} on {date} already exists")]
    Duplicate { person_id: u64, date: NaiveDate },

    #[error("person {0} is not registered")]
    UnknownPerson(u64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored value could not be decoded: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("{0}")]
    Validation(String),

    #[error("No attendance configuration is available")]
    ConfigurationMissing,

    #[error("Person {person_id} already checked out on {date}")]
    AlreadyCheckedOut { person_id: u64, date: NaiveDate },

    #[error("Person {person_id} already checked in on {date}")]
    DuplicateArrival { person_id: u64, date: NaiveDate },

    #[error("No person registered with {0}")]
    PersonNotFound(String),

    #[error("{0}")]
    Storage(#[from] StoreError),
}

impl AttendanceError {
    /// Stable identifier sent to clients in the `error` field.
    pub fn kind(&self) -> &'static str {
        match self {
            AttendanceError::Validation(_) => "VALIDATION_ERROR",
            AttendanceError::ConfigurationMissing => "CONFIGURATION_MISSING",
            AttendanceError::AlreadyCheckedOut { .. } => "ALREADY_CHECKED_OUT",
            AttendanceError::DuplicateArrival { .. } => "DUPLICATE_ARRIVAL",
            AttendanceError::PersonNotFound(_) => "PERSON_NOT_FOUND",
            AttendanceError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl ResponseError for AttendanceError {
    fn status_code(&self) -> StatusCode {
        match self {
            AttendanceError::Validation(_) => StatusCode::BAD_REQUEST,
            AttendanceError::PersonNotFound(_) => StatusCode::NOT_FOUND,
            AttendanceError::AlreadyCheckedOut { .. } | AttendanceError::DuplicateArrival { .. } => {
                StatusCode::CONFLICT
            }
            AttendanceError::ConfigurationMissing | AttendanceError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // storage details stay in the logs
        let message = match self {
            AttendanceError::Storage(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind(),
            "message": message
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 10).unwrap()
    }

    #[test]
    fn business_rejections_are_conflicts_not_faults() {
        let checked_out = AttendanceError::AlreadyCheckedOut { person_id: 1, date: date() };
        let duplicate = AttendanceError::DuplicateArrival { person_id: 1, date: date() };

        assert_eq!(checked_out.status_code(), StatusCode::CONFLICT);
        assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);
        assert_eq!(checked_out.to_string(), "Person 1 already checked out on 2025-11-10");
    }

    #[test]
    fn operational_failures_are_server_errors() {
        let storage = AttendanceError::from(StoreError::Database(sqlx::Error::PoolTimedOut));

        assert_eq!(
            AttendanceError::ConfigurationMissing.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(storage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(storage.kind(), "STORAGE_ERROR");
    }

    #[test]
    fn storage_errors_keep_their_cause() {
        use std::error::Error as _;

        let err = AttendanceError::from(StoreError::from(sqlx::Error::PoolTimedOut));

        let store = err.source().expect("storage cause");
        assert!(store.to_string().starts_with("database error"));
        assert!(store.source().is_some());
    }

    #[test]
    fn user_errors_map_to_client_statuses() {
        assert_eq!(
            AttendanceError::Validation("person_id is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AttendanceError::PersonNotFound("70112233".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
