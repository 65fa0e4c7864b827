pub mod attendance;

use actix_web::web;

use crate::error::AttendanceError;

/// Malformed JSON bodies come back in the same error shape as every other rejection.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AttendanceError::Validation(format!("Invalid request body: {err}")).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AttendanceError::Validation(format!("Invalid query string: {err}")).into()
    })
}
