use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::attendance::AttendanceRecord;

#[derive(Deserialize, ToSchema)]
pub struct MarkAttendanceReq {
    #[schema(example = 42)]
    pub person_id: Option<u64>,
}

#[derive(Deserialize, ToSchema)]
pub struct ScanDocumentReq {
    /// Document number decoded from the student's QR code
    #[schema(example = "70112233")]
    pub document: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MarkAttendanceResponse {
    #[schema(example = "entrada registrada")]
    pub message: String,
    pub data: AttendanceRecord,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Person whose history is listed
    pub person_id: Option<u64>,
    /// Earliest date, inclusive
    #[param(value_type = Option<String>, format = "date")]
    pub from: Option<NaiveDate>,
    /// Latest date, inclusive
    #[param(value_type = Option<String>, format = "date")]
    pub to: Option<NaiveDate>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    pub data: Vec<AttendanceRecord>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 57)]
    pub total: i64,
}
