use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Classification of an arrival, fixed when the record is created.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    OnTime,
    Late,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "person_id": 42,
        "date": "2025-11-10",
        "arrival_time": "07:30:00",
        "departure_time": "13:10:00",
        "status": "ON_TIME"
    })
)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 42)]
    pub person_id: u64,

    #[schema(example = "2025-11-10", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "07:30:00", value_type = String, format = "time")]
    pub arrival_time: NaiveTime,

    #[schema(example = "13:10:00", value_type = Option<String>, format = "time", nullable = true)]
    pub departure_time: Option<NaiveTime>,

    pub status: AttendanceStatus,
}

/// A record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub person_id: u64,
    pub date: NaiveDate,
    pub arrival_time: NaiveTime,
    pub status: AttendanceStatus,
}

impl NewAttendance {
    pub fn into_record(self, id: u64) -> AttendanceRecord {
        AttendanceRecord {
            id,
            person_id: self.person_id,
            date: self.date,
            arrival_time: self.arrival_time,
            departure_time: None,
            status: self.status,
        }
    }
}

/// First scan of the day is an arrival, the second one a departure.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScanKind {
    Arrival,
    Departure,
}

impl ScanKind {
    pub fn message(&self) -> &'static str {
        match self {
            ScanKind::Arrival => "entrada registrada",
            ScanKind::Departure => "salida registrada",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkOutcome {
    pub kind: ScanKind,
    pub record: AttendanceRecord,
}
