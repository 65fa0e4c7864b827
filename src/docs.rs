use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::{
    AttendanceListResponse, MarkAttendanceReq, MarkAttendanceResponse, ScanDocumentReq,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "School Attendance API",
        version = "1.0.0",
        description = r#"
## School Attendance

Records student attendance from QR scans at the school entrance.

- The **first scan** of a student on a day records the arrival and classifies it
  as `ON_TIME` (at or before the configured entry time) or `LATE`.
- The **second scan** records the departure. The status never changes.
- A **third scan** is rejected with `409 Conflict`.

Days are civil dates in the configured time zone (America/Lima by default).

### Error format
```json
{ "error": "ALREADY_CHECKED_OUT", "message": "Person 42 already checked out on 2025-11-10" }
```

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::mark_attendance,
        crate::api::attendance::scan_document,
        crate::api::attendance::list_attendance,
    ),
    components(
        schemas(
            AttendanceRecord,
            AttendanceStatus,
            MarkAttendanceReq,
            ScanDocumentReq,
            MarkAttendanceResponse,
            AttendanceListResponse
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance scanning and history APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_attendance_route() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/attendance"));
        assert!(doc.paths.paths.contains_key("/api/attendance/scan"));
    }
}
