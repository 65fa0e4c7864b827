use actix_web::{HttpResponse, web};
use tracing::error;

use crate::error::AttendanceError;
use crate::model::attendance::MarkOutcome;
use crate::models::{
    AttendanceListResponse, AttendanceQuery, MarkAttendanceReq, MarkAttendanceResponse,
    ScanDocumentReq,
};
use crate::service::marking::AttendanceEngine;
use crate::store::{AttendanceStore, DateRange, DirectoryLookup, PageRequest};

fn respond(outcome: MarkOutcome) -> HttpResponse {
    HttpResponse::Ok().json(MarkAttendanceResponse {
        message: outcome.kind.message().to_string(),
        data: outcome.record,
    })
}

/// Mark attendance for a person. The first scan of the day is the arrival, the second the departure.
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendanceReq,
    responses(
        (status = 200, description = "Arrival or departure recorded", body = MarkAttendanceResponse),
        (status = 400, description = "Missing or malformed person_id", body = Object, example = json!({
            "error": "VALIDATION_ERROR",
            "message": "person_id is required"
        })),
        (status = 404, description = "Person is not registered"),
        (status = 409, description = "Already checked out today", body = Object, example = json!({
            "error": "ALREADY_CHECKED_OUT",
            "message": "Person 42 already checked out on 2025-11-10"
        })),
        (status = 500, description = "Configuration missing or storage failure")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    engine: web::Data<AttendanceEngine>,
    payload: web::Json<MarkAttendanceReq>,
) -> Result<HttpResponse, AttendanceError> {
    let person_id = match payload.person_id {
        Some(0) => return Err(AttendanceError::Validation("person_id must be positive".into())),
        Some(id) => id,
        None => return Err(AttendanceError::Validation("person_id is required".into())),
    };

    let outcome = engine.mark_now(person_id).await?;

    Ok(respond(outcome))
}

/// Resolve a scanned document number and mark attendance for its owner.
#[utoipa::path(
    post,
    path = "/api/attendance/scan",
    request_body = ScanDocumentReq,
    responses(
        (status = 200, description = "Arrival or departure recorded", body = MarkAttendanceResponse),
        (status = 400, description = "Missing document"),
        (status = 404, description = "No person registered with the document", body = Object, example = json!({
            "error": "PERSON_NOT_FOUND",
            "message": "No person registered with document 70112233"
        })),
        (status = 409, description = "Already checked out today"),
        (status = 500, description = "Configuration missing or storage failure")
    ),
    tag = "Attendance"
)]
pub async fn scan_document(
    engine: web::Data<AttendanceEngine>,
    directory: web::Data<dyn DirectoryLookup>,
    payload: web::Json<ScanDocumentReq>,
) -> Result<HttpResponse, AttendanceError> {
    let document = payload
        .document
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AttendanceError::Validation("document is required".into()))?;

    let person_id = directory
        .resolve_by_document(document)
        .await
        .map_err(|e| {
            error!(error = %e, document, "Directory lookup failed");
            AttendanceError::Storage(e)
        })?
        .ok_or_else(|| AttendanceError::PersonNotFound(format!("document {document}")))?;

    let outcome = engine.mark_now(person_id).await?;

    Ok(respond(outcome))
}

/// Attendance history of one person, newest first
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Paginated attendance list", body = AttendanceListResponse),
        (status = 400, description = "Missing person_id or inverted date range")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    records: web::Data<dyn AttendanceStore>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, AttendanceError> {
    let person_id = query
        .person_id
        .ok_or_else(|| AttendanceError::Validation("person_id is required".into()))?;

    let range = DateRange {
        from: query.from,
        to: query.to,
    };
    if matches!((range.from, range.to), (Some(from), Some(to)) if from > to) {
        return Err(AttendanceError::Validation("from must not be after to".into()));
    }

    let page = PageRequest::new(query.page, query.per_page);

    let result = records
        .list_by_person(person_id, range, page)
        .await
        .map_err(|e| {
            error!(error = %e, person_id, "Failed to list attendance");
            AttendanceError::Storage(e)
        })?;

    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        data: result.data,
        page: page.page,
        per_page: page.per_page,
        total: result.total,
    }))
}
