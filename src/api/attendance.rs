use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};
use utoipa::{IntoParams, ToSchema};

use crate::day_close::{DayCloseAction, close_day};
use crate::evaluate::classify;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, RawAttendanceRecord};
use crate::model::summary::{MonthlySummary, StatusCounts};
use crate::source::HttpRecordSource;
use crate::summary::{summarize, summarize_month};

#[derive(Debug, Deserialize, IntoParams)]
pub struct DayQuery {
    /// Business day to evaluate; defaults to today.
    #[param(value_type = Option<String>, format = "date")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
    /// Restrict to one employee identity (email or code).
    pub employee: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DayCloseRequest {
    #[schema(example = "2025-01-10", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = json!(["john.doe@company.com", "jane.roe@company.com"]))]
    pub roster: Vec<String>,
}

/// One record with both the upstream-stored status and the status derived
/// from its timestamps.
#[derive(Serialize, ToSchema)]
pub struct AttendanceView {
    pub id: u64,
    pub employee: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(value_type = Option<String>)]
    pub check_in: Option<NaiveTime>,
    #[schema(value_type = Option<String>)]
    pub check_out: Option<NaiveTime>,
    pub stored_status: Option<AttendanceStatus>,
    pub derived_status: AttendanceStatus,
}

impl From<&AttendanceRecord> for AttendanceView {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            id: record.id,
            employee: record.employee.clone(),
            date: record.date,
            check_in: record.check_in,
            check_out: record.check_out,
            stored_status: record.stored_status,
            derived_status: classify(record),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DayViewResponse {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub records: Vec<AttendanceView>,
    pub summary: StatusCounts,
    /// Upstream records dropped because they failed validation.
    pub skipped: u32,
}

#[derive(Serialize, ToSchema)]
pub struct MonthViewResponse {
    pub year: i32,
    pub month: u32,
    pub employee: Option<String>,
    pub records: Vec<AttendanceView>,
    pub summary: MonthlySummary,
    pub skipped: u32,
}

#[derive(Serialize, ToSchema)]
pub struct EvaluateResponse {
    pub records: Vec<AttendanceView>,
    pub summary: StatusCounts,
}

#[derive(Serialize, ToSchema)]
pub struct DayCloseResponse {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub actions: Vec<DayCloseAction>,
    pub skipped: u32,
}

fn bearer_token(req: &HttpRequest) -> actix_web::Result<String> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Missing Authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Expected a bearer token"))?;

    Ok(token.to_string())
}

/// Validates a fetched snapshot, dropping malformed records with a warning.
fn validate_snapshot(raws: &[RawAttendanceRecord]) -> (Vec<AttendanceRecord>, u32) {
    let mut records = Vec::with_capacity(raws.len());
    let mut skipped = 0u32;

    for raw in raws {
        match AttendanceRecord::from_raw(raw) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(error = %e, record_id = raw.id, "Skipping malformed attendance record");
                skipped += 1;
            }
        }
    }

    (records, skipped)
}

/// Daily attendance view
#[utoipa::path(
    get,
    path = "/api/v1/attendance/day",
    params(DayQuery),
    responses(
        (status = 200, description = "Records of the day with derived statuses and counts", body = DayViewResponse),
        (status = 401, description = "Missing or malformed bearer token"),
        (status = 502, description = "Upstream attendance API unavailable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn day_view(
    req: HttpRequest,
    source: web::Data<HttpRecordSource>,
    query: web::Query<DayQuery>,
) -> actix_web::Result<impl Responder> {
    let token = bearer_token(&req)?;
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());

    let raws = source.fetch_all(&token).await.map_err(|e| {
        error!(error = %e, "Failed to fetch attendance records");
        actix_web::error::ErrorBadGateway("Upstream attendance API unavailable")
    })?;

    let (mut records, skipped) = validate_snapshot(&raws);
    records.retain(|r| r.date == date);

    Ok(HttpResponse::Ok().json(DayViewResponse {
        date,
        summary: summarize(&records),
        records: records.iter().map(AttendanceView::from).collect(),
        skipped,
    }))
}

/// Monthly attendance view
#[utoipa::path(
    get,
    path = "/api/v1/attendance/month",
    params(MonthQuery),
    responses(
        (status = 200, description = "Monthly records with counts and fractional total", body = MonthViewResponse),
        (status = 400, description = "Month outside 1-12", body = Object, example = json!({
            "message": "Month must be between 1 and 12"
        })),
        (status = 401, description = "Missing or malformed bearer token"),
        (status = 502, description = "Upstream attendance API unavailable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn month_view(
    req: HttpRequest,
    source: web::Data<HttpRecordSource>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<impl Responder> {
    let token = bearer_token(&req)?;

    if !(1..=12).contains(&query.month) {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Month must be between 1 and 12"
        })));
    }

    let raws = source
        .fetch_month(&token, query.year, query.month)
        .await
        .map_err(|e| {
            error!(error = %e, year = query.year, month = query.month, "Failed to fetch monthly attendance");
            actix_web::error::ErrorBadGateway("Upstream attendance API unavailable")
        })?;

    let (mut records, skipped) = validate_snapshot(&raws);
    if let Some(employee) = &query.employee {
        records.retain(|r| r.employee.as_deref() == Some(employee.as_str()));
    }

    Ok(HttpResponse::Ok().json(MonthViewResponse {
        year: query.year,
        month: query.month,
        employee: query.employee.clone(),
        summary: summarize_month(&records, query.year, query.month),
        records: records.iter().map(AttendanceView::from).collect(),
        skipped,
    }))
}

/// Evaluate a caller-supplied snapshot
///
/// Pure evaluation, no upstream call. The caller owns the snapshot, so a
/// malformed record fails the whole request instead of being skipped.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/evaluate",
    request_body = Vec<RawAttendanceRecord>,
    responses(
        (status = 200, description = "Derived statuses and counts for the snapshot", body = EvaluateResponse),
        (status = 400, description = "Snapshot contains a malformed record", body = Object, example = json!({
            "message": "invalid time format: 25:99"
        }))
    ),
    tag = "Attendance"
)]
pub async fn evaluate_snapshot(
    payload: web::Json<Vec<RawAttendanceRecord>>,
) -> actix_web::Result<impl Responder> {
    let mut records = Vec::with_capacity(payload.len());
    for raw in payload.iter() {
        match AttendanceRecord::from_raw(raw) {
            Ok(record) => records.push(record),
            Err(e) => {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "message": e.to_string()
                })));
            }
        }
    }

    Ok(HttpResponse::Ok().json(EvaluateResponse {
        summary: summarize(&records),
        records: records.iter().map(AttendanceView::from).collect(),
    }))
}

/// Day-close preview
///
/// Computes which roster members should be marked ABSENT and which pending
/// records should resolve to HALF_DAY for the given date. Nothing is written
/// back; applying the actions is the upstream's job.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/day-close",
    request_body = DayCloseRequest,
    responses(
        (status = 200, description = "Proposed end-of-day resolutions", body = DayCloseResponse),
        (status = 401, description = "Missing or malformed bearer token"),
        (status = 502, description = "Upstream attendance API unavailable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn day_close_preview(
    req: HttpRequest,
    source: web::Data<HttpRecordSource>,
    payload: web::Json<DayCloseRequest>,
) -> actix_web::Result<impl Responder> {
    let token = bearer_token(&req)?;

    let raws = source.fetch_all(&token).await.map_err(|e| {
        error!(error = %e, date = %payload.date, "Failed to fetch attendance for day close");
        actix_web::error::ErrorBadGateway("Upstream attendance API unavailable")
    })?;

    let (records, skipped) = validate_snapshot(&raws);

    Ok(HttpResponse::Ok().json(DayCloseResponse {
        date: payload.date,
        actions: close_day(payload.date, &payload.roster, &records),
        skipped,
    }))
}
