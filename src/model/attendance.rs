use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumString};
use utoipa::ToSchema;

/// Attendance record as the upstream API serves it. Every optional field
/// may be null or missing; nothing here is validated yet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawAttendanceRecord {
    #[schema(example = 42)]
    pub id: u64,

    #[schema(example = "2025-01-10")]
    pub date: String,

    #[schema(example = "09:30", nullable = true)]
    pub check_in_time: Option<String>,

    #[schema(example = "18:05", nullable = true)]
    pub check_out_time: Option<String>,

    /// Status the upstream has stored for this record, if any. Kept for
    /// display next to the derived status; never used in summaries.
    #[schema(example = "PENDING", nullable = true)]
    pub status: Option<String>,

    /// Opaque owner identity, usually an email address.
    #[serde(default)]
    #[schema(example = "john.doe@company.com", nullable = true)]
    pub employee: Option<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, StrumDisplay, EnumString, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Late,
    HalfDay,
    Absent,
    Pending,
}

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum RecordError {
    #[display(fmt = "invalid time format: {}", value)]
    InvalidTimeFormat { value: String },

    #[display(fmt = "invalid calendar date: {}", value)]
    InvalidDate { value: String },
}

/// Validated attendance record. Building one from the raw wire form is the
/// only place parse failures can occur; everything downstream is total.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub id: u64,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub stored_status: Option<AttendanceStatus>,
    pub employee: Option<String>,
}

impl AttendanceRecord {
    pub fn from_raw(raw: &RawAttendanceRecord) -> Result<Self, RecordError> {
        let date = raw
            .date
            .parse::<NaiveDate>()
            .map_err(|_| RecordError::InvalidDate {
                value: raw.date.clone(),
            })?;

        Ok(Self {
            id: raw.id,
            date,
            check_in: parse_time(raw.check_in_time.as_deref())?,
            check_out: parse_time(raw.check_out_time.as_deref())?,
            // Unknown stored values map to "no stored status": the field is
            // audit-only and the derived status is canonical.
            stored_status: raw
                .status
                .as_deref()
                .and_then(|s| AttendanceStatus::from_str(s).ok()),
            employee: raw.employee.clone(),
        })
    }
}

/// Accepts `HH:MM` and `HH:MM:SS`, the two shapes the upstream emits.
fn parse_time(value: Option<&str>) -> Result<Option<NaiveTime>, RecordError> {
    let Some(value) = value else {
        return Ok(None);
    };

    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map(Some)
        .map_err(|_| RecordError::InvalidTimeFormat {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, check_in: Option<&str>, check_out: Option<&str>) -> RawAttendanceRecord {
        RawAttendanceRecord {
            id: 1,
            date: date.to_string(),
            check_in_time: check_in.map(str::to_string),
            check_out_time: check_out.map(str::to_string),
            status: None,
            employee: Some("john.doe@company.com".to_string()),
        }
    }

    #[test]
    fn parses_minutes_and_seconds_precision() {
        let record =
            AttendanceRecord::from_raw(&raw("2025-01-10", Some("09:30"), Some("18:05:12")))
                .unwrap();
        assert_eq!(record.check_in, NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(record.check_out, NaiveTime::from_hms_opt(18, 5, 12));
    }

    #[test]
    fn missing_times_stay_absent() {
        let record = AttendanceRecord::from_raw(&raw("2025-01-10", None, None)).unwrap();
        assert_eq!(record.check_in, None);
        assert_eq!(record.check_out, None);
    }

    #[test]
    fn garbage_time_is_rejected() {
        let err = AttendanceRecord::from_raw(&raw("2025-01-10", Some("25:99"), None)).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidTimeFormat {
                value: "25:99".to_string()
            }
        );
    }

    #[test]
    fn impossible_date_is_rejected() {
        let err = AttendanceRecord::from_raw(&raw("2025-02-30", Some("09:00"), None)).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidDate {
                value: "2025-02-30".to_string()
            }
        );
    }

    #[test]
    fn stored_status_round_trips_screaming_snake_case() {
        let mut record = raw("2025-01-10", None, None);
        record.status = Some("HALF_DAY".to_string());
        let parsed = AttendanceRecord::from_raw(&record).unwrap();
        assert_eq!(parsed.stored_status, Some(AttendanceStatus::HalfDay));
        assert_eq!(AttendanceStatus::HalfDay.to_string(), "HALF_DAY");
    }

    #[test]
    fn unknown_stored_status_maps_to_none() {
        let mut record = raw("2025-01-10", None, None);
        record.status = Some("ON_LEAVE".to_string());
        let parsed = AttendanceRecord::from_raw(&record).unwrap();
        assert_eq!(parsed.stored_status, None);
    }
}
