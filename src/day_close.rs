use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

/// End-of-day resolution computed for one roster member. Applying the action
/// is the upstream backend's job; this service only derives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayCloseAction {
    /// No record exists for the date at all.
    MarkAbsent { employee: String },
    /// Checked in, never checked out, still stored as PENDING.
    MarkHalfDay { employee: String, record_id: u64 },
}

/// Derives the day-close actions for `date` over the given roster.
/// Weekends are not business days and yield no actions. Duplicate roster
/// entries yield duplicate actions, matching the evaluator's policy of
/// counting duplicates independently.
pub fn close_day(
    date: NaiveDate,
    roster: &[String],
    records: &[AttendanceRecord],
) -> Vec<DayCloseAction> {
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        debug!(%date, "Skipping day close on weekend");
        return Vec::new();
    }

    let mut actions = Vec::new();

    for employee in roster {
        let record = records
            .iter()
            .find(|r| r.date == date && r.employee.as_deref() == Some(employee.as_str()));

        match record {
            None => actions.push(DayCloseAction::MarkAbsent {
                employee: employee.clone(),
            }),
            Some(record)
                if record.check_out.is_none()
                    && record.stored_status == Some(AttendanceStatus::Pending) =>
            {
                actions.push(DayCloseAction::MarkHalfDay {
                    employee: employee.clone(),
                    record_id: record.id,
                });
            }
            Some(_) => {}
        }
    }

    actions
}
