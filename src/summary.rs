use chrono::Datelike;

use crate::evaluate::classify;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::summary::{MonthlySummary, StatusCounts};

/// Counts derived statuses over a snapshot. Duplicate records (same date and
/// employee) are counted independently.
pub fn summarize(records: &[AttendanceRecord]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for record in records {
        counts.bump(classify(record));
    }
    counts
}

/// Counts derived statuses over the records falling in the given calendar
/// month and accumulates the fractional attendance total.
pub fn summarize_month(records: &[AttendanceRecord], year: i32, month: u32) -> MonthlySummary {
    let mut summary = MonthlySummary::default();
    for record in records {
        if record.date.year() != year || record.date.month() != month {
            continue;
        }
        let status = classify(record);
        summary.counts.bump(status);
        summary.total += attendance_weight(status);
    }
    summary
}

fn attendance_weight(status: AttendanceStatus) -> f64 {
    match status {
        AttendanceStatus::Present | AttendanceStatus::Late => 1.0,
        AttendanceStatus::HalfDay => 0.5,
        AttendanceStatus::Absent | AttendanceStatus::Pending => 0.0,
    }
}
