use chrono::NaiveTime;
use once_cell::sync::Lazy;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

/// Fixed time-of-day thresholds the classification rules compare against.
/// All cutoffs are read on the record's own business date.
pub struct Cutoffs {
    pub late_start: NaiveTime,
    pub late_end: NaiveTime,
    pub half_day_end: NaiveTime,
    pub absent_threshold: NaiveTime,
    pub full_day_checkout: NaiveTime,
}

pub static CUTOFFS: Lazy<Cutoffs> = Lazy::new(|| Cutoffs {
    late_start: NaiveTime::from_hms_opt(9, 50, 0).unwrap(),
    late_end: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
    half_day_end: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    absent_threshold: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
    full_day_checkout: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
});

/// Derives the effective status of a single record from its raw timestamps,
/// ignoring whatever status the upstream has stored. Pure and total.
///
/// The rules overlap by construction and are evaluated strictly in this
/// order, first match wins. Lower bounds are exclusive, upper bounds
/// inclusive, so a check-in exactly on a cutoff lands in the more lenient
/// bucket.
pub fn classify(record: &AttendanceRecord) -> AttendanceStatus {
    let Some(check_in) = record.check_in else {
        // Not resolvable yet: nobody has checked in.
        return AttendanceStatus::Pending;
    };

    let cutoffs = &*CUTOFFS;

    if check_in > cutoffs.absent_threshold {
        return AttendanceStatus::Absent;
    }
    if check_in > cutoffs.half_day_end {
        return AttendanceStatus::HalfDay;
    }
    if check_in > cutoffs.late_start && check_in <= cutoffs.late_end {
        return AttendanceStatus::Late;
    }
    if let Some(check_out) = record.check_out {
        if check_out < cutoffs.full_day_checkout {
            return AttendanceStatus::HalfDay;
        }
    }

    AttendanceStatus::Present
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn time(s: &str) -> NaiveTime {
        s.parse().unwrap()
    }

    fn record(check_in: Option<&str>, check_out: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            check_in: check_in.map(time),
            check_out: check_out.map(time),
            stored_status: None,
            employee: Some("john.doe@company.com".to_string()),
        }
    }

    #[test]
    fn no_check_in_is_pending() {
        assert_eq!(classify(&record(None, None)), AttendanceStatus::Pending);
        assert_eq!(
            classify(&record(None, Some("18:30:00"))),
            AttendanceStatus::Pending
        );
    }

    #[test]
    fn check_in_after_absent_threshold_is_absent_regardless_of_checkout() {
        assert_eq!(
            classify(&record(Some("14:00:01"), None)),
            AttendanceStatus::Absent
        );
        assert_eq!(
            classify(&record(Some("16:00:00"), Some("19:00:00"))),
            AttendanceStatus::Absent
        );
    }

    #[test]
    fn check_in_between_noon_and_absent_threshold_is_half_day() {
        assert_eq!(
            classify(&record(Some("12:00:01"), Some("19:00:00"))),
            AttendanceStatus::HalfDay
        );
        assert_eq!(
            classify(&record(Some("13:00:00"), None)),
            AttendanceStatus::HalfDay
        );
        // the 14:00 boundary belongs to the half-day bucket, not absent
        assert_eq!(
            classify(&record(Some("14:00:00"), None)),
            AttendanceStatus::HalfDay
        );
    }

    #[test]
    fn check_in_in_late_window_is_late() {
        assert_eq!(
            classify(&record(Some("09:50:01"), Some("18:30:00"))),
            AttendanceStatus::Late
        );
        assert_eq!(
            classify(&record(Some("10:30:00"), Some("18:15:00"))),
            AttendanceStatus::Late
        );
        // upper bound is inclusive
        assert_eq!(
            classify(&record(Some("11:00:00"), None)),
            AttendanceStatus::Late
        );
    }

    #[test]
    fn on_time_boundary_is_not_late() {
        assert_eq!(
            classify(&record(Some("09:50:00"), None)),
            AttendanceStatus::Present
        );
    }

    #[test]
    fn early_checkout_turns_on_time_day_into_half_day() {
        assert_eq!(
            classify(&record(Some("09:00:00"), Some("17:00:00"))),
            AttendanceStatus::HalfDay
        );
        assert_eq!(
            classify(&record(Some("09:00:00"), Some("17:59:59"))),
            AttendanceStatus::HalfDay
        );
    }

    #[test]
    fn full_day_checkout_is_present() {
        assert_eq!(
            classify(&record(Some("09:00:00"), Some("18:00:00"))),
            AttendanceStatus::Present
        );
        assert_eq!(
            classify(&record(Some("09:00:00"), None)),
            AttendanceStatus::Present
        );
    }

    // Check-ins in (11:00, 12:00] match none of the window rules and
    // resolve on the checkout rules alone. That gap is part of the rule
    // order contract, so pin it down.
    #[test]
    fn late_morning_gap_resolves_on_checkout() {
        assert_eq!(
            classify(&record(Some("11:30:00"), Some("18:30:00"))),
            AttendanceStatus::Present
        );
        assert_eq!(
            classify(&record(Some("11:30:00"), Some("16:00:00"))),
            AttendanceStatus::HalfDay
        );
        assert_eq!(
            classify(&record(Some("12:00:00"), None)),
            AttendanceStatus::Present
        );
    }

    #[test]
    fn classify_is_idempotent() {
        let r = record(Some("10:30:00"), Some("18:15:00"));
        assert_eq!(classify(&r), classify(&r));
    }
}
