use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::AttendanceStatus;

/// One counter per attendance status. The counters of a summary over a
/// record collection always sum to the collection's size.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    #[schema(example = 12)]
    pub present: u32,
    #[schema(example = 2)]
    pub late: u32,
    #[schema(example = 1)]
    pub half_day: u32,
    #[schema(example = 3)]
    pub absent: u32,
    #[schema(example = 0)]
    pub pending: u32,
}

impl StatusCounts {
    pub fn bump(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Late => self.late += 1,
            AttendanceStatus::HalfDay => self.half_day += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Pending => self.pending += 1,
        }
    }

    pub fn total_records(&self) -> u32 {
        self.present + self.late + self.half_day + self.absent + self.pending
    }
}

/// Per-status counts for one month plus the fractional attendance total:
/// PRESENT and LATE weigh 1.0, HALF_DAY 0.5, ABSENT and PENDING 0.
#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlySummary {
    #[serde(flatten)]
    pub counts: StatusCounts,
    #[schema(example = 14.5)]
    pub total: f64,
}
