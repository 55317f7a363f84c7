use crate::api::attendance::{
    AttendanceView, DayCloseRequest, DayCloseResponse, DayViewResponse, EvaluateResponse,
    MonthViewResponse,
};
use crate::day_close::DayCloseAction;
use crate::model::attendance::{AttendanceStatus, RawAttendanceRecord};
use crate::model::summary::{MonthlySummary, StatusCounts};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Evaluation API",
        version = "1.0.0",
        description = r#"
## Attendance Evaluation Service

Derived-view layer in front of an existing attendance backend. It fetches raw
check-in/check-out records over HTTP and recomputes each record's status from
fixed cutoffs, independent of whatever status the backend has stored.

### 🔹 Key Features
- **Daily view**
  - Records of one business day with stored and derived statuses plus counts
- **Monthly view**
  - Any month/year window with per-status counts and the fractional total
    (half days weigh 0.5)
- **Snapshot evaluation**
  - Pure classification of a caller-supplied record list, no upstream call
- **Day-close preview**
  - End-of-day resolutions: who gets marked ABSENT, which pending records
    resolve to HALF_DAY

### 🔐 Security
The caller's **bearer token** is forwarded verbatim to the upstream API; this
service issues and validates nothing itself.

### 📦 Response Format
- JSON-based RESTful responses

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::day_view,
        crate::api::attendance::month_view,
        crate::api::attendance::evaluate_snapshot,
        crate::api::attendance::day_close_preview
    ),
    components(
        schemas(
            RawAttendanceRecord,
            AttendanceStatus,
            AttendanceView,
            StatusCounts,
            MonthlySummary,
            DayViewResponse,
            MonthViewResponse,
            EvaluateResponse,
            DayCloseRequest,
            DayCloseResponse,
            DayCloseAction
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Attendance evaluation APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi
            .components
            .as_mut()
            .expect("components are registered above");
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
