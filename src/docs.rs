use crate::api::dashboard::{
    ChartResponse, DataStatus, DrillDownResponse, EmployeeListResponse, LocationListResponse,
    SummaryResponse,
};
use crate::api::error::ErrorBody;
use crate::model::aggregation::{
    AggregationBucket, AggregationWarning, ChartPoint, DrillDownRow, GenderCounts,
};
use crate::model::attendance::AttendancePredicate;
use crate::model::employee::EmployeeRow;
use crate::model::filter::{FilterClause, FilterOperator};
use crate::model::hierarchy::{HierarchyLevel, HierarchySelector};
use crate::model::organization::LocationSummary;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Dashboard API",
        version = "1.0.0",
        description = r#"
## Attendance Dashboard

Data layer of the workforce attendance dashboard. It turns an organizational
selection (location → subsidiary → division → department) into backend
queries and serves the aggregated results the dashboard renders.

### 🔹 Key Features
- **Summary counters**
  - Headcount plus present / absent / late-in / early-out totals
- **Shift charts**
  - Per shift code, male/female stacked series for one attendance flag
- **Drill-down**
  - Counters for every child unit of the selected scope
- **Employee lists**
  - Normalized employee rows for one attendance bucket

### 🔐 Security
All endpoints require a **JWT Bearer** access token issued by the HR
identity service. Employee lists are limited to **Admin**, **HR** and
**Manager** roles.

### 📦 Response Format
- `status: "empty"` means the query succeeded with no rows
- Upstream failures answer `502`/`504` with an error code
- A request replaced by a newer selection on the same view answers `409`

---
Built with **Rust**, **Actix Web**, **reqwest** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::dashboard::list_locations,
        crate::api::dashboard::attendance_summary,
        crate::api::dashboard::attendance_chart,
        crate::api::dashboard::attendance_drill_down,
        crate::api::dashboard::attendance_employees
    ),
    components(
        schemas(
            HierarchySelector,
            HierarchyLevel,
            FilterClause,
            FilterOperator,
            AttendancePredicate,
            AggregationBucket,
            GenderCounts,
            AggregationWarning,
            ChartPoint,
            DrillDownRow,
            EmployeeRow,
            LocationSummary,
            DataStatus,
            LocationListResponse,
            SummaryResponse,
            ChartResponse,
            DrillDownResponse,
            EmployeeListResponse,
            ErrorBody
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Dashboard", description = "Attendance dashboard APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
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
