use std::str::FromStr;

use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::api::state::DashboardState;
use crate::auth::auth::AuthUser;
use crate::model::aggregation::{AggregationBucket, AggregationWarning, ChartPoint, DrillDownRow};
use crate::model::attendance::AttendancePredicate;
use crate::model::employee::EmployeeRow;
use crate::model::filter::FilterClause;
use crate::model::hierarchy::{HierarchyLevel, HierarchySelector};
use crate::model::organization::LocationSummary;
use crate::pipeline::aggregator::{RecordSet, aggregate_value, summarize};
use crate::pipeline::filter_payload::FilterPayloadBuilder;
use crate::pipeline::{chart_series, drill_down, employee_rows};

/// `empty` is a successful query with no matching rows; failures are
/// reported with an error status instead.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataStatus {
    Ok,
    Empty,
}

impl DataStatus {
    fn from_empty(is_empty: bool) -> Self {
        if is_empty { DataStatus::Empty } else { DataStatus::Ok }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LocationListResponse {
    pub status: DataStatus,
    pub data: Vec<LocationSummary>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "status": "ok",
    "referenceDate": "2025-03-14",
    "headcount": 120,
    "present": 98,
    "absent": 22,
    "lateIn": 7,
    "earlyOut": 3,
    "warnings": []
}))]
pub struct SummaryResponse {
    pub status: DataStatus,
    #[schema(value_type = String, format = "date")]
    pub reference_date: NaiveDate,
    pub headcount: u64,
    pub present: u64,
    pub absent: u64,
    pub late_in: u64,
    pub early_out: u64,
    pub warnings: Vec<AggregationWarning>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    pub status: DataStatus,
    pub predicate: AttendancePredicate,
    pub bucket: AggregationBucket,
    pub series: Vec<ChartPoint>,
    pub warnings: Vec<AggregationWarning>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrillDownResponse {
    pub status: DataStatus,
    /// Level the rows belong to; absent below department
    pub child_level: Option<HierarchyLevel>,
    pub rows: Vec<DrillDownRow>,
    pub warnings: Vec<AggregationWarning>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListResponse {
    pub status: DataStatus,
    pub predicate: AttendancePredicate,
    pub rows: Vec<EmployeeRow>,
    pub warnings: Vec<AggregationWarning>,
}

fn parse_predicate(raw: &str) -> Result<AttendancePredicate, ApiError> {
    AttendancePredicate::from_str(raw).map_err(|_| {
        ApiError::BadRequest(format!(
            "Unknown attendance predicate {raw:?}. Allowed: present, absent, lateIn, earlyOut"
        ))
    })
}

/// Runs one search under the caller's view slot so a newer selection on the
/// same view cancels it.
async fn tracked_search(
    state: &DashboardState,
    slot: String,
    selector: &HierarchySelector,
    payload: Vec<FilterClause>,
) -> Result<Value, ApiError> {
    let body = state
        .tracker
        .run(&slot, &selector.identity(), state.backend.search(&payload))
        .await??;
    Ok(body)
}

/// Organization locations
#[utoipa::path(
    get,
    path = "/api/dashboard/locations",
    responses(
        (status = 200, description = "Locations of the organization", body = LocationListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Organization service failed", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(name = "dashboard_locations", skip(auth, state), fields(user_id = auth.user_id))]
pub async fn list_locations(
    auth: AuthUser,
    state: web::Data<DashboardState>,
) -> Result<HttpResponse, ApiError> {
    let locations = state
        .backend
        .locations(&state.context.tenant_code)
        .await
        .inspect_err(|e| warn!(error = %e, "Failed to load organization locations"))?;

    Ok(HttpResponse::Ok().json(LocationListResponse {
        status: DataStatus::from_empty(locations.is_empty()),
        data: locations,
    }))
}

/// Metric-card counters for a scope
#[utoipa::path(
    post,
    path = "/api/dashboard/attendance/summary",
    request_body = HierarchySelector,
    responses(
        (status = 200, description = "Headcount and attendance totals", body = SummaryResponse),
        (status = 400, description = "Invalid selector", body = ErrorBody),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Superseded by a newer selection", body = ErrorBody),
        (status = 502, description = "Attendance service failed", body = ErrorBody),
        (status = 504, description = "Attendance service timed out", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(
    name = "dashboard_summary",
    skip(auth, state, selector),
    fields(user_id = auth.user_id, selector = %selector.identity())
)]
pub async fn attendance_summary(
    auth: AuthUser,
    state: web::Data<DashboardState>,
    selector: web::Json<HierarchySelector>,
) -> Result<HttpResponse, ApiError> {
    selector.validate()?;

    let builder = FilterPayloadBuilder::new(&state.context);
    let search_payload = builder.attendance_search(&selector);
    let count_payload = builder.headcount(&selector);

    // Headcount and attendance are independent backend calls.
    let (body, headcount) = state
        .tracker
        .run(
            &auth.view_slot("summary"),
            &selector.identity(),
            async {
                futures::join!(
                    state.backend.search(&search_payload),
                    state.backend.count(&count_payload)
                )
            },
        )
        .await?;
    let body = body?;
    let headcount = headcount?;

    let set = RecordSet::from_json(&body);
    let summary = summarize(&set.records);
    info!(headcount, records = set.records.len(), "Attendance summary computed");

    Ok(HttpResponse::Ok().json(SummaryResponse {
        status: DataStatus::from_empty(set.is_empty() && headcount == 0),
        reference_date: state.context.reference_date,
        headcount,
        present: summary.present.total,
        absent: summary.absent.total,
        late_in: summary.late_in.total,
        early_out: summary.early_out.total,
        warnings: set.warnings,
    }))
}

/// Shift/gender chart for one attendance predicate
#[utoipa::path(
    post,
    path = "/api/dashboard/attendance/{predicate}/chart",
    params(
        ("predicate" = String, Path, description = "present, absent, lateIn or earlyOut")
    ),
    request_body = HierarchySelector,
    responses(
        (status = 200, description = "Bucket and stacked-bar series", body = ChartResponse),
        (status = 400, description = "Invalid selector or predicate", body = ErrorBody),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Superseded by a newer selection", body = ErrorBody),
        (status = 502, description = "Attendance service failed", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(
    name = "dashboard_chart",
    skip(auth, state, selector),
    fields(user_id = auth.user_id, selector = %selector.identity())
)]
pub async fn attendance_chart(
    auth: AuthUser,
    state: web::Data<DashboardState>,
    path: web::Path<String>,
    selector: web::Json<HierarchySelector>,
) -> Result<HttpResponse, ApiError> {
    let predicate = parse_predicate(&path)?;
    selector.validate()?;

    let payload = FilterPayloadBuilder::new(&state.context).attendance_search(&selector);
    let slot = auth.view_slot(&format!("chart:{predicate}"));
    let body = tracked_search(&state, slot, &selector, payload).await?;

    let (bucket, warnings) = aggregate_value(&body, predicate);
    let series = chart_series::project(&bucket);

    Ok(HttpResponse::Ok().json(ChartResponse {
        status: DataStatus::from_empty(bucket.total == 0),
        predicate,
        bucket,
        series,
        warnings,
    }))
}

/// Counters per child unit of a scope
#[utoipa::path(
    post,
    path = "/api/dashboard/attendance/drill-down",
    request_body = HierarchySelector,
    responses(
        (status = 200, description = "One row per child unit", body = DrillDownResponse),
        (status = 400, description = "Invalid selector", body = ErrorBody),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Superseded by a newer selection", body = ErrorBody),
        (status = 502, description = "Attendance service failed", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(
    name = "dashboard_drill_down",
    skip(auth, state, selector),
    fields(user_id = auth.user_id, selector = %selector.identity())
)]
pub async fn attendance_drill_down(
    auth: AuthUser,
    state: web::Data<DashboardState>,
    selector: web::Json<HierarchySelector>,
) -> Result<HttpResponse, ApiError> {
    selector.validate()?;

    let payload = FilterPayloadBuilder::new(&state.context).attendance_search(&selector);
    let body = tracked_search(&state, auth.view_slot("drill-down"), &selector, payload).await?;

    let set = RecordSet::from_json(&body);
    let rows = drill_down::drill_down(&set.records, selector.level);

    Ok(HttpResponse::Ok().json(DrillDownResponse {
        status: DataStatus::from_empty(rows.is_empty()),
        child_level: selector.level.child(),
        rows,
        warnings: set.warnings,
    }))
}

/// Employees in one attendance bucket
#[utoipa::path(
    post,
    path = "/api/dashboard/attendance/{predicate}/employees",
    params(
        ("predicate" = String, Path, description = "present, absent, lateIn or earlyOut")
    ),
    request_body = HierarchySelector,
    responses(
        (status = 200, description = "Normalized employee rows", body = EmployeeListResponse),
        (status = 400, description = "Invalid selector or predicate", body = ErrorBody),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Superseded by a newer selection", body = ErrorBody),
        (status = 502, description = "Attendance service failed", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(
    name = "dashboard_employees",
    skip(auth, state, selector),
    fields(
        user_id = auth.user_id,
        username = %auth.username,
        employee_id = ?auth.employee_id,
        selector = %selector.identity()
    )
)]
pub async fn attendance_employees(
    auth: AuthUser,
    state: web::Data<DashboardState>,
    path: web::Path<String>,
    selector: web::Json<HierarchySelector>,
) -> actix_web::Result<HttpResponse> {
    auth.require_people_manager()?;
    let predicate = parse_predicate(&path)?;
    selector.validate().map_err(ApiError::from)?;

    let payload = FilterPayloadBuilder::new(&state.context).build(
        &selector,
        &[state.context.attendance_date_clause(), predicate.clause()],
    );
    let slot = auth.view_slot(&format!("employees:{predicate}"));
    let body = tracked_search(&state, slot, &selector, payload).await?;

    let mut warnings = Vec::new();
    if !body.is_array() {
        warn!("Employee body is not an array, treating as empty");
        warnings.push(AggregationWarning::NotAnArray);
    }
    let rows = employee_rows::project_all(&body);

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        status: DataStatus::from_empty(rows.is_empty()),
        predicate,
        rows,
        warnings,
    }))
}
