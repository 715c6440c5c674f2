//! End-to-end tests for the scheduling engine HTTP API.
//!
//! This suite drives the router the way a caller would:
//! - Single-shift and full-schedule validation
//! - Schedule metrics and budget status
//! - Request approval, rejection, escalation, and bulk review
//! - Request queries with presets and the query cache
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use schedule_engine::api::{AppState, create_router};
use schedule_engine::config::ConfigLoader;
use schedule_engine::models::{
    Actor, ApprovalStage, RequestPriority, RequestStatus, RequestType, Role, TeamRequest,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/colombia").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal serialized as string")).unwrap()
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(router, uri, body.to_string()).await
}

async fn post_raw(router: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn shift(id: &str, employee_id: &str, date: &str, start: &str, end: &str, cost: &str) -> Value {
    json!({
        "id": id,
        "employee_id": employee_id,
        "location_id": "loc_centro",
        "date": date,
        "start_time": start,
        "end_time": end,
        "type": "regular",
        "cost": cost,
        "status": "draft"
    })
}

fn employee(id: &str, max_weekly_hours: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": format!("Empleado {}", id),
        "position": "Cajero",
        "location_id": "loc_centro",
        "max_weekly_hours": max_weekly_hours
    })
}

fn request(id: &str, employee_id: &str, request_type: RequestType, priority: RequestPriority) -> TeamRequest {
    let submitted = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
    let mut request = TeamRequest::new(
        id,
        employee_id,
        format!("Empleado {}", employee_id),
        "loc_centro",
        request_type,
        priority,
        "Motivo",
        submitted,
    )
    .with_dates(
        NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 24).unwrap(),
    );
    request.status = RequestStatus::Pending;
    request
}

fn supervisor() -> Actor {
    Actor::new("sup_1", Role::Supervisor, "loc_centro")
}

fn business_admin() -> Actor {
    Actor::new("admin_1", Role::BusinessAdmin, "loc_centro")
}

fn findings_of_type<'a>(result: &'a Value, key: &str, finding_type: &str) -> Vec<&'a Value> {
    result[key]
        .as_array()
        .unwrap()
        .iter()
        .filter(|f| f["type"] == finding_type)
        .collect()
}

// =============================================================================
// Shift Validation
// =============================================================================

#[tokio::test]
async fn test_valid_shift_draft() {
    let body = json!({
        "draft": {
            "employee_id": "emp_001",
            "location_id": "loc_centro",
            "date": "2024-01-15",
            "start_time": "06:00",
            "end_time": "14:00"
        },
        "employees": [employee("emp_001", None)],
        "today": "2024-01-10"
    });

    let (status, result) = post(create_router_for_test(), "/shifts/validate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["is_valid"], true);
    assert_eq!(result["summary"]["total_errors"], 0);
}

#[tokio::test]
async fn test_malformed_time_is_a_finding_not_an_error() {
    let body = json!({
        "draft": {
            "employee_id": "emp_001",
            "location_id": "loc_centro",
            "date": "2024-01-15",
            "start_time": "25:00",
            "end_time": "14:00"
        },
        "today": "2024-01-10"
    });

    let (status, result) = post(create_router_for_test(), "/shifts/validate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["is_valid"], false);
    let format_errors = findings_of_type(&result, "errors", "time_format");
    assert_eq!(format_errors.len(), 1);
    assert_eq!(format_errors[0]["value"], "25:00");
}

#[tokio::test]
async fn test_draft_overlapping_existing_shift() {
    let body = json!({
        "draft": {
            "employee_id": "emp_001",
            "location_id": "loc_centro",
            "date": "2024-01-15",
            "start_time": "13:00",
            "end_time": "21:00"
        },
        "existing_shifts": [shift("s1", "emp_001", "2024-01-15", "06:00", "14:00", "50000")],
        "today": "2024-01-10"
    });

    let (_, result) = post(create_router_for_test(), "/shifts/validate", body).await;

    let overlaps = findings_of_type(&result, "errors", "overlap");
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0]["conflicting_shift_id"], "s1");
}

// =============================================================================
// Schedule Validation
// =============================================================================

#[tokio::test]
async fn test_46_hour_week_warns_and_stays_valid() {
    // 4 x 8h + 2 x 7h for a 40h employee, each paired with a second employee
    let days = ["2024-01-15", "2024-01-16", "2024-01-17", "2024-01-18", "2024-01-19", "2024-01-20"];
    let mut shifts = Vec::new();
    for (i, date) in days.iter().enumerate() {
        let end = if i < 4 { "14:00" } else { "13:00" };
        shifts.push(shift(&format!("s{}", i), "emp_001", date, "06:00", end, "60000"));
        shifts.push(shift(&format!("p{}", i), "emp_002", date, "08:00", "12:00", "30000"));
    }
    let body = json!({
        "shifts": shifts,
        "employees": [employee("emp_001", Some("40")), employee("emp_002", None)]
    });

    let (status, result) = post(create_router_for_test(), "/schedules/validate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["is_valid"], true, "unexpected errors: {}", result["errors"]);
    let overtime = findings_of_type(&result, "warnings", "overtime");
    assert_eq!(overtime.len(), 1);
    assert_eq!(overtime[0]["can_auto_fix"], true);
    assert_eq!(decimal(&overtime[0]["scheduled_hours"]), Decimal::from(46));
}

#[tokio::test]
async fn test_schedule_overlap_reported_once() {
    let body = json!({
        "shifts": [
            shift("s1", "emp_001", "2024-01-15", "06:00", "14:00", "50000"),
            shift("s2", "emp_001", "2024-01-15", "13:00", "21:00", "50000")
        ]
    });

    let (_, result) = post(create_router_for_test(), "/schedules/validate", body).await;

    assert_eq!(result["is_valid"], false);
    assert_eq!(findings_of_type(&result, "errors", "overlap").len(), 1);
}

#[tokio::test]
async fn test_seven_day_week_needs_rest_day() {
    let shifts: Vec<Value> = (15..=21)
        .map(|d| {
            shift(
                &format!("s{}", d),
                "emp_001",
                &format!("2024-01-{}", d),
                "08:00",
                "12:00",
                "20000",
            )
        })
        .collect();
    let body = json!({ "shifts": shifts });

    let (_, result) = post(create_router_for_test(), "/schedules/validate", body).await;

    let rest_day = findings_of_type(&result, "errors", "rest_day");
    assert_eq!(rest_day.len(), 1);
    assert_eq!(rest_day[0]["employee_id"], "emp_001");
}

#[tokio::test]
async fn test_budget_overrun_is_an_error() {
    let body = json!({
        "shifts": [
            shift("s1", "emp_001", "2024-01-15", "06:00", "14:00", "600000"),
            shift("s2", "emp_002", "2024-01-15", "06:00", "14:00", "600000")
        ],
        "weekly_budget": "1000000"
    });

    let (_, result) = post(create_router_for_test(), "/schedules/validate", body).await;

    let budget = findings_of_type(&result, "errors", "budget");
    assert_eq!(budget.len(), 1);
    assert_eq!(decimal(&budget[0]["utilization"]), Decimal::from(120));
}

// =============================================================================
// Metrics
// =============================================================================

#[tokio::test]
async fn test_metrics_92_percent_of_budget_warns() {
    let body = json!({
        "shifts": [
            shift("s1", "emp_001", "2024-01-15", "06:00", "14:00", "4600000"),
            shift("s2", "emp_002", "2024-01-15", "06:00", "14:00", "4600000")
        ],
        "employees": [employee("emp_001", None), employee("emp_002", None), employee("emp_003", None)]
    });

    let (status, metrics) = post(create_router_for_test(), "/schedules/metrics", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&metrics["budget_utilization"]), Decimal::from(92));
    assert_eq!(metrics["budget_status"], "warning");
    assert_eq!(metrics["employee_count"], 2);
    assert_eq!(decimal(&metrics["weekly_hours"]), Decimal::from(16));
    assert_eq!(metrics["unscheduled_employees"], json!(["emp_003"]));
}

// =============================================================================
// Request Workflow
// =============================================================================

#[tokio::test]
async fn test_vacation_needs_both_stages() {
    let vacation = request("req_1", "emp_001", RequestType::Vacation, RequestPriority::Medium);

    let (status, after_supervisor) = post(
        create_router_for_test(),
        "/requests/approve",
        json!({ "request": vacation, "actor": supervisor(), "comments": "Cubierto" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let after_supervisor: TeamRequest = serde_json::from_value(after_supervisor).unwrap();
    assert_eq!(after_supervisor.status, RequestStatus::UnderReview);
    assert_eq!(after_supervisor.approval_flow.current_stage, ApprovalStage::BusinessAdmin);

    let (status, after_admin) = post(
        create_router_for_test(),
        "/requests/approve",
        json!({ "request": after_supervisor, "actor": business_admin() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let after_admin: TeamRequest = serde_json::from_value(after_admin).unwrap();
    assert_eq!(after_admin.status, RequestStatus::Approved);
    assert_eq!(after_admin.approval_flow.current_stage, ApprovalStage::Completed);
    assert_eq!(after_admin.approval_flow.approval_history.len(), 2);
}

#[tokio::test]
async fn test_escalate_bumps_priority() {
    let shift_change = request("req_2", "emp_001", RequestType::ShiftChange, RequestPriority::Low);

    let (status, escalated) = post(
        create_router_for_test(),
        "/requests/escalate",
        json!({ "request": shift_change, "actor": supervisor(), "comments": "Needs budget" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let escalated: TeamRequest = serde_json::from_value(escalated).unwrap();
    assert_eq!(escalated.approval_flow.current_stage, ApprovalStage::BusinessAdmin);
    assert!(escalated.approval_flow.is_escalated);
    assert_eq!(escalated.status, RequestStatus::UnderReview);
    assert_eq!(escalated.priority, RequestPriority::Medium);
}

#[tokio::test]
async fn test_escalate_at_admin_stage_conflicts() {
    let mut vacation = request("req_3", "emp_001", RequestType::Vacation, RequestPriority::Low);
    vacation.approval_flow.current_stage = ApprovalStage::BusinessAdmin;
    vacation.status = RequestStatus::UnderReview;

    let (status, error) = post(
        create_router_for_test(),
        "/requests/escalate",
        json!({ "request": vacation, "actor": supervisor() }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "INVALID_STAGE");
}

#[tokio::test]
async fn test_reject_whitespace_comments_is_refused() {
    let vacation = request("req_4", "emp_001", RequestType::Vacation, RequestPriority::Medium);

    let (status, error) = post(
        create_router_for_test(),
        "/requests/reject",
        json!({ "request": vacation, "actor": supervisor(), "comments": "   " }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "COMMENTS_REQUIRED");
}

#[tokio::test]
async fn test_reject_completes_request() {
    let vacation = request("req_5", "emp_001", RequestType::Vacation, RequestPriority::Medium);

    let (status, rejected) = post(
        create_router_for_test(),
        "/requests/reject",
        json!({ "request": vacation, "actor": supervisor(), "comments": "Temporada alta" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rejected: TeamRequest = serde_json::from_value(rejected).unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);
    assert_eq!(rejected.approval_flow.current_stage, ApprovalStage::Completed);
}

#[tokio::test]
async fn test_request_info_returns_to_pending() {
    let mut vacation = request("req_6", "emp_001", RequestType::Vacation, RequestPriority::Medium);
    vacation.status = RequestStatus::UnderReview;

    let (status, returned) = post(
        create_router_for_test(),
        "/requests/request-info",
        json!({ "request": vacation, "actor": supervisor(), "comments": "¿Quién cubre?" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let returned: TeamRequest = serde_json::from_value(returned).unwrap();
    assert_eq!(returned.status, RequestStatus::Pending);
    assert_eq!(returned.approval_flow.current_stage, ApprovalStage::Supervisor);
}

#[tokio::test]
async fn test_bulk_approve_partitions_results() {
    let requests = vec![
        request("req_a", "emp_001", RequestType::ShiftChange, RequestPriority::Medium),
        request("req_own", "sup_1", RequestType::ShiftChange, RequestPriority::Medium),
    ];

    let (status, outcome) = post(
        create_router_for_test(),
        "/requests/bulk-approve",
        json!({
            "requests": requests,
            "request_ids": ["req_a", "req_own", "req_missing"],
            "actor": supervisor()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["succeeded"], json!(["req_a"]));
    let failed = outcome["failed"].as_array().unwrap();
    assert_eq!(failed.len(), 2);
    assert_eq!(failed[0]["request_id"], "req_own");
    assert_eq!(failed[0]["code"], "INSUFFICIENT_PERMISSIONS");
    assert_eq!(failed[1]["request_id"], "req_missing");
    assert_eq!(failed[1]["code"], "REQUEST_NOT_FOUND");
    assert_eq!(outcome["updated"][0]["status"], "approved");
}

#[tokio::test]
async fn test_bulk_reject_requires_comments_per_id() {
    let requests = vec![request("req_a", "emp_001", RequestType::ShiftChange, RequestPriority::Medium)];

    let (status, outcome) = post(
        create_router_for_test(),
        "/requests/bulk-reject",
        json!({ "requests": requests, "request_ids": ["req_a"], "actor": business_admin() }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["succeeded"], json!([]));
    assert_eq!(outcome["failed"][0]["code"], "COMMENTS_REQUIRED");
}

// =============================================================================
// Request Queries
// =============================================================================

#[tokio::test]
async fn test_pending_preset_filters_and_counts() {
    let mut approved = request("req_c", "emp_003", RequestType::SickLeave, RequestPriority::High);
    approved.status = RequestStatus::Approved;
    let requests = vec![
        request("req_a", "emp_001", RequestType::Vacation, RequestPriority::Low),
        request("req_b", "emp_002", RequestType::ShiftChange, RequestPriority::Urgent),
        approved,
    ];

    let (status, result) = post(
        create_router_for_test(),
        "/requests/query",
        json!({ "requests": requests, "preset": "pending_approval", "today": "2024-01-17" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["matched"], 2);
    assert_eq!(result["counts"]["total"], 3);
    assert_eq!(result["counts"]["by_status"]["pending"], 2);
    assert_eq!(result["counts"]["by_status"]["approved"], 1);
}

#[tokio::test]
async fn test_employee_query_sees_only_own_requests() {
    let requests = vec![
        request("req_a", "emp_001", RequestType::Vacation, RequestPriority::Low),
        request("req_b", "emp_002", RequestType::ShiftChange, RequestPriority::Urgent),
    ];

    let (_, result) = post(
        create_router_for_test(),
        "/requests/query",
        json!({
            "requests": requests,
            "actor": Actor::new("emp_001", Role::Employee, "loc_centro")
        }),
    )
    .await;

    assert_eq!(result["matched"], 1);
    assert_eq!(result["items"][0]["id"], "req_a");
}

#[tokio::test]
async fn test_query_cache_serves_same_snapshot_version() {
    let router = create_router_for_test();
    let first = vec![request("req_a", "emp_001", RequestType::Vacation, RequestPriority::Low)];
    let second = vec![
        request("req_a", "emp_001", RequestType::Vacation, RequestPriority::Low),
        request("req_b", "emp_002", RequestType::Vacation, RequestPriority::Low),
    ];

    let (_, cached) = post(
        router.clone(),
        "/requests/query",
        json!({ "requests": first, "snapshot_version": "v1", "today": "2024-01-17" }),
    )
    .await;
    let (_, hit) = post(
        router.clone(),
        "/requests/query",
        json!({ "requests": second, "snapshot_version": "v1", "today": "2024-01-17" }),
    )
    .await;
    let (_, fresh) = post(
        router,
        "/requests/query",
        json!({ "requests": second, "snapshot_version": "v2", "today": "2024-01-17" }),
    )
    .await;

    assert_eq!(cached["matched"], 1);
    assert_eq!(hit, cached);
    assert_eq!(fresh["matched"], 2);
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let (status, error) =
        post_raw(create_router_for_test(), "/schedules/validate", "{invalid json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_returns_validation_error() {
    let (status, error) = post(
        create_router_for_test(),
        "/requests/approve",
        json!({ "actor": supervisor() }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_employee_cannot_approve() {
    let vacation = request("req_1", "emp_001", RequestType::Vacation, RequestPriority::Medium);

    let (status, error) = post(
        create_router_for_test(),
        "/requests/approve",
        json!({ "request": vacation, "actor": Actor::new("emp_002", Role::Employee, "loc_centro") }),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn test_query_cache_separates_actor_location_scopes() {
    let router = create_router_for_test();
    let mut north = request("req_b", "emp_002", RequestType::Vacation, RequestPriority::Low);
    north.location_id = "loc_norte".to_string();
    let requests = vec![
        request("req_a", "emp_001", RequestType::Vacation, RequestPriority::Low),
        north,
    ];
    let mut wide = supervisor();
    wide.location_ids.push("loc_norte".to_string());

    let (_, both) = post(
        router.clone(),
        "/requests/query",
        json!({ "requests": requests, "actor": wide, "snapshot_version": "v1", "today": "2024-01-17" }),
    )
    .await;
    let (_, centro_only) = post(
        router,
        "/requests/query",
        json!({ "requests": requests, "actor": supervisor(), "snapshot_version": "v1", "today": "2024-01-17" }),
    )
    .await;

    assert_eq!(both["matched"], 2);
    assert_eq!(centro_only["matched"], 1);
    assert_eq!(centro_only["items"][0]["id"], "req_a");
}
