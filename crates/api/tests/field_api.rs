//! Integration tests for incidents, daily logs, RFIs, equipment and the
//! resource schedule.

mod common;

use axum::http::StatusCode;
use groundwork_assist::ScanVerdict;
use serde_json::json;

use common::{body_json, delete_as, get, post_as, post_json_as, put_json_as};

async fn latest_entry(app: axum::Router, project_id: i64) -> serde_json::Value {
    let feed = body_json(get(app, &format!("/api/v1/projects/{project_id}/audit-logs")).await).await;
    feed["data"][0].clone()
}

fn incident_body(description: &str) -> serde_json::Value {
    json!({
        "project_id": 1,
        "severity": "high",
        "type": "near_miss",
        "description": description,
        "location_on_site": "Level 2 east stairwell",
    })
}

// ---------------------------------------------------------------------------
// Safety
// ---------------------------------------------------------------------------

#[tokio::test]
async fn incident_report_survives_a_missing_summary() {
    let app = common::build_test_app();

    let response = post_json_as(app.clone(), "/api/v1/incidents", 8, incident_body("Unsecured plank fell from scaffold")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let incident = body_json(response).await["data"].clone();
    assert_eq!(incident["status"], "reported");
    assert_eq!(incident["reporter_id"], 8);
    assert_eq!(incident["ai_summary"], "No AI summary available.");

    let entry = latest_entry(app, 1).await;
    assert_eq!(entry["code"], "SAFETY_INCIDENT_REPORTED");
    assert_eq!(entry["target"]["name"], "Near Miss incident");
}

#[tokio::test]
async fn incident_report_uses_the_assistant_summary() {
    let app = common::build_test_app_with(common::canned("Falling object, no injury."), ScanVerdict::Clean);
    let response = post_json_as(app, "/api/v1/incidents", 8, incident_body("Plank fell")).await;
    assert_eq!(body_json(response).await["data"]["ai_summary"], "Falling object, no injury.");
}

#[tokio::test]
async fn incident_report_requires_a_description() {
    let app = common::build_test_app();
    let response = post_json_as(app, "/api/v1/incidents", 8, incident_body("   ")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn incident_status_change_is_audited() {
    let app = common::build_test_app();

    let response = put_json_as(app.clone(), "/api/v1/incidents/1/status", 8, json!({ "status": "under_review" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "under_review");
    assert_eq!(latest_entry(app, 1).await["target"]["name"], "Incident #1 to Under Review");
}

#[tokio::test]
async fn safety_analysis_needs_the_assistant() {
    let app = common::build_test_app();
    let response = post_as(app, "/api/v1/projects/1/safety-analysis", 8).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], groundwork_api::error::ASSISTANT_FAILED);

    let app = common::build_test_app_with(common::canned("Falls dominate."), ScanVerdict::Clean);
    let response = post_as(app.clone(), "/api/v1/projects/1/safety-analysis", 8).await;
    assert_eq!(response.status(), StatusCode::OK);
    let analysis = body_json(response).await["data"].clone();
    assert_eq!(analysis["incidents"], 2);
    assert_eq!(analysis["analysis"], "Falls dominate.");
    assert_eq!(latest_entry(app, 1).await["code"], "SAFETY_ANALYSIS_GENERATED");
}

// ---------------------------------------------------------------------------
// Daily logs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn daily_log_is_audited_by_date() {
    let app = common::build_test_app();

    let response = post_json_as(
        app.clone(),
        "/api/v1/daily-logs",
        7,
        json!({
            "project_id": 1,
            "date": "2026-10-15T07:00:00Z",
            "weather": "rain",
            "temperature": 12.5,
            "notes": "Pour postponed until the slab drains.",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["author_id"], 7);

    let entry = latest_entry(app, 1).await;
    assert_eq!(entry["code"], "DAILY_LOG_ADDED");
    assert_eq!(entry["target"]["name"], "Log for 2026-10-15");
}

#[tokio::test]
async fn implausible_temperature_is_rejected() {
    let app = common::build_test_app();
    let response = post_json_as(
        app,
        "/api/v1/daily-logs",
        7,
        json!({
            "project_id": 1,
            "date": "2026-10-15T07:00:00Z",
            "weather": "sunny",
            "temperature": 95.0,
            "notes": "Hot.",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn log_summary_reports_failure_in_text() {
    let app = common::build_test_app();
    let summary = body_json(get(app, "/api/v1/projects/1/daily-logs/summary").await).await;
    assert_eq!(summary["data"]["logs"], 3);
    assert_eq!(summary["data"]["summary"], "Failed to generate AI summary.");

    let app = common::build_test_app();
    let empty = body_json(get(app, "/api/v1/projects/3/daily-logs/summary").await).await;
    assert_eq!(empty["data"]["summary"], "No logs to summarize.");
}

// ---------------------------------------------------------------------------
// RFIs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn answering_an_rfi_closes_the_question() {
    let app = common::build_test_app();

    let response = put_json_as(app.clone(), "/api/v1/rfis/2", 2, json!({ "answer": "Use the revised anchor detail." })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rfi = body_json(response).await["data"].clone();
    assert_eq!(rfi["status"], "answered");
    assert!(rfi["answered_at"].is_string());
    assert_eq!(latest_entry(app.clone(), 1).await["code"], "RFI_ANSWERED");

    let reopen = put_json_as(app, "/api/v1/rfis/2", 2, json!({ "status": "open" })).await;
    assert_eq!(reopen.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn created_rfi_starts_open() {
    let app = common::build_test_app();
    let response = post_json_as(
        app.clone(),
        "/api/v1/rfis",
        7,
        json!({ "project_id": 1, "subject": "Stair nosing", "question": "Which profile?" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["status"], "open");

    let entry = latest_entry(app, 1).await;
    assert_eq!(entry["code"], "RFI_CREATED");
    assert_eq!(entry["target"]["name"], "Stair nosing");
}

#[tokio::test]
async fn assignee_suggestion_must_name_a_team_member() {
    let app = common::build_test_app_with(common::canned("Diana (id 4) handles this."), ScanVerdict::Clean);
    let body = json!({ "question": "Who confirms the rebar spacing?" });
    let suggestion = body_json(post_json_as(app, "/api/v1/projects/1/rfis/suggest-assignee", 2, body.clone()).await).await;
    assert_eq!(suggestion["data"]["assignee_id"], 4);

    // User 5 belongs to another company.
    let app = common::build_test_app_with(common::canned("5"), ScanVerdict::Clean);
    let suggestion = body_json(post_json_as(app, "/api/v1/projects/1/rfis/suggest-assignee", 2, body.clone()).await).await;
    assert!(suggestion["data"]["assignee_id"].is_null());

    let app = common::build_test_app();
    let suggestion = body_json(post_json_as(app, "/api/v1/projects/1/rfis/suggest-assignee", 2, body).await).await;
    assert!(suggestion["data"]["assignee_id"].is_null());
}

// ---------------------------------------------------------------------------
// Equipment and resources
// ---------------------------------------------------------------------------

#[tokio::test]
async fn equipment_assignment_round_trip() {
    let app = common::build_test_app();

    let response = put_json_as(app.clone(), "/api/v1/equipment/2/assignment", 2, json!({ "project_id": 1 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let item = body_json(response).await["data"].clone();
    assert_eq!(item["status"], "in_use");
    assert_eq!(item["project_id"], 1);
    assert_eq!(latest_entry(app.clone(), 1).await["code"], "EQUIPMENT_ASSIGNED");

    let response = delete_as(app.clone(), "/api/v1/equipment/2/assignment", 2).await;
    assert_eq!(response.status(), StatusCode::OK);
    let item = body_json(response).await["data"].clone();
    assert_eq!(item["status"], "available");
    assert!(item["project_id"].is_null());
    assert_eq!(latest_entry(app.clone(), 1).await["code"], "EQUIPMENT_UNASSIGNED");

    let again = delete_as(app, "/api/v1/equipment/2/assignment", 2).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn equipment_status_is_audited_against_its_project() {
    let app = common::build_test_app();
    let response = put_json_as(app.clone(), "/api/v1/equipment/1/status", 2, json!({ "status": "maintenance" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let entry = latest_entry(app, 1).await;
    assert_eq!(entry["code"], "EQUIPMENT_STATUS_UPDATED");
    assert!(entry["target"]["name"].as_str().unwrap().ends_with(" to Maintenance"));
}

#[tokio::test]
async fn company_equipment_is_scoped() {
    let app = common::build_test_app();
    let items = body_json(get(app, "/api/v1/companies/2/equipment").await).await;
    let ids: Vec<i64> = items["data"].as_array().unwrap().iter().map(|e| e["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![5]);
}

#[tokio::test]
async fn resource_schedule_create_and_remove() {
    let app = common::build_test_app();

    let response = post_json_as(
        app.clone(),
        "/api/v1/resource-assignments",
        2,
        json!({
            "resource_id": 2,
            "resource_type": "equipment",
            "project_id": 1,
            "start_date": "2026-11-02T00:00:00Z",
            "end_date": "2026-11-06T00:00:00Z",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    assert_eq!(latest_entry(app.clone(), 1).await["target"]["name"], "equipment #2");

    let response = delete_as(app.clone(), &format!("/api/v1/resource-assignments/{id}"), 2).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        latest_entry(app.clone(), 1).await["target"]["name"],
        format!("Assignment #{id} removed")
    );

    let missing = delete_as(app, &format!("/api/v1/resource-assignments/{id}"), 2).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inverted_schedule_window_is_rejected() {
    let app = common::build_test_app();
    let response = post_json_as(
        app,
        "/api/v1/resource-assignments",
        2,
        json!({
            "resource_id": 3,
            "resource_type": "user",
            "project_id": 1,
            "start_date": "2026-11-06T00:00:00Z",
            "end_date": "2026-11-02T00:00:00Z",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
