//! Integration tests for projects, teams, assessments, settings and the
//! audit feed.

mod common;

use axum::http::StatusCode;
use groundwork_assist::ScanVerdict;
use serde_json::json;

use common::{body_json, delete_as, get, post_json_as, put_json_as};

#[tokio::test]
async fn team_assignment_is_idempotent() {
    let app = common::build_test_app();

    let response = put_json_as(app.clone(), "/api/v1/projects/2/members/4", 2, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let feed = body_json(get(app.clone(), "/api/v1/projects/2/audit-logs").await).await;
    let count = feed["data"].as_array().unwrap().len();
    assert_eq!(feed["data"][0]["code"], "USER_ASSIGNED");
    assert_eq!(feed["data"][0]["target"]["name"], "Diana Operator");

    put_json_as(app.clone(), "/api/v1/projects/2/members/4", 2, json!({})).await;
    let feed = body_json(get(app.clone(), "/api/v1/projects/2/audit-logs").await).await;
    assert_eq!(feed["data"].as_array().unwrap().len(), count);

    let members = body_json(get(app, "/api/v1/projects/2/members").await).await;
    assert!(members["data"].as_array().unwrap().iter().any(|u| u["id"] == 4));
}

#[tokio::test]
async fn removed_member_becomes_assignable() {
    let app = common::build_test_app();

    let response = delete_as(app.clone(), "/api/v1/projects/1/members/4", 2).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let feed = body_json(get(app.clone(), "/api/v1/projects/1/audit-logs").await).await;
    assert_eq!(feed["data"][0]["code"], "USER_UNASSIGNED");

    let unassigned = body_json(get(app, "/api/v1/projects/1/unassigned-users").await).await;
    let ids: Vec<i64> = unassigned["data"].as_array().unwrap().iter().map(|u| u["id"].as_i64().unwrap()).collect();
    assert!(ids.contains(&4));
    assert!(!ids.contains(&3));
    assert!(!ids.contains(&5));
}

#[tokio::test]
async fn manager_change_names_both_managers() {
    let app = common::build_test_app();

    let response = put_json_as(app.clone(), "/api/v1/projects/1", 1, json!({ "manager_id": 7 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["manager_id"], 7);

    let feed = body_json(get(app.clone(), "/api/v1/projects/1/audit-logs").await).await;
    let entry = &feed["data"][0];
    assert_eq!(entry["code"], "PROJECT_MANAGER_CHANGED");
    assert_eq!(entry["target"]["name"], "from Bob Manager to Gary Foreman");
    let count = feed["data"].as_array().unwrap().len();

    // Same manager again: nothing to record.
    put_json_as(app.clone(), "/api/v1/projects/1", 1, json!({ "manager_id": 7 })).await;
    let feed = body_json(get(app, "/api/v1/projects/1/audit-logs").await).await;
    assert_eq!(feed["data"].as_array().unwrap().len(), count);
}

#[tokio::test]
async fn health_report_falls_back_without_a_provider() {
    let app = common::build_test_app();

    let response = get(app, "/api/v1/projects/1/health-report").await;
    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await["data"].clone();
    assert_eq!(health["project_name"], "Downtown Tower Foundation");
    assert_eq!(health["report"]["score"], 50);
    assert_eq!(health["report"]["summary"], "AI analysis unavailable. Manual review required.");
}

#[tokio::test]
async fn company_health_covers_every_project() {
    let app = common::build_test_app_with(
        common::canned(r#"{"score": 140, "summary": "On track.", "risks": [], "positives": ["Safety culture"]}"#),
        ScanVerdict::Clean,
    );
    let reports = body_json(get(app, "/api/v1/companies/1/health-reports").await).await;
    let reports = reports["data"].as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r["report"]["score"] == 100));
}

#[tokio::test]
async fn cost_estimate_totals_the_items() {
    let app = common::build_test_app_with(
        common::canned(
            r#"```json
            [{"category": "Materials", "item": "Rebar", "quantity": "4 t", "unitCost": 900.0, "totalCost": 3600.0},
             {"category": "Labor", "item": "Fixers", "quantity": "3 days", "unit_cost": 800.0, "total_cost": 2400.0}]
            ```"#,
        ),
        ScanVerdict::Clean,
    );

    let response = post_json_as(app.clone(), "/api/v1/projects/1/cost-estimate", 2, json!({ "scope": "Ground floor slab" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let estimate = body_json(response).await["data"].clone();
    assert_eq!(estimate["items"].as_array().unwrap().len(), 2);
    assert_eq!(estimate["total_cost"], 6000.0);

    let feed = body_json(get(app, "/api/v1/projects/1/audit-logs").await).await;
    assert_eq!(feed["data"][0]["code"], "COST_ESTIMATE_GENERATED");
}

#[tokio::test]
async fn cost_estimate_requires_a_scope() {
    let app = common::build_test_app();
    let response = post_json_as(app, "/api/v1/projects/1/cost-estimate", 2, json!({ "scope": " " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn project_creation_requires_a_known_site() {
    let app = common::build_test_app();

    let response = post_json_as(
        app.clone(),
        "/api/v1/projects",
        1,
        json!({ "name": "Riverside Annex", "site_id": 1, "company_id": 1, "manager_id": 2 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["name"], "Riverside Annex");

    let missing = post_json_as(
        app,
        "/api/v1/projects",
        1,
        json!({ "name": "Nowhere", "site_id": 999, "company_id": 1, "manager_id": 2 }),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn settings_patch_merges_preferences() {
    let app = common::build_test_app();

    let response = put_json_as(
        app.clone(),
        "/api/v1/companies/1/settings",
        1,
        json!({ "theme": "dark", "notification_preferences": { "timesheet_flagged": true } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let settings = body_json(response).await["data"].clone();
    assert_eq!(settings["theme"], "dark");
    assert_eq!(settings["timesheet_retention_days"], 90);
    assert_eq!(settings["notification_preferences"]["timesheet_flagged"], true);
    assert_eq!(settings["notification_preferences"]["task_due_date"], true);

    let invalid = put_json_as(app, "/api/v1/companies/1/settings", 1, json!({ "timesheet_retention_days": 0 })).await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn company_activity_honours_the_limit() {
    let app = common::build_test_app();
    let feed = body_json(get(app, "/api/v1/companies/1/activity?limit=3").await).await;
    assert_eq!(feed["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn chain_stays_valid_after_mutations() {
    let app = common::build_test_app();

    put_json_as(app.clone(), "/api/v1/projects/2/members/4", 2, json!({})).await;
    put_json_as(app.clone(), "/api/v1/equipment/2/assignment", 2, json!({ "project_id": 1 })).await;
    post_json_as(app.clone(), "/api/v1/todos", 2, json!({ "text": "Check hoardings", "project_id": 1 })).await;

    let response = get(app, "/api/v1/audit-logs/verify").await;
    assert_eq!(response.status(), StatusCode::OK);
    let result = body_json(response).await["data"].clone();
    assert_eq!(result["chain_valid"], true);
    assert!(result["first_break"].is_null());
    assert_eq!(result["verified_entries"], 12);
}
