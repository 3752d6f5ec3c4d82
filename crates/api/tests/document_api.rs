//! Integration tests for the document pipeline, lineages, links and
//! document-grounded AI.

mod common;

use axum::http::StatusCode;
use groundwork_assist::{OfflineGenerator, ScanVerdict};
use groundwork_core::upload::MAX_UPLOAD_BYTES;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use common::{body_json, body_text, delete_as, get, post_as, post_json_as};

async fn initiate(app: axum::Router, name: &str) -> serde_json::Value {
    let response = post_json_as(
        app,
        "/api/v1/documents",
        2,
        json!({ "name": name, "project_id": 1, "category": "blueprint" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Upload pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn initiated_upload_starts_a_new_lineage() {
    let app = common::build_test_app();
    let doc = initiate(app, "Crane Lift Plan.pdf").await;

    assert_eq!(doc["status"], "uploading");
    assert_eq!(doc["version"], 1);
    assert_eq!(doc["document_group_id"], doc["id"]);
    assert_eq!(doc["creator_id"], 2);
}

#[tokio::test]
async fn reused_name_becomes_the_next_version() {
    let app = common::build_test_app();
    let doc = initiate(app, "Building Blueprints Rev C.png").await;

    assert_eq!(doc["document_group_id"], 2);
    assert_eq!(doc["version"], 4);
}

#[tokio::test]
async fn chunked_upload_streams_progress_then_completes() {
    let app = common::build_test_app();
    let doc = initiate(app.clone(), "Survey.pdf").await;
    let id = doc["id"].as_i64().unwrap();

    // 2.5 MiB -> three chunks.
    let response = post_json_as(
        app,
        &format!("/api/v1/documents/{id}/upload"),
        2,
        json!({ "file_size_bytes": 2_621_440 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let body = body_text(response).await;
    assert_eq!(body.matches("event: progress").count(), 3);
    assert!(body.contains("\"total_chunks\":3"));
    assert!(body.contains("\"progress\":100.0"));
    let complete = body.find("event: complete").expect("complete event");
    assert!(complete > body.rfind("event: progress").unwrap());
    assert!(body.contains("data: {\"success\":true}"));
}

#[tokio::test]
async fn upload_of_an_approved_document_is_a_conflict() {
    let app = common::build_test_app();
    let response = post_json_as(
        app,
        "/api/v1/documents/1/upload",
        2,
        json!({ "file_size_bytes": 1024 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn clean_scan_approves_indexes_and_audits() {
    let app = common::build_test_app();
    let doc = initiate(app.clone(), "Survey.pdf").await;
    let id = doc["id"].as_i64().unwrap();

    let response = post_as(app.clone(), &format!("/api/v1/documents/{id}/finalize"), 2).await;
    assert_eq!(response.status(), StatusCode::OK);
    let finalized = body_json(response).await["data"].clone();
    assert_eq!(finalized["status"], "approved");
    // The assistant is offline, so the placeholder index text is used.
    assert_eq!(
        finalized["indexed_content"],
        "Content indexing for Survey.pdf. Category: Blueprint / Drawing."
    );
    assert_eq!(finalized["url"], groundwork_core::document::SAMPLE_PDF_URL);

    let feed = body_json(get(app, "/api/v1/projects/1/audit-logs").await).await;
    let latest = &feed["data"][0];
    assert_eq!(latest["code"], "DOCUMENT_UPLOADED");
    assert_eq!(latest["target"]["name"], "Survey.pdf");
}

#[tokio::test]
async fn infected_scan_quarantines_without_audit() {
    let app = common::build_test_app_with(Arc::new(OfflineGenerator), ScanVerdict::Infected);
    let doc = initiate(app.clone(), "invoice.exe.pdf").await;
    let id = doc["id"].as_i64().unwrap();

    let finalized = body_json(post_as(app.clone(), &format!("/api/v1/documents/{id}/finalize"), 2).await).await;
    assert_eq!(finalized["data"]["status"], "quarantined");

    let feed = body_json(get(app, "/api/v1/projects/1/audit-logs").await).await;
    assert_ne!(feed["data"][0]["code"], "DOCUMENT_UPLOADED");
}

#[tokio::test]
async fn dropped_finalize_request_still_settles_the_scan() {
    let scanner = Arc::new(common::SlowScanner {
        delay: Duration::from_millis(300),
    });
    let app = common::build_test_app_with_scanner(Arc::new(OfflineGenerator), scanner);
    let doc = initiate(app.clone(), "Slow Survey.pdf").await;
    let id = doc["id"].as_i64().unwrap();

    let finalize_uri = format!("/api/v1/documents/{id}/finalize");
    let finalize = post_as(app.clone(), &finalize_uri, 2);
    let outcome = tokio::time::timeout(Duration::from_millis(50), finalize).await;
    assert!(outcome.is_err(), "finalize should still be scanning");

    let midway = body_json(get(app.clone(), &format!("/api/v1/documents/{id}")).await).await;
    assert_eq!(midway["data"]["status"], "scanning");

    tokio::time::sleep(Duration::from_millis(600)).await;

    let settled = body_json(get(app.clone(), &format!("/api/v1/documents/{id}")).await).await;
    assert_eq!(settled["data"]["status"], "approved");
    let feed = body_json(get(app, "/api/v1/projects/1/audit-logs").await).await;
    assert_eq!(feed["data"][0]["code"], "DOCUMENT_UPLOADED");
    assert_eq!(feed["data"][0]["target"]["name"], "Slow Survey.pdf");
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = common::build_test_app();
    let doc = initiate(app.clone(), "Point Cloud.e57").await;
    let id = doc["id"].as_i64().unwrap();

    let response = post_json_as(
        app.clone(),
        &format!("/api/v1/documents/{id}/upload"),
        2,
        json!({ "file_size_bytes": MAX_UPLOAD_BYTES + 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    // Still waiting for its bytes.
    let current = body_json(get(app, &format!("/api/v1/documents/{id}")).await).await;
    assert_eq!(current["data"]["status"], "uploading");
}

#[tokio::test]
async fn only_unfinished_uploads_can_be_aborted() {
    let app = common::build_test_app();
    let doc = initiate(app.clone(), "Draft.pdf").await;
    let id = doc["id"].as_i64().unwrap();

    let response = delete_as(app.clone(), &format!("/api/v1/documents/{id}"), 2).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(app.clone(), &format!("/api/v1/documents/{id}")).await.status(), StatusCode::NOT_FOUND);

    let approved = delete_as(app, "/api/v1/documents/1", 2).await;
    assert_eq!(approved.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Versions and links
// ---------------------------------------------------------------------------

#[tokio::test]
async fn revert_creates_a_new_top_version() {
    let app = common::build_test_app();

    let response = post_as(app.clone(), "/api/v1/documents/7/revert", 2).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let reverted = body_json(response).await["data"].clone();
    assert_eq!(reverted["version"], 4);
    assert_eq!(reverted["status"], "approved");
    assert_eq!(reverted["name"], "Building Blueprints Rev A.png");

    let history = body_json(get(app.clone(), "/api/v1/document-groups/2/versions").await).await;
    let versions: Vec<i64> = history["data"]["versions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["version"].as_i64().unwrap())
        .collect();
    assert_eq!(versions, vec![4, 3, 2, 1]);
    assert_eq!(history["data"]["latest"]["id"], reverted["id"]);

    let feed = body_json(get(app, "/api/v1/projects/1/audit-logs").await).await;
    assert_eq!(feed["data"][0]["code"], "DOCUMENT_VERSION_REVERTED");
    assert_eq!(
        feed["data"][0]["target"]["name"],
        "Building Blueprints Rev A.png (reverted to v1)"
    );
}

#[tokio::test]
async fn links_are_symmetric_and_removable() {
    let app = common::build_test_app();

    let linked = body_json(
        post_json_as(app.clone(), "/api/v1/documents/3/links", 2, json!({ "target_id": 2 })).await,
    )
    .await;
    assert!(linked["data"]["related_document_ids"]
        .as_array()
        .unwrap()
        .contains(&json!(2)));

    let target = body_json(get(app.clone(), "/api/v1/documents/2").await).await;
    assert!(target["data"]["related_document_ids"]
        .as_array()
        .unwrap()
        .contains(&json!(3)));

    let feed = body_json(get(app.clone(), "/api/v1/projects/1/audit-logs").await).await;
    assert_eq!(feed["data"][0]["code"], "DOCUMENT_LINK_ADDED");
    assert_eq!(
        feed["data"][0]["target"]["name"],
        "'Unsupported File.docx' to 'Building Blueprints Rev C.png'"
    );

    let response = delete_as(app.clone(), "/api/v1/documents/3/links/2", 2).await;
    assert_eq!(response.status(), StatusCode::OK);
    let target = body_json(get(app, "/api/v1/documents/2").await).await;
    assert!(!target["data"]["related_document_ids"]
        .as_array()
        .unwrap()
        .contains(&json!(3)));
}

#[tokio::test]
async fn self_link_is_rejected() {
    let app = common::build_test_app();
    let response = post_json_as(app, "/api/v1/documents/1/links", 2, json!({ "target_id": 1 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn link_suggestions_keep_only_candidates() {
    let app = common::build_test_app_with(
        common::canned(r#"{"suggested_ids": [2, 4, 999, 2]}"#),
        ScanVerdict::Clean,
    );
    let response = get(app, "/api/v1/documents/3/link-suggestions").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Document 4 belongs to another project and 999 does not exist.
    let json = body_json(response).await;
    assert_eq!(json["data"]["suggested_ids"], json!([2]));
}

#[tokio::test]
async fn acknowledgement_is_recorded_for_the_actor() {
    let app = common::build_test_app();

    let response = post_as(app.clone(), "/api/v1/documents/2/acknowledge", 4).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let ack = body_json(response).await["data"].clone();
    assert_eq!(ack["user_id"], 4);
    assert_eq!(ack["document_id"], 2);

    let acks = body_json(get(app, "/api/v1/users/4/acknowledgements").await).await;
    assert!(acks["data"].as_array().unwrap().iter().any(|a| a["document_id"] == 2));
}

// ---------------------------------------------------------------------------
// Document AI
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ask_answers_from_indexed_content_and_audits() {
    let app = common::build_test_app_with(
        common::canned("Hard hats are required in all zones."),
        ScanVerdict::Clean,
    );

    let response = post_json_as(
        app.clone(),
        "/api/v1/documents/1/ask",
        3,
        json!({ "question": "Where are hard hats required?" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["answer"], "Hard hats are required in all zones.");

    let feed = body_json(get(app, "/api/v1/projects/1/audit-logs").await).await;
    assert_eq!(feed["data"][0]["code"], "DOCUMENT_AI_QUERY");
    assert_eq!(feed["data"][0]["target"]["name"], "on \"Safety Manual v1.2.pdf\"");
}

#[tokio::test]
async fn ask_on_a_quarantined_document_is_a_conflict() {
    let app = common::build_test_app_with(common::canned("unused"), ScanVerdict::Clean);
    let response = post_json_as(
        app,
        "/api/v1/documents/5/ask",
        3,
        json!({ "question": "What changed?" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn ask_without_a_provider_fails_with_generic_message() {
    let app = common::build_test_app();
    let response = post_json_as(
        app,
        "/api/v1/documents/1/ask",
        3,
        json!({ "question": "Anything?" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["error"],
        groundwork_api::error::ASSISTANT_FAILED
    );
}

#[tokio::test]
async fn search_drops_unknown_sources_and_audits_without_project() {
    let app = common::build_test_app_with(
        common::canned(
            r#"{"summary": "Fire exits are on every level.",
                "sources": [{"document_id": 1, "snippet": "fire exits"},
                            {"document_id": 42, "snippet": "invented"}]}"#,
        ),
        ScanVerdict::Clean,
    );

    let response = post_json_as(
        app.clone(),
        "/api/v1/documents/search",
        2,
        json!({ "query": "Where are the fire exits on the tower site?", "project_ids": [1] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["summary"], "Fire exits are on every level.");
    assert_eq!(json["data"]["sources"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["sources"][0]["document_id"], 1);

    // Search entries carry no project, so they stay out of project feeds.
    let feed = body_json(get(app, "/api/v1/projects/1/audit-logs").await).await;
    assert_ne!(feed["data"][0]["code"], "AI_PROJECT_SEARCH");
}

#[tokio::test]
async fn search_with_nothing_indexed_returns_no_results() {
    let app = common::build_test_app();
    let response = post_json_as(
        app,
        "/api/v1/documents/search",
        2,
        json!({ "query": "anything", "project_ids": [3] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["sources"].as_array().unwrap().is_empty());
}
