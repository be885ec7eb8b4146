//! Upload runs against mocked token and sink services
//!
//! Covers send order across kinds, request bodies, abort on the first
//! rejected request, and failures that must stop the run before dispatch.

mod common;

use chrono::NaiveDate;
use common::*;
use p6_cli::dispatch::DISPATCH_PLAN;
use p6_cli::progress::ProgressReporter;
use p6_cli::{CliError, Config, Session};
use p6_common::{EntityKind, UploadDate};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn upload_date() -> UploadDate {
    UploadDate::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
}

fn config(server: &MockServer, chunk_size: usize) -> Config {
    Config {
        sink_url: Some(format!("{}/api", server.uri())),
        token_url: format!("{}/token", server.uri()),
        chunk_size,
        ..Config::default()
    }
}

async fn bodies_for(server: &MockServer, sink_path: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == sink_path)
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn test_upload_sends_kinds_in_dependency_order() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    for sink_path in SINK_PATHS {
        Mock::given(method("POST"))
            .and(path(format!("/api{sink_path}")))
            .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "export.xml", SAMPLE_EXPORT);
    let mut progress = ProgressReporter::new(DISPATCH_PLAN.len());

    let summary = Session::new()
        .upload(&file, upload_date(), &config(&server, 500), &mut progress)
        .await
        .unwrap();

    assert_eq!(
        request_paths(&server).await,
        vec![
            "/token",
            "/api/p6calendars",
            "/api/p6resources",
            "/api/projects",
            "/api/p6wbsstagingroots",
            "/api/p6activityroots",
            "/api/p6resourceassignmentroots",
        ]
    );
    assert_eq!(summary.total_requests(), 6);
    assert_eq!(summary.total_dropped(), 1);
    assert_eq!(progress.percent(), 100);
}

#[tokio::test]
async fn test_upload_request_bodies() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "export.xml", SAMPLE_EXPORT);
    let mut progress = ProgressReporter::new(DISPATCH_PLAN.len());
    Session::new()
        .upload(&file, upload_date(), &config(&server, 500), &mut progress)
        .await
        .unwrap();

    let calendars = bodies_for(&server, "/api/p6calendars").await;
    assert_eq!(calendars.len(), 1);
    let rules = calendars[0]["calendars"].as_array().unwrap();
    assert_eq!(rules.len(), 4);
    assert_eq!(rules[0]["CalendarName"], json!("Standard 5 Day Workweek"));
    assert_eq!(rules[0]["UploadDate"], json!("2024-06-01"));

    // Project goes out bare, one record per request
    let projects = bodies_for(&server, "/api/projects").await;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["objectId"], json!(4500));
    assert_eq!(projects[0]["dataDate"], json!("2024-05-06"));

    // The blank-code WBS is dropped
    let wbs = bodies_for(&server, "/api/p6wbsstagingroots").await;
    let wbss = wbs[0]["wbss"].as_array().unwrap();
    assert_eq!(wbss.len(), 1);
    assert_eq!(wbss[0]["Code"], json!("1.1"));

    let activities = bodies_for(&server, "/api/p6activityroots").await;
    let sources: Vec<_> = activities[0]["activitys"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| (a["objectId"].clone(), a["recordSource"].clone()))
        .collect();
    assert_eq!(
        sources,
        vec![
            (json!(5000), json!("Current")),
            (json!(5001), json!("Current")),
            (json!(5100), json!("Baseline")),
        ]
    );

    let assignments = bodies_for(&server, "/api/p6resourceassignmentroots").await;
    let assignment = &assignments[0]["resourceassignments"][0];
    assert_eq!(assignment["GUID"], json!("0A1B2C3D-4E5F-4A6B-8C7D-9E0F1A2B3C4D"));
}

#[tokio::test]
async fn test_second_chunk_failure_aborts_run() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    for sink_path in ["/p6calendars", "/p6resources", "/projects", "/p6wbsstagingroots"] {
        Mock::given(method("POST"))
            .and(path(format!("/api{sink_path}")))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/api/p6activityroots"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/p6activityroots"))
        .respond_with(ResponseTemplate::new(500).set_body_string("activity 5001 rejected"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/p6resourceassignmentroots"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "export.xml", SAMPLE_EXPORT);
    let mut progress = ProgressReporter::new(DISPATCH_PLAN.len());

    // Chunk size 1 makes three activity requests
    let err = Session::new()
        .upload(&file, upload_date(), &config(&server, 1), &mut progress)
        .await
        .unwrap_err();

    match err {
        CliError::Dispatch {
            kind,
            chunk,
            total_chunks,
            status,
            ref body,
        } => {
            assert_eq!(kind, EntityKind::Activity);
            assert_eq!((chunk, total_chunks, status), (2, 3, 500));
            assert_eq!(body, "activity 5001 rejected");
        },
        other => panic!("expected dispatch error, got {other:?}"),
    }

    let activity_requests = request_paths(&server)
        .await
        .into_iter()
        .filter(|p| p == "/api/p6activityroots")
        .count();
    assert_eq!(activity_requests, 2);
    assert!(progress.is_frozen());
    assert!(progress.percent() < 100);
}

#[tokio::test]
async fn test_token_failure_stops_before_dispatch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "export.xml", SAMPLE_EXPORT);
    let mut progress = ProgressReporter::new(DISPATCH_PLAN.len());

    let err = Session::new()
        .upload(&file, upload_date(), &config(&server, 500), &mut progress)
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::Auth(ref msg) if msg.contains("401") && msg.contains("invalid_client")));
    assert_eq!(request_paths(&server).await, vec!["/token"]);
    assert_eq!(progress.percent(), 20);
}

#[tokio::test]
async fn test_parse_failure_contacts_no_service() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "broken.xml", MALFORMED_EXPORT);
    let mut progress = ProgressReporter::new(DISPATCH_PLAN.len());

    let err = Session::new()
        .upload(&file, upload_date(), &config(&server, 500), &mut progress)
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::Parse(_)));
    assert!(request_paths(&server).await.is_empty());
}

#[tokio::test]
async fn test_empty_stages_send_nothing() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/p6resources"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "resources.xml", RESOURCES_ONLY);
    let mut progress = ProgressReporter::new(DISPATCH_PLAN.len());

    let summary = Session::new()
        .upload(&file, upload_date(), &config(&server, 500), &mut progress)
        .await
        .unwrap();

    assert_eq!(request_paths(&server).await, vec!["/token", "/api/p6resources"]);
    assert_eq!(summary.total_requests(), 1);
    assert_eq!(progress.percent(), 100);
}

#[tokio::test]
async fn test_session_is_reusable_across_runs() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_sink_under(&server, "/api").await;

    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "resources.xml", RESOURCES_ONLY);
    let session = Session::new();

    for _ in 0..2 {
        let mut progress = ProgressReporter::new(DISPATCH_PLAN.len());
        session
            .upload(&file, upload_date(), &config(&server, 500), &mut progress)
            .await
            .unwrap();
    }

    let resource_requests = request_paths(&server)
        .await
        .into_iter()
        .filter(|p| p == "/api/p6resources")
        .count();
    assert_eq!(resource_requests, 2);
}
