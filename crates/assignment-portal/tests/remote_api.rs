use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use assignment_portal::config::RemoteApiConfig;
use assignment_portal::submission::{
    ApiError, AssignmentForm, CandidateLevelOptions, CandidatesApi, HttpCandidatesApi,
    SubmissionDraft, SubmitOutcome, FALLBACK_SUBMISSION_ERROR,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

type Received = Arc<Mutex<Vec<Value>>>;

const BROKEN_PAGE: &str = "<html><body>upstream exploded</body></html>";

/// Serves the candidates endpoints below `/{scenario}/`, so each test picks
/// the remote behaviour through its base URL.
async fn spawn_remote() -> (SocketAddr, Received) {
    let received = Received::default();
    let router = Router::new()
        .route("/{scenario}/api/tools/candidates/levels", get(levels))
        .route("/{scenario}/api/tools/candidates/assignments", post(assignments))
        .with_state(received.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("remote stub serves");
    });
    (addr, received)
}

async fn levels(Path(scenario): Path<String>) -> Response {
    match scenario.as_str() {
        "malformed" => Json(json!({ "levels": "nope" })).into_response(),
        "failing" => (StatusCode::INTERNAL_SERVER_ERROR, Html(BROKEN_PAGE)).into_response(),
        _ => Json(json!({ "levels": ["Middle", "Junior"] })).into_response(),
    }
}

async fn assignments(
    Path(scenario): Path<String>,
    State(received): State<Received>,
    Json(body): Json<Value>,
) -> Response {
    received.lock().expect("received mutex").push(body);
    match scenario.as_str() {
        "rejecting" => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": ["A", "B"] })),
        )
            .into_response(),
        "failing" => (StatusCode::INTERNAL_SERVER_ERROR, Html(BROKEN_PAGE)).into_response(),
        _ => StatusCode::CREATED.into_response(),
    }
}

fn client(addr: SocketAddr, scenario: &str) -> Arc<HttpCandidatesApi> {
    let config =
        RemoteApiConfig::parse(&format!("http://{addr}/{scenario}")).expect("valid base url");
    Arc::new(HttpCandidatesApi::new(&config).expect("client builds"))
}

fn valid_draft() -> SubmissionDraft {
    SubmissionDraft {
        name: "Grace".into(),
        email: "grace@example.com".into(),
        assignment_description: "Compiled the first program to machine code".into(),
        github_repo_url: "https://github.com/grace/compiler".into(),
        candidate_level: "Middle".into(),
    }
}

async fn submitted_through(api: Arc<HttpCandidatesApi>) -> SubmitOutcome {
    let form = AssignmentForm::with_draft(api, valid_draft());
    form.mount().await;
    form.submit().await
}

#[tokio::test]
async fn levels_keep_server_order() {
    let (addr, _) = spawn_remote().await;
    let api = client(addr, "ok");

    let form = AssignmentForm::new(api);
    assert_eq!(
        form.mount().await,
        &CandidateLevelOptions::Loaded(vec!["Middle".into(), "Junior".into()])
    );
}

#[tokio::test]
async fn malformed_levels_payload_makes_options_unavailable() {
    let (addr, _) = spawn_remote().await;
    let api = client(addr, "malformed");

    assert!(matches!(api.fetch_levels().await, Err(ApiError::Decode(_))));

    let form = AssignmentForm::new(api);
    assert!(form.mount().await.is_unavailable());
}

#[tokio::test]
async fn failing_levels_status_makes_options_unavailable() {
    let (addr, _) = spawn_remote().await;
    let api = client(addr, "failing");

    let err = api.fetch_levels().await.expect_err("500 is a failure");
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));

    let form = AssignmentForm::new(api);
    assert!(form.mount().await.is_unavailable());
}

#[tokio::test]
async fn write_body_is_exactly_the_draft() {
    let (addr, received) = spawn_remote().await;

    let outcome = submitted_through(client(addr, "ok")).await;

    assert!(matches!(outcome, SubmitOutcome::Submitted { .. }));
    let received = received.lock().expect("received mutex").clone();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0],
        serde_json::to_value(valid_draft()).expect("draft serializes")
    );
    let fields = received[0].as_object().expect("json object");
    assert_eq!(fields.len(), 5);
    assert_eq!(fields["github_repo_url"], "https://github.com/grace/compiler");
}

#[tokio::test]
async fn rejection_body_errors_become_the_banner() {
    let (addr, received) = spawn_remote().await;

    let outcome = submitted_through(client(addr, "rejecting")).await;

    assert_eq!(outcome, SubmitOutcome::Rejected("A".into()));
    assert_eq!(received.lock().expect("received mutex").len(), 1);
}

#[tokio::test]
async fn non_json_failure_body_uses_fallback_message() {
    let (addr, received) = spawn_remote().await;

    let outcome = submitted_through(client(addr, "failing")).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(FALLBACK_SUBMISSION_ERROR.into())
    );
    assert_eq!(received.lock().expect("received mutex").len(), 1);
}
