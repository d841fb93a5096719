use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Json;
use serde_json::{Value, json};
use vt_client::{ClientConfig, ClientError, HttpJobClient, JobApi, Orchestrator};
use vt_core::encoder::encode;
use vt_core::{JobState, TryOnError};

#[derive(Clone)]
enum SubmitMode {
    Async,
    RejectAsync,
    Fail(u16, String),
}

struct MockState {
    mode: SubmitMode,
    statuses: Mutex<VecDeque<Value>>,
    posts: Mutex<Vec<Value>>,
    polled: Mutex<Vec<String>>,
    sync_body: Value,
    delay: Duration,
}

impl MockState {
    fn new(mode: SubmitMode) -> Self {
        Self {
            mode,
            statuses: Mutex::new(VecDeque::new()),
            posts: Mutex::new(Vec::new()),
            polled: Mutex::new(Vec::new()),
            sync_body: json!({
                "message": "Image processed successfully",
                "imageUrl": "https://results.example.com/sync.png",
            }),
            delay: Duration::ZERO,
        }
    }

    fn with_statuses(self, statuses: Vec<Value>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    fn with_sync_body(mut self, body: Value) -> Self {
        self.sync_body = body;
        self
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

async fn submit(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.posts.lock().unwrap().push(body.clone());
    let async_mode = body["async"].as_bool().unwrap_or(false);

    match (&state.mode, async_mode) {
        (SubmitMode::Fail(status, body), _) => (
            StatusCode::from_u16(*status).unwrap(),
            body.clone(),
        )
            .into_response(),
        (SubmitMode::RejectAsync, true) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "async mode is not supported" })),
        )
            .into_response(),
        (SubmitMode::Async, true) => Json(json!({
            "jobId": "job-42",
            "status": "processing",
            "message": "Processing started",
        }))
        .into_response(),
        (_, false) => {
            tokio::time::sleep(state.delay).await;
            Json(state.sync_body.clone()).into_response()
        }
    }
}

async fn status(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let job_id = params.get("jobId").cloned().unwrap_or_default();
    state.polled.lock().unwrap().push(job_id.clone());
    tokio::time::sleep(state.delay).await;

    let next = state.statuses.lock().unwrap().pop_front();
    match next {
        Some(status) => Json(status).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Job {} not found", job_id) })),
        )
            .into_response(),
    }
}

struct TestServer {
    endpoint: String,
    state: Arc<MockState>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(state: MockState) -> Self {
        let state = Arc::new(state);
        let app = Router::new()
            .route("/tryon", post(submit).get(status))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let endpoint = format!("http://{}/tryon", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint,
            state,
            handle,
        }
    }

    fn config(&self) -> ClientConfig {
        ClientConfig {
            poll_interval: Duration::from_millis(10),
            ..ClientConfig::new(self.endpoint.clone())
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn images() -> (vt_core::EncodedImage, vt_core::EncodedImage) {
    (
        encode(b"user photo bytes", "image/jpeg"),
        encode(b"outfit photo bytes", "image/png"),
    )
}

#[tokio::test]
async fn async_job_is_polled_to_completion() {
    let server = TestServer::spawn(MockState::new(SubmitMode::Async).with_statuses(vec![
        json!({ "jobId": "job-42", "status": "processing", "progress": 30 }),
        json!({ "jobId": "job-42", "status": "processing", "progress": 70 }),
        json!({ "jobId": "job-42", "status": "completed", "imageUrl": "https://results.example.com/42.png" }),
    ]))
    .await;

    let orchestrator = Orchestrator::http(server.config()).unwrap();
    let seen = Mutex::new(Vec::new());
    let sink = |p: f32| seen.lock().unwrap().push(p);
    let (user, outfit) = images();

    let result = orchestrator
        .process_encoded(&user, &outfit, Some(&sink))
        .await
        .unwrap();

    assert_eq!(result.image_url, "https://results.example.com/42.png");
    assert_eq!(*seen.lock().unwrap(), vec![30.0, 70.0]);
    assert_eq!(*server.state.polled.lock().unwrap(), vec!["job-42"; 3]);

    let posts = server.state.posts.lock().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["async"], json!(true));
    assert_eq!(posts[0]["saveToS3"], json!(true));
    assert_eq!(posts[0]["userImageBase64"], json!(user.base64_payload));
    assert_eq!(posts[0]["outfitImageMimeType"], json!("image/png"));
}

#[tokio::test]
async fn bad_request_falls_back_to_blocking_request() {
    let server = TestServer::spawn(MockState::new(SubmitMode::RejectAsync)).await;
    let orchestrator = Orchestrator::http(server.config()).unwrap();
    let (user, outfit) = images();

    let result = orchestrator
        .process_encoded(&user, &outfit, None)
        .await
        .unwrap();

    assert_eq!(result.image_url, "https://results.example.com/sync.png");
    assert_eq!(result.message, "Image processed successfully");
    assert!(server.state.polled.lock().unwrap().is_empty());

    let posts = server.state.posts.lock().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["async"], json!(true));
    assert_eq!(posts[1]["async"], json!(false));
    assert_eq!(posts[1]["userImageBase64"], posts[0]["userImageBase64"]);
}

#[tokio::test]
async fn blocking_response_without_image_url_is_malformed() {
    for body in [json!({ "message": "ok" }), json!({ "message": "ok", "imageUrl": null })] {
        let server =
            TestServer::spawn(MockState::new(SubmitMode::RejectAsync).with_sync_body(body)).await;
        let orchestrator = Orchestrator::http(server.config()).unwrap();
        let (user, outfit) = images();

        let err = orchestrator
            .process_encoded(&user, &outfit, None)
            .await
            .unwrap_err();

        assert_eq!(err, TryOnError::malformed_completion());
        assert_eq!(server.state.posts.lock().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn submission_error_uses_body_message() {
    let server = TestServer::spawn(MockState::new(SubmitMode::Fail(
        500,
        r#"{"error":"Gemini quota exceeded"}"#.into(),
    )))
    .await;
    let orchestrator = Orchestrator::http(server.config()).unwrap();
    let (user, outfit) = images();

    let err = orchestrator
        .process_encoded(&user, &outfit, None)
        .await
        .unwrap_err();

    assert_eq!(err, TryOnError::Submission("Gemini quota exceeded".into()));
}

#[tokio::test]
async fn submission_error_without_body_uses_status() {
    let server = TestServer::spawn(MockState::new(SubmitMode::Fail(
        502,
        "upstream exploded".into(),
    )))
    .await;
    let client = HttpJobClient::new(server.config()).unwrap();
    let (user, outfit) = images();

    let err = client.submit(&user, &outfit).await.unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.to_string(), "Request failed with status code 502");
}

#[tokio::test]
async fn unknown_job_reports_remote_message() {
    let server = TestServer::spawn(MockState::new(SubmitMode::Async)).await;
    let client = HttpJobClient::new(server.config()).unwrap();

    let err = client.check_status("job-404").await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Http {
            status: 404,
            message: "Job job-404 not found".into()
        }
    );
}

#[tokio::test]
async fn status_is_decoded() {
    let server = TestServer::spawn(MockState::new(SubmitMode::Async).with_statuses(vec![json!({
        "jobId": "job-42",
        "status": "failed",
        "error": "bad pose",
    })]))
    .await;
    let client = HttpJobClient::new(server.config()).unwrap();

    let status = client.check_status("job-42").await.unwrap();

    assert_eq!(status.status, JobState::Failed);
    assert_eq!(status.error.as_deref(), Some("bad pose"));
    assert_eq!(status.image_url, None);
}

#[tokio::test]
async fn slow_status_check_times_out() {
    let server = TestServer::spawn(
        MockState::new(SubmitMode::Async)
            .with_statuses(vec![json!({ "jobId": "job-42", "status": "processing" })])
            .with_delay(Duration::from_millis(500)),
    )
    .await;
    let client = HttpJobClient::new(ClientConfig {
        status_timeout: Duration::from_millis(50),
        ..server.config()
    })
    .unwrap();

    let err = client.check_status("job-42").await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Network {
            message: "The request timed out".into(),
            timed_out: true
        }
    );
}

#[tokio::test]
async fn slow_blocking_request_suggests_smaller_images() {
    let server = TestServer::spawn(
        MockState::new(SubmitMode::RejectAsync).with_delay(Duration::from_millis(500)),
    )
    .await;
    let orchestrator = Orchestrator::http(ClientConfig {
        sync_timeout: Duration::from_millis(50),
        ..server.config()
    })
    .unwrap();
    let (user, outfit) = images();

    let err = orchestrator
        .process_encoded(&user, &outfit, None)
        .await
        .unwrap_err();

    assert!(matches!(err, TryOnError::Timeout(_)));
    assert!(err.to_string().contains("smaller images"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_submission_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let orchestrator = Orchestrator::http(ClientConfig::new(format!("http://{}/tryon", addr))).unwrap();
    let (user, outfit) = images();

    let err = orchestrator
        .process_encoded(&user, &outfit, None)
        .await
        .unwrap_err();

    assert!(matches!(err, TryOnError::Submission(_)));
    assert!(!err.to_string().contains(&addr.to_string()));
}
