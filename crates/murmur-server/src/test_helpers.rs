use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use murmur_core::{ApiResponse, VerificationSubmission};
use serde_json::Value;
use tokio::net::TcpListener;

use crate::genai::GenerativeModel;
use crate::routes::InnerAppState;

/// Build a test router around the given model.
pub fn test_router(model: Arc<dyn GenerativeModel>) -> Router {
    crate::routes::build_router(Arc::new(InnerAppState { model }))
}

/// A running test server with base_url and background task handle.
pub struct TestServer {
    pub base_url: String,
    _handle: tokio::task::JoinHandle<()>,
}

async fn spawn_app(app: Router) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base_url,
        _handle: handle,
    }
}

/// Spawn the murmur server on a random port, backed by `model`.
pub async fn spawn_test_server(model: Arc<dyn GenerativeModel>) -> TestServer {
    spawn_app(test_router(model)).await
}

// -- Account backend stub --

#[derive(Clone)]
struct VerifyStubState {
    status: StatusCode,
    body: String,
    submissions: Arc<Mutex<Vec<VerificationSubmission>>>,
}

/// Stand-in for the account backend's `/api/verify-code`.
///
/// Answers every submission with a fixed status and body and records
/// what it received.
pub struct VerifyBackend {
    pub base_url: String,
    submissions: Arc<Mutex<Vec<VerificationSubmission>>>,
    _server: TestServer,
}

impl VerifyBackend {
    pub fn submissions(&self) -> Vec<VerificationSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

async fn verify_code_stub(
    State(state): State<VerifyStubState>,
    Json(submission): Json<VerificationSubmission>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.submissions.lock().unwrap().push(submission);
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// Spawn a verify-code backend that replies with an `ApiResponse` whose
/// `success` follows `status`.
pub async fn spawn_verify_backend(status: StatusCode, message: &str) -> VerifyBackend {
    let body = ApiResponse {
        success: status.is_success(),
        message: message.to_string(),
        questions: None,
    };
    spawn_verify_backend_raw(status, &serde_json::to_string(&body).unwrap()).await
}

/// Spawn a verify-code backend that replies with `body` exactly as given.
pub async fn spawn_verify_backend_raw(status: StatusCode, body: &str) -> VerifyBackend {
    let submissions = Arc::new(Mutex::new(Vec::new()));
    let state = VerifyStubState {
        status,
        body: body.to_string(),
        submissions: submissions.clone(),
    };
    let app = Router::new()
        .route("/api/verify-code", post(verify_code_stub))
        .with_state(state);
    let server = spawn_app(app).await;
    VerifyBackend {
        base_url: server.base_url.clone(),
        submissions,
        _server: server,
    }
}

// -- Generative Language API stub --

/// One request received by the generative-language stub.
#[derive(Debug, Clone)]
pub struct RecordedGenAiRequest {
    /// Last path segment, e.g. `gemini-2.0-flash:generateContent`.
    pub target: String,
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct GenAiStubState {
    status: StatusCode,
    response: Value,
    requests: Arc<Mutex<Vec<RecordedGenAiRequest>>>,
}

pub struct GenAiStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedGenAiRequest>>>,
    _server: TestServer,
}

impl GenAiStub {
    pub fn requests(&self) -> Vec<RecordedGenAiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn generate_content_stub(
    State(state): State<GenAiStubState>,
    Path(target): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.requests.lock().unwrap().push(RecordedGenAiRequest {
        target,
        api_key,
        body,
    });
    (state.status, Json(state.response.clone()))
}

/// Spawn a fake Generative Language API that answers every
/// `generateContent` call with `status` and `response`.
pub async fn spawn_genai_stub(status: StatusCode, response: Value) -> GenAiStub {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = GenAiStubState {
        status,
        response,
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/v1beta/models/{target}", post(generate_content_stub))
        .with_state(state);
    let server = spawn_app(app).await;
    GenAiStub {
        base_url: server.base_url.clone(),
        requests,
        _server: server,
    }
}
