#![allow(dead_code)]

use axum::{
    Router,
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
};
use reqwest::Client;
use roster::{
    api::HttpStudentApi,
    config::{BackendConfig, RuntimeConfiguration},
    router,
    state::RosterState,
};
use serde_json::{Map, Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const COLLECTION: &str = "/api/students/";

/// One request as the fake backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct BackendInner {
    students: Vec<Value>,
    requests: Vec<RecordedRequest>,
    failing: Vec<Method>,
    error_bodies: bool,
    empty_bodies: bool,
}

/// In-memory stand-in for the student REST backend.
///
/// Serves `/api/students/` on a random port, records every request and can be told to reject
/// any HTTP method with a plain-text 500.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    pub students_url: String,
    inner: Arc<Mutex<BackendInner>>,
}

impl FakeBackend {
    pub async fn new(students: Vec<Value>) -> Self {
        let inner = Arc::new(Mutex::new(BackendInner {
            students,
            ..Default::default()
        }));

        let app = Router::new()
            .route(COLLECTION, any(handle_collection))
            .route(&format!("{COLLECTION}{{key}}"), any(handle_record))
            .with_state(inner.clone());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            students_url: format!("http://127.0.0.1:{port}{COLLECTION}"),
            inner,
        }
    }

    /// Every request of this method now fails with a 500 and a raw text body.
    pub fn fail(&self, method: Method) {
        self.inner.lock().unwrap().failing.push(method);
    }

    /// Mutations answer `200 {"error": ...}` like the original backend does on bad input.
    pub fn answer_with_error_bodies(&self) {
        self.inner.lock().unwrap().error_bodies = true;
    }

    /// Successful mutations answer `204 No Content` with nothing in the body.
    pub fn answer_with_empty_bodies(&self) {
        self.inner.lock().unwrap().empty_bodies = true;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.inner.lock().unwrap().requests.clear();
    }

    pub fn count(&self, method: &Method) -> usize {
        self.requests()
            .iter()
            .filter(|request| &request.method == method)
            .count()
    }

    pub fn students(&self) -> Vec<Value> {
        self.inner.lock().unwrap().students.clone()
    }
}

async fn handle_collection(
    State(inner): State<Arc<Mutex<BackendInner>>>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    respond(&inner, method, &uri, "", &body)
}

async fn handle_record(
    State(inner): State<Arc<Mutex<BackendInner>>>,
    Path(key): Path<String>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    respond(&inner, method, &uri, &key, &body)
}

/// `key` arrives percent-decoded, `uri` is recorded exactly as sent.
fn respond(
    inner: &Mutex<BackendInner>,
    method: Method,
    uri: &Uri,
    key: &str,
    body: &str,
) -> Response {
    let mut inner = inner.lock().unwrap();
    let body = serde_json::from_str::<Value>(body).ok();
    inner.requests.push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        body: body.clone(),
    });

    if inner.failing.contains(&method) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Error: database is down").into_response();
    }

    let position = inner
        .students
        .iter()
        .position(|student| !key.is_empty() && student["uniqueNumber"] == key);

    let empty_bodies = inner.empty_bodies;
    let message = |text: &str| {
        if empty_bodies {
            StatusCode::NO_CONTENT.into_response()
        } else {
            axum::Json(json!({ "message": text })).into_response()
        }
    };

    match (&method, key.is_empty()) {
        (&Method::GET, true) => axum::Json(Value::Array(inner.students.clone())).into_response(),
        (&Method::GET, false) => match position {
            Some(i) => axum::Json(inner.students[i].clone()).into_response(),
            None => (StatusCode::NOT_FOUND, "Student not found").into_response(),
        },
        (&Method::POST, true) => {
            if inner.error_bodies {
                return axum::Json(json!({ "error": "Unique number is required" })).into_response();
            }
            inner.students.push(body.unwrap_or(Value::Null));
            message("Student added successfully")
        }
        (&Method::PUT, false) => {
            let Some(i) = position else {
                return (StatusCode::NOT_FOUND, "Student not found").into_response();
            };
            if let (Some(Value::Object(changes)), Value::Object(student)) =
                (body, &mut inner.students[i])
            {
                merge(student, changes);
            }
            message("Student updated successfully")
        }
        (&Method::DELETE, false) => {
            if inner.error_bodies {
                return axum::Json(json!({ "error": "Unique number is required" })).into_response();
            }
            let Some(i) = position else {
                return (StatusCode::NOT_FOUND, "Student not found").into_response();
            };
            inner.students.remove(i);
            message("Student deleted successfully")
        }
        _ => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response(),
    }
}

fn merge(student: &mut Map<String, Value>, changes: Map<String, Value>) {
    for (key, value) in changes {
        student.insert(key, value);
    }
}

pub fn student(unique_number: &str, first_name: &str, last_name: &str) -> Value {
    json!({
        "id": 1,
        "uniqueNumber": unique_number,
        "firstName": first_name,
        "lastName": last_name,
        "patronymic": null,
        "birthDate": "2000-01-01",
        "groupName": "G1",
    })
}

/// The roster app wired to a [`FakeBackend`] and served on its own random port.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub state: RosterState,
    pub backend: FakeBackend,
}

impl TestApp {
    pub async fn new(students: Vec<Value>) -> Self {
        let backend = FakeBackend::new(students).await;
        Self::with_students_url(&backend.students_url.clone(), backend).await
    }

    /// Points the roster at `students_url` instead of the fake backend.
    pub async fn with_students_url(students_url: &str, backend: FakeBackend) -> Self {
        let backend_config =
            BackendConfig::from_url(students_url, None).expect("Failed to build backend config");
        let api = HttpStudentApi::new(&backend_config).expect("Failed to build client");
        let config = RuntimeConfiguration::from_parts(backend_config, "127.0.0.1:0");
        let state = RosterState::with_api(Arc::new(api), config);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let app = router(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            address: format!("http://127.0.0.1:{port}"),
            client: Client::new(),
            state,
            backend,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// An address nothing listens on.
pub async fn unreachable_students_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}{COLLECTION}")
}
