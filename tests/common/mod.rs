#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use careers_client::{
    auth::{CredentialSource, Identity, StaticToken},
    coordinator::{Notice, NoticeLevel, Notifier},
    services::api_client::ApiClient,
    Services,
};
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> JsonValue {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Field names of a multipart body, in order.
    pub fn multipart_fields(&self) -> Vec<String> {
        let text = String::from_utf8_lossy(&self.body);
        text.split("Content-Disposition: form-data; name=\"")
            .skip(1)
            .filter_map(|chunk| chunk.split('"').next())
            .map(str::to_string)
            .collect()
    }
}

pub struct Reply {
    pub status: u16,
    pub body: String,
    pub content_type: &'static str,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(value: JsonValue) -> Self {
        Self::status(200, value)
    }

    pub fn status(status: u16, value: JsonValue) -> Self {
        Self {
            status,
            body: value.to_string(),
            content_type: "application/json",
            delay: None,
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "text/html",
            delay: None,
        }
    }

    pub fn not_found() -> Self {
        Self::status(404, json!({ "detail": "Not Found" }))
    }

    pub fn delayed(mut self, millis: u64) -> Self {
        self.delay = Some(Duration::from_millis(millis));
        self
    }
}

type Responder = Arc<dyn Fn(&RecordedRequest) -> Reply + Send + Sync>;

#[derive(Clone)]
struct FakeState {
    log: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Responder,
}

/// Stand-in for the careers API, bound to an ephemeral local port.
pub struct FakeApi {
    pub base_url: String,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeApi {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> Reply + Send + Sync + 'static,
    {
        let log = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            log: log.clone(),
            responder: Arc::new(responder),
        };
        let app = Router::new().fallback(handle).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake api");
        });

        Self {
            base_url: format!("http://{}", addr),
            log,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(reqwest::Client::new(), self.base_url.clone())
    }

    pub fn services(&self) -> Services {
        Services::from_api(self.client())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests_to(path).len()
    }
}

async fn handle(State(state): State<FakeState>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, 32 * 1024 * 1024).await.unwrap_or_default();
    let header_value = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: bytes.to_vec(),
    };
    state.log.lock().unwrap().push(recorded.clone());

    let reply = (state.responder)(&recorded);
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }
    (
        StatusCode::from_u16(reply.status).unwrap(),
        [(header::CONTENT_TYPE, reply.content_type)],
        reply.body,
    )
        .into_response()
}

/// Collects notices for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .map(|n| n.message)
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == NoticeLevel::Success)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

pub fn identity(uid: &str) -> Identity {
    let credentials: Arc<dyn CredentialSource> = Arc::new(StaticToken::new(format!("token-{}", uid)));
    Identity::new(uid, credentials)
        .with_profile(Some("Ada Lovelace".into()), Some("ada@example.com".into()))
}

pub fn post(id: i64, title: &str, location: &str, content: &str, category_id: Option<i64>) -> JsonValue {
    json!({
        "id": id,
        "title": title,
        "location": location,
        "content": content,
        "createdAt": "2026-09-01T10:00:00Z",
        "category": category_id.map(|id| json!({ "id": id, "name": format!("Category {}", id) })),
    })
}

/// Ten postings; three have "Engineer" in the title (ids 2, 5 and 9).
pub fn ten_posts() -> Vec<JsonValue> {
    vec![
        post(1, "Product Designer", "Berlin", "Shape our interfaces", Some(1)),
        post(2, "Backend Engineer", "Remote", "Rust services and Postgres", Some(2)),
        post(3, "Account Manager", "Lisbon", "Own customer relationships", Some(3)),
        post(4, "Data Analyst", "Remote", "Dashboards and SQL", Some(2)),
        post(5, "Frontend Engineer", "Warsaw", "React and accessibility", Some(2)),
        post(6, "Recruiter", "London", "Hire great people", Some(3)),
        post(7, "Support Specialist", "Remote", "Help customers succeed", None),
        post(8, "Office Manager", "Berlin", "Keep the lights on", Some(3)),
        post(9, "Site Reliability Engineer", "Remote", "On-call and observability", Some(2)),
        post(10, "Content Writer", "Paris", "Blog posts and docs", Some(1)),
    ]
}

pub fn categories() -> JsonValue {
    json!([
        { "id": 1, "name": "Design" },
        { "id": 2, "name": "Technology" },
        { "id": 3, "name": "Operations" }
    ])
}
