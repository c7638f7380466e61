//! Test helpers: a fake Todoist upstream that records every request.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Path prefix the fake serves under, mirroring `/rest/v2`.
const PREFIX: &str = "/rest/v2";

/// Install the rustls crypto provider once for reqwest.
pub fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// A reqwest client usable against the fake upstream.
pub fn http_client() -> reqwest::Client {
    init_crypto();
    reqwest::Client::new()
}

/// One request as seen by the fake upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    /// Path below the `/rest/v2` prefix, still percent-encoded.
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct Shared {
    requests: Arc<Mutex<Vec<Recorded>>>,
    replies: Arc<Mutex<HashMap<(Method, String), (StatusCode, String)>>>,
}

/// Fake Todoist REST API on an ephemeral local port.
///
/// Unconfigured routes answer `204 No Content`.
pub struct FakeTodoist {
    base_url: String,
    shared: Shared,
}

impl FakeTodoist {
    pub async fn start() -> Self {
        let shared = Shared::default();
        let app = Router::new().fallback(record).with_state(shared.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake upstream");
        let addr = listener.local_addr().expect("fake upstream address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake upstream");
        });

        Self {
            base_url: format!("http://{addr}{PREFIX}"),
            shared,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answer `method path` with a JSON body.
    pub fn reply(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.reply_text(method, path, status, &body.to_string());
    }

    /// Answer `method path` with a raw body.
    pub fn reply_text(&self, method: Method, path: &str, status: StatusCode, body: &str) {
        self.shared
            .replies
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// The only request received so far.
    pub fn single_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request, got {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

async fn record(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(PREFIX)
        .unwrap_or(uri.path())
        .to_string();

    shared.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    let reply = shared.replies.lock().unwrap().get(&(method, path)).cloned();
    match reply {
        Some((status, body)) => {
            (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}{PREFIX}")
}
