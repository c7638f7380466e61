use reqwest::{Client, Method, Url};
use serde_json::Value;
use tracing::debug;

use super::endpoint::Endpoint;
use super::error::{TodoistError, TodoistResult};

/// Public REST v2 base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v2";

/// One outbound call to the REST API.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
    pub method: Method,
    pub endpoint: Endpoint,
    pub id: Option<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RemoteRequest {
    pub fn new(method: Method, endpoint: Endpoint) -> Self {
        Self {
            method,
            endpoint,
            id: None,
            query: Vec::new(),
            body: None,
        }
    }

    /// Address a single resource.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Client for the Todoist REST API bound to one bearer token.
///
/// Cheap to build: it shares the connection pool of the given
/// `reqwest::Client` and only owns the token and base URL.
#[derive(Clone)]
pub struct TodoistClient {
    http: Client,
    base_url: String,
    token: String,
}

impl TodoistClient {
    pub fn new(http: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Resolve the absolute URL of a request, percent-encoding the id as a
    /// single path segment.
    pub fn url(&self, endpoint: Endpoint, id: Option<&str>) -> TodoistResult<Url> {
        let segments = endpoint
            .segments(id)
            .ok_or_else(|| TodoistError::MissingId {
                endpoint: format!("{endpoint:?}"),
            })?;

        let invalid = |message: String| TodoistError::InvalidBaseUrl {
            url: self.base_url.clone(),
            message,
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and return its JSON body.
    ///
    /// Non-2xx statuses are errors. An empty success body yields `None`.
    pub async fn send(&self, request: RemoteRequest) -> TodoistResult<Option<Value>> {
        let RemoteRequest {
            method,
            endpoint,
            id,
            query,
            body,
        } = request;
        let url = self.url(endpoint, id.as_deref())?;
        debug!(%method, %url, "calling Todoist");

        let mut builder = self.http.request(method, url).bearer_auth(&self.token);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TodoistError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}
