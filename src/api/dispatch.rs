//! The one handler behind every table operation.

use axum::{Json, body::Bytes, extract::Query, http::Uri};
use serde_json::{Map, Value};
use tracing::{instrument, warn};

use super::error::ApiError;
use super::operations::{Input, Operation, Reply, Required};
use crate::todoist::{RemoteRequest, TodoistClient, to_camel_case_keys, to_snake_case_keys};

/// Decoded query string. Empty values count as absent.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn from_uri(uri: &Uri) -> Result<Self, ApiError> {
        Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| Self(pairs))
            .map_err(|_| ApiError::bad_request("invalid query string"))
    }

    /// First value of `name`, if non-empty.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn require(&self, name: &str) -> Result<&str, ApiError> {
        self.get(name).ok_or_else(|| ApiError::missing(name))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Outcome of reading an operation's input.
#[derive(Debug, PartialEq)]
pub enum Prepared {
    /// Make this remote call.
    Call(RemoteRequest),
    /// Answer with this value without calling out.
    Reply(Value),
}

/// Serve one table operation: extract input, make at most one remote call,
/// wrap the result under the operation key.
#[instrument(skip_all, fields(path = op.path))]
pub async fn dispatch(
    op: &'static Operation,
    client: TodoistClient,
    uri: Uri,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let query = QueryParams::from_uri(&uri)?;
    let request = match prepare(op, &query, &body)? {
        Prepared::Call(request) => request,
        Prepared::Reply(value) => return Ok(wrap(op.key, value)),
    };

    let reply = client.send(request).await.map_err(|error| {
        warn!(%error, "remote call failed");
        ApiError::remote(op.failure)
    })?;

    let value = shape(op.reply, reply).ok_or_else(|| {
        warn!("remote call returned no body");
        ApiError::remote(op.failure)
    })?;
    Ok(wrap(op.key, value))
}

/// Turn inbound query and body into the remote request, or reject with 400.
pub fn prepare(op: &Operation, query: &QueryParams, body: &[u8]) -> Result<Prepared, ApiError> {
    let request = RemoteRequest::new(op.verb.method(), op.endpoint);

    let request = match op.input {
        Input::None => request,
        Input::Filters(params) => params.iter().fold(request, |request, p| {
            match query.get(p.name) {
                Some(value) => request.with_query(p.remote, value),
                None => request,
            }
        }),
        Input::Scope(p) => match query.get(p.name) {
            Some(value) => request.with_query(p.remote, value),
            None => return Ok(Prepared::Reply(Value::Array(Vec::new()))),
        },
        Input::OneOf(params) => {
            let Some((p, value)) = params
                .iter()
                .find_map(|p| query.get(p.name).map(|value| (p, value)))
            else {
                let names: Vec<_> = params.iter().map(|p| p.name).collect();
                return Err(ApiError::missing(&names.join(" or ")));
            };
            request.with_query(p.remote, value)
        }
        Input::Flag(p) => {
            if query.get(p.name) == Some("true") {
                request.with_query(p.remote, "true")
            } else {
                request
            }
        }
        Input::Id(name) => {
            let id = query.require(name)?;
            if !is_path_segment(id) {
                return Err(ApiError::missing(name));
            }
            request.with_id(id)
        }
        Input::Body { fields, required } => {
            let mut object = json_object(body)?;
            check_required(&object, required)?;
            if let Some(fields) = fields {
                object.retain(|key, _| fields.contains(&key.as_str()));
            }
            request.with_body(to_snake_case_keys(Value::Object(object)))
        }
        Input::BodyWithId(name) => {
            let mut object = json_object(body)?;
            let id = object
                .remove(name)
                .and_then(identifier)
                .filter(|id| is_path_segment(id))
                .ok_or_else(|| ApiError::missing(name))?;
            request
                .with_id(id)
                .with_body(to_snake_case_keys(Value::Object(object)))
        }
    };

    Ok(Prepared::Call(request))
}

/// Value placed under the response key, `None` when a body was required
/// but missing.
pub fn shape(reply: Reply, remote: Option<Value>) -> Option<Value> {
    match (reply, remote) {
        (Reply::Acknowledge, _) | (Reply::Resource, None) => Some(Value::Bool(true)),
        (Reply::Resource, Some(value)) => Some(to_camel_case_keys(value)),
        (Reply::Raw, value) => value,
    }
}

fn wrap(key: &str, value: Value) -> Json<Value> {
    let mut object = Map::new();
    object.insert(key.to_string(), value);
    Json(Value::Object(object))
}

fn json_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(object)) => Ok(object),
        _ => Err(ApiError::bad_request("request body must be a JSON object")),
    }
}

fn check_required(object: &Map<String, Value>, required: Required) -> Result<(), ApiError> {
    let present = |field: &str| object.get(field).is_some_and(is_present);
    match required {
        Required::Nothing => Ok(()),
        Required::All(fields) => match fields.iter().copied().find(|field| !present(field)) {
            Some(field) => Err(ApiError::missing(field)),
            None => Ok(()),
        },
        Required::Any(fields) => {
            if fields.iter().copied().any(present) {
                Ok(())
            } else {
                Err(ApiError::missing(&fields.join(" or ")))
            }
        }
    }
}

/// Null, `false`, zero and the empty string count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `.` and `..` would be normalized out of the remote URL.
fn is_path_segment(id: &str) -> bool {
    !matches!(id, "." | "..")
}

/// Resource ids arrive as strings or numbers.
fn identifier(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
