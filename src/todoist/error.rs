//! Remote call errors.
//!
//! Every variant ends up as a generic 500 at the HTTP surface; the detail is
//! only ever logged.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while talking to the Todoist REST API.
#[derive(Error, Diagnostic, Debug)]
pub enum TodoistError {
    #[error("Todoist request failed: {0}")]
    #[diagnostic(code(todoist_gateway::todoist::transport))]
    Transport(#[from] reqwest::Error),

    #[error("Todoist returned status {status}: {body}")]
    #[diagnostic(code(todoist_gateway::todoist::status))]
    Status { status: u16, body: String },

    #[error("Todoist returned an invalid JSON body: {0}")]
    #[diagnostic(code(todoist_gateway::todoist::decode))]
    Decode(#[from] serde_json::Error),

    #[error("Invalid Todoist base URL '{url}': {message}")]
    #[diagnostic(
        code(todoist_gateway::todoist::base_url),
        help("Set TODOIST_API_URL to an absolute http(s) URL such as https://api.todoist.com/rest/v2")
    )]
    InvalidBaseUrl { url: String, message: String },

    #[error("Endpoint {endpoint} requires a resource id")]
    #[diagnostic(code(todoist_gateway::todoist::missing_id))]
    MissingId { endpoint: String },
}

/// Result type for remote calls.
pub type TodoistResult<T> = Result<T, TodoistError>;
