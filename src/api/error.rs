//! API error types with HTTP status code mapping.

use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Request-level errors. The display string is the response message.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("TODOIST_API_TOKEN is not set")]
    #[diagnostic(
        code(todoist_gateway::api::missing_credential),
        help("Export TODOIST_API_TOKEN before starting the gateway.")
    )]
    MissingCredential,

    #[error("{message}")]
    #[diagnostic(code(todoist_gateway::api::bad_request))]
    BadRequest { message: String },

    #[error("{message}")]
    #[diagnostic(code(todoist_gateway::api::remote))]
    Remote { message: String },

    #[error("Not Found")]
    #[diagnostic(code(todoist_gateway::api::not_found))]
    NotFound,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// `<field> is required`
    pub fn missing(field: &str) -> Self {
        Self::bad_request(format!("{field} is required"))
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::Remote { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Machine-readable kind used by the JSON error envelope.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "configuration",
            Self::BadRequest { .. } => "bad_request",
            Self::Remote { .. } => "remote",
            Self::NotFound => "not_found",
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorBody {
                kind: self.kind(),
                message: self.to_string(),
            },
        }
    }
}

/// Errors render as plain text. The error itself rides along in the response
/// extensions so the envelope middleware can re-render it.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), self.to_string()).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// `{"error": {"kind": .., "message": ..}}`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

/// How error responses are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ErrorFormat {
    /// Status code with a plain-text message.
    #[default]
    Plain,
    /// Status code with a JSON error envelope.
    Envelope,
}

impl ErrorFormat {
    /// Parse a case-insensitive name (`plain`, `envelope`).
    pub fn parse(name: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(name.trim(), true).ok()
    }
}

/// Errors that stop the server from starting or running.
#[derive(Error, Diagnostic, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(todoist_gateway::server::bind),
        help("Is another process already listening on this port? Try --port.")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(todoist_gateway::server::serve))]
    Serve(#[source] std::io::Error),

    #[error("Failed to build HTTP client: {0}")]
    #[diagnostic(code(todoist_gateway::server::http_client))]
    HttpClient(#[from] reqwest::Error),
}
