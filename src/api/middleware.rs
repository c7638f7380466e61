//! Request and response middleware.

use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::error::ApiError;
use super::state::AppState;

/// Reject every request with 500 when no API token is configured; otherwise
/// hand the handler a client bound to the token.
///
/// Runs before routing, so unknown paths are rejected the same way.
pub async fn require_token(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let Some(client) = state.todoist() else {
        return ApiError::MissingCredential.into_response();
    };
    request.extensions_mut().insert(client);
    next.run(request).await
}

/// Re-render error responses as `{"error": {"kind", "message"}}`.
pub async fn envelope_errors(mut response: Response) -> Response {
    match response.extensions_mut().remove::<ApiError>() {
        Some(error) => (error.status(), Json(error.envelope())).into_response(),
        None => response,
    }
}
