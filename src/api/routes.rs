//! API route configuration.

use axum::{
    Extension, Router,
    body::Bytes,
    http::Uri,
    middleware::{from_fn_with_state, map_response},
    routing::any,
};
use utoipa_scalar::{Scalar, Servable};

use super::dispatch::dispatch;
use super::docs;
use super::error::{ApiError, ErrorFormat};
use super::middleware::{envelope_errors, require_token};
use super::operations::OPERATIONS;
use super::sse;
use super::state::AppState;
use crate::todoist::TodoistClient;

/// Create the gateway router.
///
/// Paths match exactly and case-sensitively; any HTTP method reaches the
/// operation registered for a path. The token check wraps every route and
/// the 404 fallback.
pub fn create_router(state: AppState) -> Router {
    let router = OPERATIONS.iter().fold(Router::new(), |router, op| {
        router.route(
            op.path,
            any(
                move |Extension(client): Extension<TodoistClient>, uri: Uri, body: Bytes| {
                    dispatch(op, client, uri, body)
                },
            ),
        )
    });

    let router = router
        .route("/sse", any(sse::events))
        .merge(Scalar::with_url("/docs", docs::openapi()))
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), require_token));

    let router = match state.config().error_format {
        ErrorFormat::Plain => router,
        ErrorFormat::Envelope => router.layer(map_response(envelope_errors)),
    };

    router.with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
