//! Server-sent event stream for MCP playground clients.

use std::convert::Infallible;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{
        IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures_util::stream::{self, StreamExt};
use tracing::{info, warn};

use super::state::AppState;

/// First event sent on every stream.
pub const GREETING: &str = "Connected to MCP server";

/// Open an event stream: one greeting event, then keep-alive comments until
/// the client goes away.
pub async fn events(State(state): State<AppState>) -> impl IntoResponse {
    info!("event stream client connected");

    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    match HeaderValue::from_str(&state.config().sse_allow_origin) {
        Ok(origin) => {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        }
        Err(error) => warn!(%error, "invalid SSE allow-origin, header omitted"),
    }

    let stream = stream::once(async { Ok::<_, Infallible>(Event::default().data(GREETING)) })
        .chain(stream::pending());

    (headers, Sse::new(stream).keep_alive(KeepAlive::default()))
}
