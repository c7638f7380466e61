//! HTTP surface of the gateway.
//!
//! # Architecture
//!
//! - `operations`: declarative table of every endpoint
//! - `dispatch`: the generic handler driven by that table
//! - `routes`: router assembly, token gate and error format
//! - `sse`, `docs`: the event stream and the generated API docs

mod dispatch;
mod docs;
mod error;
mod middleware;
mod operations;
mod routes;
mod sse;
mod state;

#[cfg(test)]
mod dispatch_test;
#[cfg(test)]
mod error_test;

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use docs::openapi;
pub use error::{ApiError, ErrorEnvelope, ErrorFormat, ServerError};
pub use operations::{Input, OPERATIONS, Operation, Param, Reply, Required, Verb};
pub use routes::create_router;
pub use state::AppState;

use crate::todoist::DEFAULT_BASE_URL;

/// Origin allowed to read the `/sse` stream by default.
pub const DEFAULT_SSE_ORIGIN: &str = "https://ai.playground.cloudflare.com";

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Todoist API token; requests fail with 500 while unset
    pub api_token: Option<String>,
    /// Todoist REST base URL
    pub api_base_url: String,
    /// Plain-text or JSON envelope error bodies
    pub error_format: ErrorFormat,
    /// Value of `Access-Control-Allow-Origin` on `/sse`
    pub sse_allow_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            api_token: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            error_format: ErrorFormat::default(),
            sse_allow_origin: DEFAULT_SSE_ORIGIN.to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables:
    ///
    /// - `TODOIST_API_TOKEN`
    /// - `TODOIST_API_URL`
    /// - `GATEWAY_ERROR_FORMAT` (`plain` or `envelope`; unknown values are ignored)
    /// - `GATEWAY_SSE_ORIGIN`
    ///
    /// Empty values count as unset.
    pub fn new() -> Self {
        let defaults = Self::default();
        Self {
            api_token: non_empty_var("TODOIST_API_TOKEN"),
            api_base_url: non_empty_var("TODOIST_API_URL").unwrap_or(defaults.api_base_url),
            error_format: non_empty_var("GATEWAY_ERROR_FORMAT")
                .and_then(|name| ErrorFormat::parse(&name))
                .unwrap_or(defaults.error_format),
            sse_allow_origin: non_empty_var("GATEWAY_SSE_ORIGIN")
                .unwrap_or(defaults.sse_allow_origin),
            ..defaults
        }
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_error_format(mut self, format: ErrorFormat) -> Self {
        self.error_format = format;
        self
    }

    pub fn with_sse_allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.sse_allow_origin = origin.into();
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Initialize tracing subscriber with env filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todoist_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the gateway with the given configuration.
///
/// The rustls crypto provider must be installed before calling this.
pub async fn run(config: Config) -> Result<(), ServerError> {
    init_tracing();

    if config.api_token.is_none() {
        warn!("TODOIST_API_TOKEN is not set; every request will be answered with 500");
    }

    let http = reqwest::Client::builder()
        .user_agent(concat!("todoist-gateway/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let addr = config.socket_addr();
    info!(base_url = %config.api_base_url, error_format = ?config.error_format, "configuration loaded");

    let app = create_router(AppState::new(config, http)).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!("Todoist gateway listening on http://{}", addr);

    axum::serve(listener, app).await.map_err(ServerError::Serve)?;
    Ok(())
}
