//! Application state for the API server.

use std::sync::Arc;

use reqwest::Client;

use super::Config;
use crate::todoist::TodoistClient;

/// Shared application state.
///
/// Holds the immutable configuration and the pooled HTTP client. Nothing in
/// here changes after startup.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    http: Client,
}

impl AppState {
    /// Dependencies are injected so tests can point the client at a fake
    /// upstream.
    pub fn new(config: Config, http: Client) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a Todoist client for one request.
    ///
    /// `None` when no API token is configured.
    pub fn todoist(&self) -> Option<TodoistClient> {
        self.config.api_token.as_deref().map(|token| {
            TodoistClient::new(self.http.clone(), self.config.api_base_url.clone(), token)
        })
    }
}
