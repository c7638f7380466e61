//! Todoist REST API client.
//!
//! A thin reqwest wrapper that knows the REST v2 URL layout, the bearer token
//! header and the key casing used by the official SDKs.
//!
//! # Architecture
//!
//! - `endpoint`: where an operation lives relative to the API base URL
//! - `client`: the per-request client and the outbound request description
//! - `case`: camelCase/snake_case key conversion for JSON payloads
//! - `error`: remote failure types

mod case;
mod client;
mod endpoint;
mod error;


pub use case::{camel_case, snake_case, to_camel_case_keys, to_snake_case_keys};
pub use client::{DEFAULT_BASE_URL, RemoteRequest, TodoistClient};
pub use endpoint::{Endpoint, Resource};
pub use error::{TodoistError, TodoistResult};
