//! pagelink - Turn a local file into a publicly reachable link
//!
//! This crate serves a small upload page and JSON API with:
//! - Predictable GitHub Pages URLs composed from account/repository/file name
//! - Base64 data URLs built without any network call
//! - Uploads through the GitHub Contents API, recorded in a local history
//! - Settings and history persisted in an embedded redb key-value store

pub mod api;
pub mod config;
pub mod encoder;
pub mod error;
pub mod links;
pub mod publisher;
pub mod storage;
#[cfg(test)]
pub mod testutil;
pub mod workflow;

use config::Config;
use workflow::Workflow;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub workflow: Workflow,
}
