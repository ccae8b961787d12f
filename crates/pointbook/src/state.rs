//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Storage is reached through a repository trait object.

use std::{sync::Arc, time::Duration};

use pointbook_core::storage::PointRepository;

use crate::config::Config;

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Point repository.
    pub point_repo: Arc<dyn PointRepository>,
    /// Prefix of the `X-<app>-*` alert headers.
    pub app_name: Arc<str>,
    /// Time allowed for a request before it is answered with 408.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(point_repo: Arc<dyn PointRepository>, config: &Config) -> Self {
        Self {
            point_repo,
            app_name: config.app_name.as_str().into(),
            request_timeout: config.request_timeout(),
        }
    }

    /// State over a fresh in-memory SQLite repository.
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        let repo = crate::storage::SqliteRepository::in_memory()
            .await
            .expect("in-memory repository");

        Self {
            point_repo: Arc::new(repo),
            app_name: "pointbookApp".into(),
            request_timeout: Duration::from_secs(10),
        }
    }
}
