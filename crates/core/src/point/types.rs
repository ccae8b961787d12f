use serde::{Deserialize, Serialize};

/// Entity name used in alert headers and error payloads.
pub const ENTITY_NAME: &str = "point";

/// A titled point with an optional description.
///
/// `id` is `None` until the point has been persisted; the store assigns it on
/// insert and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
}

impl Point {
    /// Creates a transient (not yet persisted) point.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
        }
    }

    /// Sets the description for this point.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a specific ID for this point (useful for testing).
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns true if the point has never been persisted.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
