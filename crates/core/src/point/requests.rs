//! API request types for point operations.
//!
//! These are the shapes the REST layer deserializes. Following the Functional
//! Core pattern, they are pure data types with no I/O.

use serde::{Deserialize, Serialize};

use super::patch::Patch;

/// Request payload for creating (POST) or fully replacing (PUT) a point.
///
/// `title` is optional here so that a missing title is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PointPayload {
    /// Create a payload with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            description: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for a merge-patch (PATCH) of a point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointPatch {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
}

impl PointPatch {
    /// Create an empty patch targeting the given ID.
    pub fn new(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Patch::Value(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Patch::Value(description.into());
        self
    }
}
