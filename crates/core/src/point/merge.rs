//! Merge-patch application for points.
//!
//! Only `title` and `description` are mergeable. A field that is absent or
//! explicitly `null` in the patch keeps the stored value; there is no way to
//! clear `description` through a patch.

use super::requests::PointPatch;
use super::types::Point;

/// Applies a merge patch to a stored point and returns the merged point.
///
/// The stored `id` always wins over whatever the patch carries.
pub fn merge_point(mut existing: Point, patch: PointPatch) -> Point {
    if let Some(title) = patch.title.into_value() {
        existing.title = title;
    }
    if let Some(description) = patch.description.into_value() {
        existing.description = Some(description);
    }
    existing
}
