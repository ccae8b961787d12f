mod error;
mod merge;
mod operations;
mod patch;
mod requests;
mod types;

pub use error::PointError;
pub use merge::merge_point;
pub use operations::{validate_new_point, validate_patch, validate_replacement, validate_target_id};
pub use patch::Patch;
pub use requests::{PointPatch, PointPayload};
pub use types::{Point, ENTITY_NAME};
