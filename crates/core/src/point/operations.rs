use super::error::PointError;
use super::requests::{PointPatch, PointPayload};
use super::types::Point;

/// Checks that a title is present and not empty.
fn require_title(title: Option<String>) -> Result<String, PointError> {
    match title {
        Some(title) if !title.is_empty() => Ok(title),
        _ => Err(PointError::TitleRequired),
    }
}

/// Checks that the body carries an ID equal to the one in the path.
pub fn validate_target_id(path_id: i64, body_id: Option<i64>) -> Result<i64, PointError> {
    let body_id = body_id.ok_or(PointError::IdNull)?;
    if body_id != path_id {
        return Err(PointError::IdInvalid);
    }
    Ok(body_id)
}

/// Validates a create request and turns it into a transient point.
///
/// Field validation runs before the ID check.
pub fn validate_new_point(payload: PointPayload) -> Result<Point, PointError> {
    let title = require_title(payload.title)?;
    if payload.id.is_some() {
        return Err(PointError::IdExists);
    }

    Ok(Point {
        id: None,
        title,
        description: payload.description,
    })
}

/// Validates a full-update request for the point at `path_id`.
pub fn validate_replacement(path_id: i64, payload: PointPayload) -> Result<Point, PointError> {
    let title = require_title(payload.title)?;
    let id = validate_target_id(path_id, payload.id)?;

    Ok(Point {
        id: Some(id),
        title,
        description: payload.description,
    })
}

/// Validates the ID of a merge-patch request for the point at `path_id`.
pub fn validate_patch(path_id: i64, patch: &PointPatch) -> Result<i64, PointError> {
    validate_target_id(path_id, patch.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_point_without_id_is_valid() {
        let point =
            validate_new_point(PointPayload::new("Harbor").with_description("Bay")).unwrap();

        assert_eq!(point, Point::new("Harbor").with_description("Bay"));
    }

    #[test]
    fn test_new_point_with_id_is_rejected() {
        let result = validate_new_point(PointPayload::new("Harbor").with_id(1));
        assert_eq!(result, Err(PointError::IdExists));
    }

    #[test]
    fn test_new_point_requires_title() {
        assert_eq!(
            validate_new_point(PointPayload::default()),
            Err(PointError::TitleRequired)
        );
        assert_eq!(
            validate_new_point(PointPayload::new("")),
            Err(PointError::TitleRequired)
        );
    }

    #[test]
    fn test_title_is_checked_before_id() {
        let payload = PointPayload {
            id: Some(1),
            title: None,
            description: None,
        };
        assert_eq!(validate_new_point(payload), Err(PointError::TitleRequired));
    }

    #[test]
    fn test_replacement_requires_id() {
        let result = validate_replacement(4, PointPayload::new("Harbor"));
        assert_eq!(result, Err(PointError::IdNull));
    }

    #[test]
    fn test_replacement_requires_matching_id() {
        let result = validate_replacement(4, PointPayload::new("Harbor").with_id(5));
        assert_eq!(result, Err(PointError::IdInvalid));
    }

    #[test]
    fn test_replacement_keeps_id() {
        let point = validate_replacement(4, PointPayload::new("Harbor").with_id(4)).unwrap();
        assert_eq!(point, Point::new("Harbor").with_id(4));
    }

    #[test]
    fn test_patch_id_rules() {
        assert_eq!(validate_patch(9, &PointPatch::default()), Err(PointError::IdNull));
        assert_eq!(validate_patch(9, &PointPatch::new(8)), Err(PointError::IdInvalid));
        assert_eq!(validate_patch(9, &PointPatch::new(9)), Ok(9));
    }
}
