//! Point CRUD handlers.
//!
//! Handlers validate the request shape and ID invariants, then go through the
//! `PointRepository` trait object held in the application state.

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures_util::{StreamExt, TryStreamExt};
use serde::Deserialize;

use pointbook_core::point::{
    merge_point, validate_new_point, validate_patch, validate_replacement, Point, PointError,
    PointPatch, PointPayload,
};
use pointbook_core::storage::{
    PageRequest, PointCriteria, RepositoryError, Sort, DEFAULT_PAGE_SIZE, POINT_ENTITY,
};

use super::alerts::{entity_creation_alert, entity_deletion_alert, entity_update_alert};
use super::error::{ApiError, BadRequestAlert};
use crate::state::AppState;

pub const NDJSON: &str = "application/x-ndjson";
pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// Query parameters for listing points.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPointsQuery {
    /// Zero-based page index; enables paging (default size 20)
    pub page: Option<u32>,
    /// Page size; enables paging (default page 0)
    pub size: Option<u32>,
    /// Ordering as `column[,asc|desc]`
    pub sort: Option<String>,
    pub id: Option<i64>,
    pub title: Option<String>,
    pub title_contains: Option<String>,
    pub description_contains: Option<String>,
}

impl ListPointsQuery {
    /// Paging is only applied when `page` or `size` is given. A lone `sort`
    /// orders the full result.
    fn page_request(&self) -> Result<Option<PageRequest>, RepositoryError> {
        let sort = self.sort.as_deref().map(Sort::parse).transpose()?;

        let request = match (self.page, self.size) {
            (None, None) if sort.is_none() => return Ok(None),
            (None, None) => PageRequest::unpaged(),
            (page, size) => {
                let size = size.unwrap_or(DEFAULT_PAGE_SIZE);
                if size == 0 {
                    return Err(RepositoryError::InvalidData(
                        "Page size must be greater than zero".to_string(),
                    ));
                }
                PageRequest::new(page.unwrap_or(0), size)
            }
        };

        Ok(Some(match sort {
            Some(sort) => request.with_sort(sort),
            None => request,
        }))
    }

    fn criteria(&self) -> Option<PointCriteria> {
        let criteria = PointCriteria {
            id: self.id,
            title: self.title.clone(),
            title_contains: self.title_contains.clone(),
            description_contains: self.description_contains.clone(),
        };
        (!criteria.is_empty()).then_some(criteria)
    }
}

fn alert(state: &AppState, error: PointError) -> BadRequestAlert {
    BadRequestAlert::new(state.app_name.clone(), &error)
}

/// Maps a body extraction failure to a 415 or a `validation` alert.
fn reject_body(state: &AppState, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::Status(StatusCode::UNSUPPORTED_MEDIA_TYPE)
        }
        rejection => BadRequestAlert::malformed_body(state.app_name.clone(), &rejection).into(),
    }
}

/// Returns true if the media type of `value` matches `expected`, ignoring
/// parameters such as `charset`.
fn media_type_is(value: &str, expected: &str) -> bool {
    value
        .split(';')
        .next()
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(expected))
}

/// The `q` weight of one `Accept` entry, 1.0 when absent.
fn quality(media_range: &str) -> f32 {
    media_range
        .split(';')
        .skip(1)
        .find_map(|param| param.trim().strip_prefix("q="))
        .map_or(1.0, |q| q.trim().parse().unwrap_or(0.0))
}

/// Highest weight `accept` gives to `media_type` when it names it.
fn accept_weight(accept: &str, media_type: &str) -> f32 {
    accept
        .split(',')
        .filter(|range| media_type_is(range, media_type))
        .map(quality)
        .fold(0.0, f32::max)
}

/// Streams only when NDJSON is acceptable and ranked above plain JSON.
fn accepts_ndjson(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let ndjson = accept_weight(accept, NDJSON);
    ndjson > 0.0 && ndjson > accept_weight(accept, "application/json")
}

fn is_merge_patch(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|content_type| media_type_is(content_type, MERGE_PATCH_JSON))
}

fn stored_id(point: &Point) -> Result<i64, RepositoryError> {
    point
        .id
        .ok_or_else(|| RepositoryError::Conversion("Stored point has no ID".to_string()))
}

// ============================================================================
// Create Point
// ============================================================================

/// Create a new point (POST /api/points).
pub async fn create_point(
    State(state): State<AppState>,
    payload: Result<Json<PointPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(|rejection| reject_body(&state, rejection))?;
    tracing::debug!(?payload, "REST request to save Point");

    let point = validate_new_point(payload).map_err(|e| alert(&state, e))?;
    let saved = state.point_repo.save(point).await?;
    let id = stored_id(&saved)?;

    tracing::info!(id, "Point created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/points/{id}"))],
        entity_creation_alert(&state.app_name, id),
        Json(saved),
    )
        .into_response())
}

// ============================================================================
// Update Point
// ============================================================================

/// Replace an existing point (PUT /api/points/{id}).
pub async fn update_point(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<PointPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(|rejection| reject_body(&state, rejection))?;
    tracing::debug!(id, ?payload, "REST request to update Point");

    let point = validate_replacement(id, payload).map_err(|e| alert(&state, e))?;

    if !state.point_repo.exists_by_id(id).await? {
        return Err(alert(&state, PointError::IdNotFound).into());
    }

    let saved = state.point_repo.save(point).await?;
    let saved_id = stored_id(&saved)?;

    tracing::info!(id = saved_id, "Point updated");

    Ok((entity_update_alert(&state.app_name, saved_id), Json(saved)).into_response())
}

/// Merge fields into an existing point (PATCH /api/points/{id}).
///
/// Only fields with a value overwrite the stored point.
pub async fn partial_update_point(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    payload: Result<Json<PointPatch>, JsonRejection>,
) -> Result<Response, ApiError> {
    if !is_merge_patch(&headers) {
        return Err(StatusCode::UNSUPPORTED_MEDIA_TYPE.into());
    }

    let Json(patch) = payload.map_err(|rejection| reject_body(&state, rejection))?;
    tracing::debug!(id, ?patch, "REST request to partial update Point");

    validate_patch(id, &patch).map_err(|e| alert(&state, e))?;

    if !state.point_repo.exists_by_id(id).await? {
        return Err(alert(&state, PointError::IdNotFound).into());
    }

    // Deleted between the existence check and the fetch.
    let existing = state
        .point_repo
        .find_by_id(id)
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    let saved = state.point_repo.save(merge_point(existing, patch)).await?;
    let saved_id = stored_id(&saved)?;

    tracing::info!(id = saved_id, "Point partially updated");

    Ok((entity_update_alert(&state.app_name, saved_id), Json(saved)).into_response())
}

// ============================================================================
// Read Points
// ============================================================================

/// List points (GET /api/points).
///
/// Returns a JSON array, or one JSON object per line when the client ranks
/// `application/x-ndjson` above `application/json`. The NDJSON body is
/// streamed straight from the store cursor.
pub async fn list_points(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListPointsQuery>,
) -> Result<Response, ApiError> {
    let streaming = accepts_ndjson(&headers);
    tracing::debug!(?query, streaming, "REST request to get all Points");

    let page = query.page_request()?;
    let points = state.point_repo.find_all_by(page, query.criteria());

    if !streaming {
        let points: Vec<Point> = points.try_collect().await?;
        return Ok(Json(points).into_response());
    }

    let lines = points
        .map(|point| {
            let mut line = serde_json::to_vec(&point?)
                .map_err(|e| RepositoryError::Conversion(e.to_string()))?;
            line.push(b'\n');
            Ok::<_, RepositoryError>(line)
        })
        .inspect_err(|e| tracing::error!(error = %e, "Point stream failed"));

    Ok(([(header::CONTENT_TYPE, NDJSON)], Body::from_stream(lines)).into_response())
}

/// Get a point by ID (GET /api/points/{id}).
pub async fn get_point(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    tracing::debug!(id, "REST request to get Point");

    let point = state
        .point_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| RepositoryError::NotFound {
            entity_type: POINT_ENTITY,
            id: id.to_string(),
        })?;

    Ok(Json(point).into_response())
}

// ============================================================================
// Delete Point
// ============================================================================

/// Delete a point (DELETE /api/points/{id}).
///
/// Succeeds whether or not the point existed.
pub async fn delete_point(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    tracing::debug!(id, "REST request to delete Point");

    let deleted = state.point_repo.delete_by_id(id).await?;
    tracing::info!(id, deleted, "Point deleted");

    Ok((StatusCode::NO_CONTENT, entity_deletion_alert(&state.app_name, id)).into_response())
}
