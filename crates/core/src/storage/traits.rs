use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::point::Point;

use super::{PageRequest, PointCriteria, RepositoryError, Result};

/// Entity type reported in repository errors.
pub const POINT_ENTITY: &str = "Point";

/// Repository for point operations.
#[async_trait]
pub trait PointRepository: Send + Sync {
    /// Streams points matching the optional criteria and page.
    ///
    /// The query runs when the stream is first polled and is re-executed for
    /// every call. Dropping the stream stops fetching rows.
    fn find_all_by(
        &self,
        page: Option<PageRequest>,
        criteria: Option<PointCriteria>,
    ) -> BoxStream<'static, Result<Point>>;

    /// Streams every stored point.
    fn find_all(&self) -> BoxStream<'static, Result<Point>> {
        self.find_all_by(None, None)
    }

    /// Gets a point by its ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Point>>;

    /// Returns true if a point with this ID is stored.
    async fn exists_by_id(&self, id: i64) -> Result<bool>;

    /// Counts stored points.
    async fn count(&self) -> Result<u64>;

    /// Inserts a transient point and returns it with its assigned ID.
    async fn insert(&self, point: &Point) -> Result<Point>;

    /// Replaces the mutable fields of a persisted point.
    ///
    /// Returns the number of rows affected (0 or 1).
    async fn update(&self, point: &Point) -> Result<u64>;

    /// Deletes a point by its ID and returns the number of rows affected.
    ///
    /// Deleting a missing point is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<u64>;

    /// Checks that the store answers a trivial round trip.
    async fn ping(&self) -> Result<()>;

    /// Inserts a transient point or updates a persisted one.
    ///
    /// An update that touches no row means the point vanished since the
    /// caller last saw it and fails with [`RepositoryError::UpdateConflict`].
    async fn save(&self, point: Point) -> Result<Point> {
        let Some(id) = point.id else {
            return self.insert(&point).await;
        };

        if self.update(&point).await? == 0 {
            return Err(RepositoryError::UpdateConflict {
                entity_type: POINT_ENTITY,
                id,
            });
        }

        Ok(point)
    }
}
