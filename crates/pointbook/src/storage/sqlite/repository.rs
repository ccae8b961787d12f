//! SQLite repository implementation.
//!
//! Implements `PointRepository` from `pointbook_core::storage` on top of a
//! `sqlx::SqlitePool`.

use std::str::FromStr;

use async_stream::try_stream;
use async_trait::async_trait;
use futures_util::{stream::BoxStream, Stream, TryStreamExt};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};

use pointbook_core::point::Point;
use pointbook_core::storage::{
    PageRequest, PointCriteria, PointRepository, RepositoryError, Result, POINT_ENTITY,
};

use super::error::{map_sqlx_error, map_sqlx_error_with_id};
use super::query::{build_select, SelectQuery, SqlValue};
use super::row_mapper::row_to_point;
use super::schema;

/// Binds the collected values to their placeholders in order.
fn bind_all<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    binds: Vec<SqlValue>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in binds {
        query = match value {
            SqlValue::Integer(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
        };
    }
    query
}

/// Lazily runs `query`, yielding one point per row.
///
/// Rows are pulled from the connection as the consumer polls, so dropping
/// the stream releases the connection without reading the rest.
fn stream_points(
    pool: SqlitePool,
    query: SelectQuery,
) -> impl Stream<Item = Result<Point>> + Send + 'static {
    try_stream! {
        let SelectQuery { sql, binds } = query;
        let mut rows = bind_all(sqlx::query(&sql), binds).fetch(&pool);

        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| map_sqlx_error(e, POINT_ENTITY))?
        {
            yield row_to_point(&row, schema::ENTITY_ALIAS)
                .map_err(|e| map_sqlx_error(e, POINT_ENTITY))?;
        }
    }
}

/// SQLite-based point repository.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connects to the database at `url` and creates the schema.
    ///
    /// With `mode=rwc` in the URL the database file is created if missing.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        let repo = Self { pool };
        repo.init_schema().await?;

        Ok(repo)
    }

    /// Creates a repository over a private in-memory database.
    ///
    /// Useful for testing - data is lost when the repository is dropped.
    /// The pool holds exactly one connection that is never recycled, since
    /// each SQLite memory connection is its own database.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        let repo = Self { pool };
        repo.init_schema().await?;

        Ok(repo)
    }

    /// Initialize the database schema.
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(schema::CREATE_TABLES)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Closes every pooled connection, waiting for checked-out ones.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl PointRepository for SqliteRepository {
    fn find_all_by(
        &self,
        page: Option<PageRequest>,
        criteria: Option<PointCriteria>,
    ) -> BoxStream<'static, Result<Point>> {
        let query = build_select(page.as_ref(), criteria.as_ref());
        Box::pin(stream_points(self.pool.clone(), query))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Point>> {
        let SelectQuery { sql, binds } = build_select(None, Some(&PointCriteria::by_id(id)));

        let row = bind_all(sqlx::query(&sql), binds)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, POINT_ENTITY, id.to_string()))?;

        row.map(|row| row_to_point(&row, schema::ENTITY_ALIAS))
            .transpose()
            .map_err(|e| map_sqlx_error_with_id(e, POINT_ENTITY, id.to_string()))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(schema::COUNT_POINT_BY_ID)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, POINT_ENTITY, id.to_string()))?;

        Ok(count > 0)
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(schema::COUNT_POINTS)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, POINT_ENTITY))?;

        u64::try_from(count).map_err(|e| RepositoryError::Conversion(e.to_string()))
    }

    async fn insert(&self, point: &Point) -> Result<Point> {
        if point.id.is_some() {
            return Err(RepositoryError::InvalidData(
                "Cannot insert a point that already has an ID".to_string(),
            ));
        }

        let result = sqlx::query(schema::INSERT_POINT)
            .bind(point.title.as_str())
            .bind(point.description.as_deref())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, POINT_ENTITY))?;

        Ok(point.clone().with_id(result.last_insert_rowid()))
    }

    async fn update(&self, point: &Point) -> Result<u64> {
        let Some(id) = point.id else {
            return Err(RepositoryError::InvalidData(
                "Cannot update a point without an ID".to_string(),
            ));
        };

        let result = sqlx::query(schema::UPDATE_POINT)
            .bind(id)
            .bind(point.title.as_str())
            .bind(point.description.as_deref())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, POINT_ENTITY, id.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let result = sqlx::query(schema::DELETE_POINT)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, POINT_ENTITY, id.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query(schema::PING)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, POINT_ENTITY))?;

        Ok(())
    }
}
