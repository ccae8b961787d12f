//! SQLite error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `pointbook_core::storage`.
//! Database errors are mapped by kind (e.g., UNIQUE constraint to AlreadyExists).

use pointbook_core::storage::RepositoryError;
use sqlx::error::ErrorKind;

/// Maps a sqlx error to a RepositoryError.
///
/// # Error Mapping
///
/// - UNIQUE / PRIMARY KEY violations → `RepositoryError::AlreadyExists`
/// - NOT NULL, CHECK and FOREIGN KEY violations → `RepositoryError::InvalidData`
/// - Column decode failures → `RepositoryError::Conversion`
/// - Pool and I/O failures → `RepositoryError::ConnectionFailed`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, entity_type: &'static str) -> RepositoryError {
    map_sqlx_error_with_id(err, entity_type, "unknown")
}

/// Maps a sqlx error with a known ID to a RepositoryError.
///
/// Use this variant when the entity ID is known at the call site.
pub fn map_sqlx_error_with_id(
    err: sqlx::Error,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation => RepositoryError::AlreadyExists {
                entity_type,
                id: id.into(),
            },
            ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation
            | ErrorKind::ForeignKeyViolation => {
                RepositoryError::InvalidData(db_err.message().to_string())
            }
            _ => RepositoryError::QueryFailed(err.to_string()),
        },

        sqlx::Error::RowNotFound => RepositoryError::NotFound {
            entity_type,
            id: id.into(),
        },

        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. } => {
            RepositoryError::Conversion(err.to_string())
        }

        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_) => RepositoryError::ConnectionFailed(err.to_string()),

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let result = map_sqlx_error_with_id(sqlx::Error::RowNotFound, "Point", "42");

        match result {
            RepositoryError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Point");
                assert_eq!(id, "42");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_missing_column_maps_to_conversion() {
        let err = sqlx::Error::ColumnNotFound("e_id".to_string());

        let result = map_sqlx_error(err, "Point");

        assert!(matches!(result, RepositoryError::Conversion(_)));
    }

    #[test]
    fn test_pool_timeout_maps_to_connection_failed() {
        let result = map_sqlx_error(sqlx::Error::PoolTimedOut, "Point");
        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_protocol_error_maps_to_query_failed() {
        let err = sqlx::Error::Protocol("unexpected message".to_string());

        let result = map_sqlx_error(err, "Point");

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }

    #[tokio::test]
    async fn test_constraint_violations_map_by_kind() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(super::super::schema::CREATE_TABLES)
            .execute(&pool)
            .await
            .unwrap();

        let insert = "INSERT INTO point (id, title) VALUES (1, 'Pier')";
        sqlx::query(insert).execute(&pool).await.unwrap();

        let duplicate = sqlx::query(insert).execute(&pool).await.unwrap_err();
        assert!(matches!(
            map_sqlx_error_with_id(duplicate, "Point", "1"),
            RepositoryError::AlreadyExists {
                entity_type: "Point",
                ..
            }
        ));

        let null_title = sqlx::query("INSERT INTO point (title) VALUES (NULL)")
            .execute(&pool)
            .await
            .unwrap_err();
        assert!(matches!(
            map_sqlx_error(null_title, "Point"),
            RepositoryError::InvalidData(_)
        ));
    }
}
