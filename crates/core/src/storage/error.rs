use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Unable to update {entity_type} with id = {id}")]
    UpdateConflict { entity_type: &'static str, id: i64 },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Column conversion failed: {0}")]
    Conversion(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Point",
            id: "42".to_string(),
        };
        assert_eq!(error.to_string(), "Point not found: 42");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Point",
            id: "7".to_string(),
        };
        assert_eq!(error.to_string(), "Point already exists: 7");
    }

    #[test]
    fn test_repository_error_update_conflict_display() {
        let error = RepositoryError::UpdateConflict {
            entity_type: "Point",
            id: 12,
        };
        assert_eq!(error.to_string(), "Unable to update Point with id = 12");
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("pool timed out".to_string());
        assert_eq!(error.to_string(), "Connection failed: pool timed out");
    }

    #[test]
    fn test_repository_error_conversion_display() {
        let error = RepositoryError::Conversion("e_id: expected INTEGER".to_string());
        assert_eq!(
            error.to_string(),
            "Column conversion failed: e_id: expected INTEGER"
        );
    }

    #[test]
    fn test_repository_error_invalid_data_display() {
        let error = RepositoryError::InvalidData("unknown sort column".to_string());
        assert_eq!(error.to_string(), "Invalid data: unknown sort column");
    }
}
