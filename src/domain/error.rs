//! ETL domain error types

use thiserror::Error;

/// Errors raised while recording queries or creating ETL data sources
#[derive(Debug, Error)]
pub enum EtlError {
    /// A required field is empty
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("chunk_size must be a positive integer, got '{0}'")]
    InvalidChunkSize(String),

    #[error("chunk_size {value} exceeds the maximum of {max}")]
    ChunkSizeTooLarge { value: i64, max: u32 },

    /// The request carries no columns to load
    #[error("No columns to load")]
    NoColumns,

    /// Column names the storage backend would reject
    #[error("Invalid column names: {}", .0.join(", "))]
    InvalidColumnNames(Vec<String>),

    #[error("ETL data source '{0}' already exists")]
    Duplicate(String),

    #[error("Query not found: {0}")]
    QueryNotFound(String),
}

impl EtlError {
    /// Convert to HTTP status code for API responses
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::Duplicate(_) => StatusCode::CONFLICT,
            Self::QueryNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(EtlError::NoColumns.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(EtlError::Duplicate("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(EtlError::QueryNotFound("q".into()).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_names_message() {
        let err = EtlError::InvalidColumnNames(vec!["user id".into(), "count(*)".into()]);
        assert_eq!(err.to_string(), "Invalid column names: user id, count(*)");
    }
}
