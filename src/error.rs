use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A record violated the caller contract (zero shelf life, missing category)
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Model fitting failed
    #[error("Training error: {0}")]
    Training(String),

    /// Storage collaborator errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::InvalidRecord(_) => "INVALID_RECORD",
            AppError::Training(_) => "TRAINING_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
        }
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidRecord(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::InvalidRecord("test".to_string()).error_code(),
            "INVALID_RECORD"
        );
        assert_eq!(
            AppError::Training("test".to_string()).error_code(),
            "TRAINING_ERROR"
        );
        assert_eq!(
            AppError::NotFound("test".to_string()).error_code(),
            "NOT_FOUND"
        );
    }

    #[test]
    fn test_error_display() {
        let err = AppError::InvalidRecord("shelf_life_days must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid record: shelf_life_days must be > 0"
        );
    }
}
