use std::fmt;

#[derive(Debug)]
pub enum AppError {
    DatabaseUnavailable,
    DatabaseError(String),
    UploadError(String),
    InvalidRequest(String),
    ConfigError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseUnavailable => write!(f, "Database is not connected"),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::UploadError(msg) => write!(f, "Upload error: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::UploadError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(AppError::DatabaseUnavailable.to_string(), "Database is not connected");
        assert_eq!(
            AppError::InvalidRequest("missing id".to_string()).to_string(),
            "Invalid request: missing id"
        );
    }

    #[test]
    fn test_io_error_becomes_upload_error() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(matches!(err, AppError::UploadError(msg) if msg == "disk full"));
    }
}
