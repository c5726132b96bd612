//! Service errors and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Object store operation that failed, used to pick the client-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectOperation {
    Read,
    Write,
}

impl ObjectOperation {
    /// Client-facing message when this operation fails
    pub fn message(&self) -> &'static str {
        match self {
            ObjectOperation::Read => "Cannot read from S3 the requested resource !",
            ObjectOperation::Write => "Cannot upload file to S3 !",
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("File does not exists : {path}")]
    NotFound { path: String },

    #[error("Cannot write this file to disk : {path}")]
    WriteFailure {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Cannot read this file from disk : {path}")]
    ReadFailure {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The missing variable is only logged; callers get the operation message.
    #[error("{}", .operation.message())]
    ConfigurationMissing {
        operation: ObjectOperation,
        variable: &'static str,
    },

    /// The cause stays in logs; only the operation message reaches the caller.
    #[error("{}", .operation.message())]
    ObjectStoreFailure {
        operation: ObjectOperation,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, ServiceError>;

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::WriteFailure { .. }
            | ServiceError::ReadFailure { .. }
            | ServiceError::ConfigurationMissing { .. }
            | ServiceError::ObjectStoreFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body, `{"detail": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found = ServiceError::NotFound {
            path: "/tmp/missing.txt".to_string(),
        };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let missing = ServiceError::ConfigurationMissing {
            operation: ObjectOperation::Read,
            variable: "S3_ACCESS_KEY_ID",
        };
        assert_eq!(missing.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let write = ServiceError::WriteFailure {
            path: "/tmp/a.txt".to_string(),
            source: anyhow::anyhow!("disk full"),
        };
        assert_eq!(write.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_message_echoes_path() {
        let err = ServiceError::NotFound {
            path: "/tmp/t/missing.txt".to_string(),
        };
        assert_eq!(err.to_string(), "File does not exists : /tmp/t/missing.txt");
    }

    #[test]
    fn test_object_store_failure_hides_cause() {
        let err = ServiceError::ObjectStoreFailure {
            operation: ObjectOperation::Read,
            source: anyhow::anyhow!("AccessDenied: secret bucket policy"),
        };
        let message = err.to_string();
        assert_eq!(message, "Cannot read from S3 the requested resource !");
        assert!(!message.contains("AccessDenied"));

        // The cause is still reachable for logging
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("AccessDenied"));
    }

    #[test]
    fn test_write_operation_message() {
        let err = ServiceError::ObjectStoreFailure {
            operation: ObjectOperation::Write,
            source: anyhow::anyhow!("timeout"),
        };
        assert_eq!(err.to_string(), "Cannot upload file to S3 !");
    }

    #[test]
    fn test_configuration_missing_hides_variable() {
        let err = ServiceError::ConfigurationMissing {
            operation: ObjectOperation::Write,
            variable: "S3_SECRET_ACCESS_KEY",
        };
        assert_eq!(err.to_string(), "Cannot upload file to S3 !");
        assert!(!err.to_string().contains("S3_SECRET_ACCESS_KEY"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
