// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// Stable wire-level error codes, grouped by entity.
pub mod codes {
    // User errors
    pub const USER_NOT_FOUND: &str = "USER_001";
    pub const USER_ALREADY_EXISTS: &str = "USER_002";
    pub const INVALID_CREDENTIALS: &str = "USER_003";
    pub const USER_VALIDATION_FAILED: &str = "USER_004";

    // Topic errors
    pub const TOPIC_NOT_FOUND: &str = "TOPIC_001";
    pub const TOPIC_VALIDATION_FAILED: &str = "TOPIC_003";

    // Task errors
    pub const TASK_NOT_FOUND: &str = "TASK_001";
    pub const TASK_VALIDATION_FAILED: &str = "TASK_003";

    // Todo errors
    pub const TODO_NOT_FOUND: &str = "TODO_001";
    pub const TODO_VALIDATION_FAILED: &str = "TODO_003";

    // System errors
    pub const SYSTEM_ERROR: &str = "SYS_001";
}

/// HTTP API error with a stable code and client-friendly message.
///
/// Business failures are raised as typed service errors and converted into
/// one of these variants at the handler boundary; the HTTP status never
/// changes in translation.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation { code: &'static str, message: String },

    // 401 Unauthorized
    Unauthorized { code: &'static str, message: String },

    // 404 Not Found
    NotFound { code: &'static str, message: String },

    // 409 Conflict
    Conflict { code: &'static str, message: String },

    // 500 Internal Server Error
    Internal { code: &'static str, message: String },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation { message, .. }
            | ApiError::Unauthorized { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Conflict { message, .. }
            | ApiError::Internal { message, .. } => message,
        }
    }

    /// Get wire-level error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { code, .. }
            | ApiError::Unauthorized { code, .. }
            | ApiError::NotFound { code, .. }
            | ApiError::Conflict { code, .. }
            | ApiError::Internal { code, .. } => code,
        }
    }

    /// Convert to the JSON error envelope
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error_code": self.error_code(),
            "message": self.message(),
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Validation { code, message: message.into() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized { code: codes::INVALID_CREDENTIALS, message: message.into() }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::NotFound { code, message: message.into() }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Conflict { code, message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal { code: codes::SYSTEM_ERROR, message: message.into() }
    }
}

// Convert service error types to ApiError
impl From<crate::services::user_service::UserError> for ApiError {
    fn from(err: crate::services::user_service::UserError) -> Self {
        use crate::services::user_service::UserError;
        match err {
            UserError::Validation(msg) => ApiError::validation(codes::USER_VALIDATION_FAILED, msg),
            UserError::AlreadyExists(_) => {
                let message = err.to_string();
                ApiError::conflict(codes::USER_ALREADY_EXISTS, message)
            }
            // One variant for both unknown-username and wrong-password so the
            // wire response is byte-identical in either case
            UserError::InvalidCredentials => ApiError::unauthorized(err.to_string()),
            UserError::NotFound(_) => {
                let message = err.to_string();
                ApiError::not_found(codes::USER_NOT_FOUND, message)
            }
            UserError::Token(e) => {
                tracing::error!("token issuance failed: {}", e);
                ApiError::internal("An error occurred while processing your request")
            }
            UserError::PasswordHash(msg) => {
                tracing::error!("password hashing failed: {}", msg);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl From<crate::services::topic_service::TopicError> for ApiError {
    fn from(err: crate::services::topic_service::TopicError) -> Self {
        use crate::services::topic_service::TopicError;
        match err {
            TopicError::Validation(msg) => ApiError::validation(codes::TOPIC_VALIDATION_FAILED, msg),
            TopicError::UserNotFound(_) => {
                let message = err.to_string();
                ApiError::not_found(codes::USER_NOT_FOUND, message)
            }
            TopicError::NotFound(_) => {
                let message = err.to_string();
                ApiError::not_found(codes::TOPIC_NOT_FOUND, message)
            }
        }
    }
}

impl From<crate::services::task_service::TaskError> for ApiError {
    fn from(err: crate::services::task_service::TaskError) -> Self {
        use crate::services::task_service::TaskError;
        match err {
            TaskError::Validation(msg) => ApiError::validation(codes::TASK_VALIDATION_FAILED, msg),
            TaskError::TopicNotFound(_) => {
                let message = err.to_string();
                ApiError::not_found(codes::TOPIC_NOT_FOUND, message)
            }
            TaskError::NotFound(_) => {
                let message = err.to_string();
                ApiError::not_found(codes::TASK_NOT_FOUND, message)
            }
        }
    }
}

impl From<crate::services::todo_service::TodoError> for ApiError {
    fn from(err: crate::services::todo_service::TodoError) -> Self {
        use crate::services::todo_service::TodoError;
        match err {
            TodoError::Validation(msg) => ApiError::validation(codes::TODO_VALIDATION_FAILED, msg),
            TodoError::TaskNotFound(_) => {
                let message = err.to_string();
                ApiError::not_found(codes::TASK_NOT_FOUND, message)
            }
            TodoError::NotFound(_) => {
                let message = err.to_string();
                ApiError::not_found(codes::TODO_NOT_FOUND, message)
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
