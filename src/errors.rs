use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// No certificate file was supplied with the request.
    NoDocument,
    /// The text-recognition engine failed (corrupt file, engine crash).
    ExtractionFailed(String),
    /// Recognition succeeded but no certificate ID was found in the text.
    MissingCertId,
    /// Bad request error (invalid input).
    BadRequest(String),
    /// Error spooling or removing the uploaded document.
    StorageError(std::io::Error),
    /// Error interacting with an external API.
    ExternalApiError(String),
    /// Internal server error.
    InternalError(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NoDocument => write!(f, "No certificate file uploaded"),
            AppError::ExtractionFailed(msg) => write!(f, "Text recognition failed: {}", msg),
            AppError::MissingCertId => {
                write!(f, "Could not extract certificate ID from the document")
            }
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::StorageError(e) => write!(f, "Storage error: {}", e),
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and JSON body.
    /// Every body carries `success: false` and a human-readable reason, so even
    /// failed verifications render a result the caller can display.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::NoDocument => (
                StatusCode::BAD_REQUEST,
                "No certificate file uploaded".to_string(),
            ),
            AppError::ExtractionFailed(msg) => {
                tracing::error!("OCR engine failure: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Text recognition failed for the uploaded document".to_string(),
                )
            }
            AppError::MissingCertId => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Could not extract certificate ID from the document".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::StorageError(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                )
            }
            AppError::ExternalApiError(msg) => {
                tracing::error!("External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "External service error".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::WithContext { source, context } => {
                // Log full context chain for debugging
                tracing::error!("Error with context: {} -> {}", context, source);
                // Delegate to underlying error's response
                return source.clone().into_response();
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

// Make AppError cloneable for WithContext variant
impl Clone for AppError {
    /// Clones the error.
    ///
    /// Note: `std::io::Error` is not cloneable, so `StorageError` is rebuilt
    /// from its kind and message during cloning.
    fn clone(&self) -> Self {
        match self {
            AppError::NoDocument => AppError::NoDocument,
            AppError::ExtractionFailed(msg) => AppError::ExtractionFailed(msg.clone()),
            AppError::MissingCertId => AppError::MissingCertId,
            AppError::BadRequest(msg) => AppError::BadRequest(msg.clone()),
            AppError::StorageError(e) => {
                AppError::StorageError(std::io::Error::new(e.kind(), e.to_string()))
            }
            AppError::ExternalApiError(msg) => AppError::ExternalApiError(msg.clone()),
            AppError::InternalError(msg) => AppError::InternalError(msg.clone()),
            AppError::WithContext { source, context } => AppError::WithContext {
                source: source.clone(),
                context: context.clone(),
            },
        }
    }
}

impl From<std::io::Error> for AppError {
    /// Converts a `std::io::Error` into an `AppError`.
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err)
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApiError(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Arguments
    ///
    /// * `context` - The context message to add.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    ///
    /// # Arguments
    ///
    /// * `f` - A closure that produces the context message.
    #[allow(dead_code)]
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

/// Extension for std::io::Error to add context
impl<T> ResultExt<T> for Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::StorageError(e)),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::StorageError(e)),
            context: f(),
        })
    }
}
