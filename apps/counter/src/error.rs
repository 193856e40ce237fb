//! # API Error Type
//!
//! Unified error type for counter commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Madang Counter                     │
//! │                                                                         │
//! │  Operator                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  order> price: 8,000                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ─── ValidationError::InvalidFormat ──┐       │  │
//! │  │         │                                               │       │  │
//! │  │         ▼                                               ▼       │  │
//! │  │  Database Error? ─── DbError::QueryFailed("...") ──► ApiError ─►│  │
//! │  │         │              (raw text logged only)                    │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  [VALIDATION_ERROR] price has invalid format: digits only              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! `--json` output prints failures as `{ "code": ..., "message": ... }`.

use madang_core::{CoreError, ValidationError};
use madang_db::DbError;
use serde::Serialize;

use crate::state::ConfigError;

/// Error returned from counter commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Book not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Operator-facing message (never raw database text)
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Customer or book does not exist
    NotFound,

    /// Operator input rejected before any query ran
    ValidationError,

    /// New customer needs an address before ordering
    CustomerDetailsRequired,

    /// Name already registered
    Duplicate,

    /// Database operation failed
    DatabaseError,

    /// First-run bootstrap failed (fatal)
    BootstrapFailed,

    /// Configuration could not be loaded (fatal)
    ConfigError,

    /// Terminal I/O failed
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::Duplicate,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::Domain(e) => ApiError::from(e),
            DbError::BootstrapFailed { path, reason } => {
                tracing::error!(path = %path.display(), %reason, "Bootstrap failed");
                ApiError::new(
                    ErrorCode::BootstrapFailed,
                    format!("Could not load seed data from {}", path.display()),
                )
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NewCustomerDetailsRequired { name } => ApiError::new(
                ErrorCode::CustomerDetailsRequired,
                format!("'{}' is a new customer: enter an address to register", name),
            ),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        tracing::warn!(error = %err, "Input rejected");
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Terminal I/O failed: {}", err);
        ApiError::internal("Terminal I/O failed")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = serde_json::to_value(self.code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_else(|| format!("{:?}", self.code));
        write!(f, "[{}] {}", code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for counter commands.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_query_text_is_not_surfaced() {
        let err = ApiError::from(DbError::QueryFailed("near \"SELEC\": syntax error".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("SELEC"));
    }

    #[test]
    fn test_validation_maps_through_db_error() {
        let db_err: DbError = ValidationError::Required {
            field: "price".to_string(),
        }
        .into();
        let err = ApiError::from(db_err);
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "price is required");
    }

    #[test]
    fn test_details_required_code() {
        let err = ApiError::from(DbError::Domain(CoreError::NewCustomerDetailsRequired {
            name: "손흥민".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::CustomerDetailsRequired);
    }

    #[test]
    fn test_display_and_json() {
        let err = ApiError::not_found("Book", "42");
        assert_eq!(err.to_string(), "[NOT_FOUND] Book not found: 42");

        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"NOT_FOUND","message":"Book not found: 42"}"#);
    }
}
