//! # Service Error Type
//!
//! Unified error type for the catalog and checkout services.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shopfront                              │
//! │                                                                         │
//! │  Service call                                                           │
//! │  Result<T, ServiceError>                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Validator keys? ──── Vec<ErrorKey> ──────────► Validation(keys)       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Mapping input?  ──── CoreError ──────────────► Core / InvalidArgument │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Store failure?  ──── DbError::QueryFailed ───► Db                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ErrorPayload { code, message, details } ──► caller (localized text)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use shopfront_core::{CoreError, ErrorKey, Localizer};
use shopfront_db::DbError;

/// Errors returned by the services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed validation; nothing was persisted.
    #[error("Validation failed: {}", join_keys(.0))]
    Validation(Vec<ErrorKey>),

    /// Strict lookup failed.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: i64 },

    /// A required argument was absent.
    #[error("Invalid argument: {0} is required")]
    InvalidArgument(String),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    CartEmpty,

    /// Store failure.
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// Core mapping failure.
    #[error(transparent)]
    Core(CoreError),
}

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

fn join_keys(keys: &[ErrorKey]) -> String {
    keys.iter()
        .map(ErrorKey::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ServiceError {
    /// Creates a not found error.
    pub fn not_found(entity: &str, id: i64) -> Self {
        ServiceError::NotFound {
            entity: entity.to_string(),
            id,
        }
    }

    /// Machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Validation(_) => ErrorCode::ValidationError,
            ServiceError::NotFound { .. } => ErrorCode::NotFound,
            ServiceError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            ServiceError::CartEmpty => ErrorCode::CartError,
            ServiceError::Db(DbError::NotFound { .. }) => ErrorCode::NotFound,
            ServiceError::Db(_) => ErrorCode::DatabaseError,
            ServiceError::Core(CoreError::InvalidArgument { .. }) => ErrorCode::InvalidArgument,
            ServiceError::Core(CoreError::Parse(_)) => ErrorCode::ValidationError,
        }
    }

    /// Validation keys carried by this error, empty for other kinds.
    pub fn keys(&self) -> &[ErrorKey] {
        match self {
            ServiceError::Validation(keys) => keys,
            _ => &[],
        }
    }

    /// Builds the payload shown to a shopper, localizing validation keys.
    ///
    /// Store failures are logged and reported with a generic message.
    pub fn to_payload(&self, localizer: &dyn Localizer) -> ErrorPayload {
        let message = match self {
            ServiceError::Validation(_) => "Please correct the highlighted fields".to_string(),
            ServiceError::Db(DbError::NotFound { .. }) => self.to_string(),
            ServiceError::Db(e) => {
                tracing::error!(error = %e, "Store operation failed");
                "Database operation failed".to_string()
            }
            other => other.to_string(),
        };

        ErrorPayload {
            code: self.code(),
            message,
            details: localizer
                .lookup_all(self.keys())
                .into_iter()
                .map(|text| text.into_owned())
                .collect(),
        }
    }
}

/// Maps core errors, lifting the invalid-argument case.
impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidArgument { argument } => ServiceError::InvalidArgument(argument),
            other => ServiceError::Core(other),
        }
    }
}

/// Error codes for service responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Required argument missing (400)
    InvalidArgument,

    /// Cart operation failed
    CartError,

    /// Database operation failed (500)
    DatabaseError,
}

/// What a caller receives when a service call fails.
///
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Please correct the highlighted fields",
///   "details": ["Name is required"]
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
    pub details: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::{CatalogLocalizer, Locale, ParseError};

    #[test]
    fn test_core_errors_are_lifted() {
        let err = ServiceError::from(CoreError::invalid_argument("price"));
        assert!(matches!(err, ServiceError::InvalidArgument(ref a) if a == "price"));

        let err = ServiceError::not_found("Product", 4);
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.to_string(), "Product not found: 4");

        let err = ServiceError::from(CoreError::Parse(ParseError::Empty));
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_db_not_found_keeps_not_found_code() {
        let err = ServiceError::from(DbError::not_found("Product", 9));
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = ServiceError::from(DbError::PoolExhausted);
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn test_validation_payload_is_localized() {
        let err = ServiceError::Validation(vec![ErrorKey::MissingName, ErrorKey::MissingPrice]);
        let payload = err.to_payload(&CatalogLocalizer::new(Locale::En));

        assert_eq!(payload.code, ErrorCode::ValidationError);
        assert_eq!(payload.details.len(), 2);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[test]
    fn test_validation_display_lists_keys() {
        let err = ServiceError::Validation(vec![ErrorKey::MissingStock, ErrorKey::StockNotAnInteger]);
        assert_eq!(
            err.to_string(),
            format!(
                "Validation failed: {}, {}",
                ErrorKey::MissingStock.as_str(),
                ErrorKey::StockNotAnInteger.as_str()
            )
        );
    }

    #[test]
    fn test_store_failure_message_is_generic() {
        let err = ServiceError::from(DbError::QueryFailed("disk I/O error".into()));
        let payload = err.to_payload(&CatalogLocalizer::default());

        assert_eq!(payload.message, "Database operation failed");
        assert!(payload.details.is_empty());
    }
}
