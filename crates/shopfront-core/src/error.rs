//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  ├── CoreError   - Missing arguments, unparsable text                  │
//! │  └── ParseError  - Price / stock text that is not a number             │
//! │                                                                         │
//! │  Validation failures are NOT errors: the validator returns a list of   │
//! │  ErrorKey values (see validation.rs).                                  │
//! │                                                                         │
//! │  shopfront-db errors (separate crate)                                  │
//! │  └── DbError     - Database operation failures                         │
//! │                                                                         │
//! │  Flow: ParseError → CoreError → ServiceError                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A required argument was absent or blank.
    ///
    /// ## When This Occurs
    /// - Mapping a `ProductInput` whose price or stock text is blank
    /// - A caller hands over no input at all
    #[error("Invalid argument: {argument} is required")]
    InvalidArgument { argument: String },

    /// Raw text could not be parsed into a number.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl CoreError {
    /// Creates an InvalidArgument error for the named argument.
    pub fn invalid_argument(argument: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            argument: argument.into(),
        }
    }
}

// =============================================================================
// Parse Error
// =============================================================================

/// Failures of the locale-invariant number parsers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing left after trimming whitespace and control characters.
    #[error("no digits in input")]
    Empty,

    /// Not a decimal number.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// Not an integer.
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
