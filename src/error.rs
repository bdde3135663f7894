// ⚠️ Error types - one enum per failure seam
// Construction failures name the path that failed so callers can match on it.

use thiserror::Error;

// ============================================================================
// AMOUNT CONSTRUCTION
// ============================================================================

/// Raised when an `Amount` options value fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAmountError {
    /// The options value is not an object
    #[error("provide an amount: options must be an object")]
    NotAnObject,

    /// `domestic` is missing or not an object
    #[error("provide an amount: missing domestic amount")]
    MissingDomestic,

    #[error("provide a valid value for domestic.amount")]
    InvalidDomesticAmount,

    #[error("provide a valid currency for domestic.currency")]
    InvalidDomesticCurrency,

    /// `local` is present but not an object
    #[error("provide a valid local amount")]
    InvalidLocal,

    #[error("provide a valid value for local.amount")]
    InvalidLocalAmount,

    #[error("provide a valid currency for local.currency")]
    InvalidLocalCurrency,
}

// ============================================================================
// ARITHMETIC
// ============================================================================

/// Raised when adding amounts in two different currencies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("amounts cannot be added: {left} and {right} differ")]
pub struct CurrencyMismatchError {
    pub left: String,
    pub right: String,
}

/// Raised when a group summary is requested for no transactions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot sum an empty transaction group")]
pub struct EmptyGroupError;

/// Raised when parsing a grouping strategy name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown grouping strategy: {0:?} (expected day, category, merchant or none)")]
pub struct UnknownStrategyError(pub String);

// ============================================================================
// RECORD WRAPPING
// ============================================================================

/// Raised when a raw API record cannot be wrapped.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid amount in record: {0}")]
    InvalidAmount(#[from] InvalidAmountError),

    #[error("invalid timestamp in `{field}`: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// AUTH
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("auth state mismatch: expected {expected:?}, found {found:?}")]
    StateMismatch { expected: String, found: String },

    #[error("no auth code found")]
    MissingCode,

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
