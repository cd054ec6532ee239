//! Domain error model.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type used across the ledger crates.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a precondition violation: the caller handed the core
/// something it cannot work with. None of them are retried internally; they
/// abort the current call and propagate. An unbalanced transaction is only an
/// error when the caller asks for one through `Transaction::validate`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Account name does not follow the ledger account grammar.
    #[error("invalid account name: {0:?}")]
    InvalidAccountName(String),

    /// A transaction was rendered without a date.
    #[error("transaction has no date")]
    MissingDate,

    /// A transaction was rendered without a (non-empty) payee.
    #[error("transaction has no payee")]
    MissingPayee,

    /// Text could not be read as an exact decimal.
    #[error("invalid decimal: {0:?}")]
    InvalidDecimal(String),

    /// Exact arithmetic left the representable range.
    #[error("decimal overflow: {0}")]
    Overflow(String),

    /// The postings of a transaction do not sum to zero.
    #[error("transaction unbalanced by {imbalance}")]
    Unbalanced { imbalance: Decimal },

    /// A balance snapshot did not have the flat name -> decimal-string shape.
    #[error("malformed balance snapshot: {0}")]
    MalformedSnapshot(String),

    /// A balance snapshot named an account the resolver does not know.
    #[error("unknown account: {0:?}")]
    UnknownAccount(String),
}

impl DomainError {
    pub fn invalid_account_name(name: impl Into<String>) -> Self {
        Self::InvalidAccountName(name.into())
    }

    pub fn invalid_decimal(text: impl Into<String>) -> Self {
        Self::InvalidDecimal(text.into())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }

    pub fn malformed_snapshot(msg: impl Into<String>) -> Self {
        Self::MalformedSnapshot(msg.into())
    }

    pub fn unknown_account(name: impl Into<String>) -> Self {
        Self::UnknownAccount(name.into())
    }
}
