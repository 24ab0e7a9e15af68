//! Identifier Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// An identifier error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for identifier operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Encoding requires something to identify.
    #[display("cannot encode an identifier with an empty subject")]
    EmptySubject,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
