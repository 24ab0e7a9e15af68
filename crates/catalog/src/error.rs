//! Catalog Error Types
//!
//! Only [`play`](crate::Catalog::play) and the dispatcher ever hand these to
//! a caller; read operations swallow them and degrade to empty results.

use derive_more::{Display, Error};
use nguonc_http::error::{Error as HttpError, ErrorKind as HttpErrorKind};

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Upstream could not be reached or answered with an error status.
    #[display("upstream request failed")]
    Network,
    /// Upstream did not answer within the configured timeout.
    #[display("upstream request timed out")]
    Timeout,
    /// Upstream answered, but without a recognisable movie record.
    #[display("response contains no movie record")]
    EmptyDetail,
    /// Every resolution strategy failed.
    #[display("nothing found for '{subject}' (tried {})", attempts.join("; "))]
    NotFound { subject: String, attempts: Vec<String> },
    /// The title resolved, but no server carries a playable stream for the
    /// requested episode.
    #[display("no playable stream available for '{_0}'")]
    NoStreams(#[error(not(source))] String),
    #[display("Method {method} not found. Available: {available}")]
    MethodNotFound { method: String, available: String },
    #[display("invalid arguments: {_0}")]
    InvalidArguments(#[error(not(source))] String),
    /// Settings were rejected while building the catalog.
    #[display("invalid configuration")]
    Configuration,
    /// A result could not be encoded for the host.
    #[display("could not encode result")]
    Serialization,
}

impl ErrorKind {
    /// Convert an HTTP error into a catalog error, keeping the HTTP crate's
    /// `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn fetch(err: HttpError) -> Error {
        let kind = match *err {
            HttpErrorKind::Timeout => Self::Timeout,
            _ => Self::Network,
        };
        err.raise(kind)
    }

    pub(crate) fn not_found(subject: &str) -> Self {
        Self::NotFound {
            subject: subject.to_string(),
            attempts: Vec::new(),
        }
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network | Self::Timeout | Self::NotFound { .. })
    }
}
