//! HTTP Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// An HTTP error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for HTTP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum number of characters of a response body kept for diagnostics.
pub const BODY_SNIPPET_CHARS: usize = 200;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Upstream answered with a non-2xx status.
    #[display("upstream responded with status {code}: {body}")]
    Status {
        code: u16,
        /// The start of the response body.
        #[error(not(source))]
        body: String,
    },
    /// The request did not complete in time.
    #[display("request timed out")]
    Timeout,
    /// Connection-level failure (DNS, TLS, reset, etc.)
    #[display("network error: {_0}")]
    Network(#[error(not(source))] String),
    /// The response body was not valid JSON.
    #[display("response body is not valid JSON")]
    InvalidJson,
}

impl ErrorKind {
    /// Builds a [`Status`](Self::Status) error, keeping only the first
    /// [`BODY_SNIPPET_CHARS`] characters of `body`.
    pub fn status(code: u16, body: &str) -> Self {
        Self::Status {
            code,
            body: body.chars().take(BODY_SNIPPET_CHARS).collect(),
        }
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { code, .. } => *code == 429 || *code >= 500,
            Self::Timeout | Self::Network(_) => true,
            Self::InvalidJson => false,
        }
    }
}
