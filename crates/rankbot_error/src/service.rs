//! Upstream service error types.
//!
//! These never crash the bot: the dispatcher turns them into a fixed chat
//! phrase and logs the detail.

/// Error kinds for upstream calls.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ServiceErrorKind {
    /// Request could not be sent or timed out
    #[display("HTTP request failed: {}", _0)]
    Http(String),

    /// Upstream answered with a non-success status
    #[display("Request failed {}: {}", status, body)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for the log
        body: String,
    },

    /// Upstream answered 404
    #[display("Not found: {}", _0)]
    NotFound(String),

    /// Response body did not decode
    #[display("Failed to deserialize response: {}", _0)]
    Decode(String),

    /// No bearer credential has been obtained yet
    #[display("Credential unavailable: {}", _0)]
    CredentialUnavailable(String),

    /// The channel is not currently live
    #[display("Stream not live: {}", _0)]
    NotLive(String),
}

/// Service error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Service Error: {} at line {} in {}", kind, line, file)]
pub struct ServiceError {
    /// The error kind
    pub kind: ServiceErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ServiceError {
    /// Create a new ServiceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServiceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when upstream reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ServiceErrorKind::NotFound(_))
    }
}

/// Result type for upstream calls.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
