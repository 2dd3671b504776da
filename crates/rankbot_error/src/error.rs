//! Top-level error wrapper types.

use crate::{ConfigError, ServiceError, StorageError, TransportError};

/// Every error a rankbot component can surface.
///
/// # Examples
///
/// ```
/// use rankbot_error::{RankbotError, TransportError, TransportErrorKind};
///
/// let err: RankbotError = TransportError::new(TransportErrorKind::Closed).into();
/// assert!(format!("{}", err).contains("closed"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RankbotErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Cache file error
    #[from(StorageError)]
    Storage(StorageError),
    /// Chat transport error
    #[from(TransportError)]
    Transport(TransportError),
    /// Upstream service error
    #[from(ServiceError)]
    Service(ServiceError),
}

/// Rankbot error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Rankbot Error: {}", _0)]
pub struct RankbotError(Box<RankbotErrorKind>);

impl RankbotError {
    /// Create a new error from a kind.
    pub fn new(kind: RankbotErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RankbotErrorKind {
        &self.0
    }
}

impl<T> From<T> for RankbotError
where
    T: Into<RankbotErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for rankbot operations.
pub type RankbotResult<T> = std::result::Result<T, RankbotError>;
