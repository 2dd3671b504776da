//! Error types for rankbot.
//!
//! Every concern gets its own error struct that records the source location
//! where it was raised:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with `#[track_caller]` location capture
//! - [`RankbotError`] boxes any of them for crate-boundary propagation
//!
//! # Examples
//!
//! ```
//! use rankbot_error::{ConfigError, RankbotResult};
//!
//! fn read_channel() -> RankbotResult<String> {
//!     Err(ConfigError::new("TWITCH_CHANNEL is not set"))?
//! }
//!
//! assert!(read_channel().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod service;
mod storage;
mod transport;

pub use config::ConfigError;
pub use error::{RankbotError, RankbotErrorKind, RankbotResult};
pub use service::{ServiceError, ServiceErrorKind, ServiceResult};
pub use storage::{StorageError, StorageErrorKind};
pub use transport::{TransportError, TransportErrorKind};
