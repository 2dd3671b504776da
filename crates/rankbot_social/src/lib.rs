//! Twitch chat integration for rankbot.
//!
//! # Architecture
//!
//! - [`irc`]: frame parsing, bounded line reading, and the login handshake
//! - [`CommandRegistry`]: normalized command token to [`CommandSpec`]
//! - [`RemoteOperations`]: the seam between chat and the stat services, with
//!   [`StatOperations`] as the production implementation
//! - [`Dispatcher`]: the single task that reads frames, enforces cooldowns,
//!   and writes replies
//!
//! [`CommandSpec`]: rankbot_core::CommandSpec
//!
//! # Example
//!
//! ```rust,ignore
//! use rankbot_social::{CommandRegistry, Dispatcher, irc};
//!
//! let registry = CommandRegistry::load("commands.json")?;
//! let connection = irc::connect(irc::TWITCH_IRC_ADDR, &login, irc::DEFAULT_MAX_FRAME_LEN).await?;
//! let mut dispatcher = Dispatcher::new(connection, login.channel(), registry, operations);
//! dispatcher.run().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dispatcher;
pub mod irc;
mod operations;
mod registry;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use operations::{OperationError, OperationResult, RemoteOperations, StatOperations};
pub use registry::CommandRegistry;
