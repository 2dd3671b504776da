//! rankbot: a Twitch chat bot for League of Legends streams.
//!
//! Viewers type commands such as `!rank` or `!bans` in chat; the bot
//! answers from static text or from the Riot and Twitch APIs, throttling
//! each command with its own cooldown.
//!
//! The binary wires the workspace crates together:
//! - [`BotSettings`]: tunables from layered `rankbot.toml` files
//! - [`BotEnv`]: secrets and identity from the environment
//! - [`init_observability`]: log subscriber
//! - [`run`]: the startup sequence and the dispatch loop

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cli;
mod config;
mod env;
mod observability;
mod startup;

pub use cli::Cli;
pub use config::{BotSettings, CredentialSettings, HttpSettings, IrcSettings, PathSettings};
pub use env::BotEnv;
pub use observability::{ObservabilityConfig, init_observability};
pub use startup::{commands_path, run};
