//! Per-command cooldowns.
//!
//! Chat commands are throttled per command token, not per user: once a
//! command has been dispatched, nobody can trigger it again until its
//! cooldown has elapsed. Suppressed invocations are silent.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cooldown;

pub use cooldown::{CooldownStatus, CooldownTable};
