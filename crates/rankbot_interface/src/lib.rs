//! Trait definitions for the upstream services rankbot talks to.
//!
//! Caches and command handlers depend on these traits rather than on the
//! HTTP clients, so each layer can be exercised with in-memory fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{CredentialSource, IdentityLookup, LiveGames, MatchHistory, StreamDirectory};
