//! Caches that sit in front of the upstream stat services.
//!
//! - [`LookupTable`]: champion id to name, loaded once from a static file
//! - [`IdentityCache`]: Riot ID to PUUID, persisted to a flat JSON file
//! - [`SessionStatCache`]: wins/losses per stream session, kept for the
//!   process lifetime
//!
//! Each cache owns its own lock. Upstream access goes through the
//! `rankbot_interface` traits so tests can substitute in-memory fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod identity;
mod lookup;
mod session;

pub use identity::IdentityCache;
pub use lookup::LookupTable;
pub use session::SessionStatCache;
