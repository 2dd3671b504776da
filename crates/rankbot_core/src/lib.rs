//! Core data types for rankbot.
//!
//! This crate holds the types shared by the cache, service, and chat layers:
//! command definitions, the normalization rule that turns a chat line into a
//! command token, and the upstream data model.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod credential;
mod identity;
mod normalize;
mod riot;
mod session;
mod stream;

pub use command::{CommandDefinition, CommandKind, CommandSpec, DefinitionKind, RemoteOperation};
pub use credential::Credential;
pub use identity::{IdentityCacheEntry, identity_key};
pub use normalize::normalize;
pub use riot::{
    ActiveGame, BannedChampion, LeagueEntry, MatchDetail, MatchInfo, MatchOutcome,
    MatchParticipant, RiotAccount, SOLO_QUEUE, Summoner,
};
pub use session::{SessionKey, SessionStatEntry};
pub use stream::LiveStream;
