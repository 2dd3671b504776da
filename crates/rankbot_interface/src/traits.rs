//! Upstream service traits.

use async_trait::async_trait;
use rankbot_core::{
    ActiveGame, Credential, LeagueEntry, LiveStream, MatchDetail, RiotAccount, Summoner,
};
use rankbot_error::ServiceResult;

/// Resolves a Riot ID to its account and summoner records.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Account record for `game_name#tag_line`.
    async fn account_by_riot_id(&self, game_name: &str, tag_line: &str)
    -> ServiceResult<RiotAccount>;

    /// Platform summoner record for a PUUID.
    async fn summoner_by_puuid(&self, puuid: &str) -> ServiceResult<Summoner>;
}

/// Match and ranked data for a player.
#[async_trait]
pub trait MatchHistory: Send + Sync {
    /// Ids of matches that started within `[start, end)`, unix seconds.
    async fn match_ids(&self, puuid: &str, start: i64, end: i64) -> ServiceResult<Vec<String>>;

    /// Full detail of one match.
    async fn match_detail(&self, match_id: &str) -> ServiceResult<MatchDetail>;

    /// Current ranked standings, one entry per queue.
    async fn league_entries(&self, puuid: &str) -> ServiceResult<Vec<LeagueEntry>>;
}

/// Games currently in progress.
#[async_trait]
pub trait LiveGames: Send + Sync {
    /// The player's active game. Not being in a game is reported as a
    /// `NotFound` service error.
    async fn active_game(&self, puuid: &str) -> ServiceResult<ActiveGame>;
}

/// Broadcast state of a chat channel.
#[async_trait]
pub trait StreamDirectory: Send + Sync {
    /// The channel's live stream, or `None` when offline.
    async fn live_stream(&self, channel: &str) -> ServiceResult<Option<LiveStream>>;
}

/// Issues bearer credentials.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Obtain a fresh credential.
    async fn fetch(&self) -> ServiceResult<Credential>;
}
