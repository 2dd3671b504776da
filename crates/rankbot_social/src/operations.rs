//! Remote operations behind `api` commands.

use async_trait::async_trait;
use rankbot_cache::{LookupTable, SessionStatCache};
use rankbot_core::{LeagueEntry, RemoteOperation, SOLO_QUEUE};
use rankbot_error::{ServiceError, ServiceErrorKind};
use rankbot_interface::{LiveGames, MatchHistory, StreamDirectory};
use std::sync::Arc;
use tracing::{debug, instrument};

const STREAM_INFO_FAILED: &str = "Error fetching stream info.";
const RANK_INFO_FAILED: &str = "Error fetching rank info.";
const STREAM_STATS_FAILED: &str = "Error fetching stream stats.";
const NOT_IN_MATCH: &str = "Not in an Active Match";

/// A failed operation: the fixed phrase shown in chat and the cause for the
/// log.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("{}: {}", phrase, source)]
pub struct OperationError {
    /// Text sent to chat in place of a result
    pub phrase: &'static str,
    /// Underlying upstream failure
    pub source: ServiceError,
}

impl OperationError {
    fn new(phrase: &'static str, source: ServiceError) -> Self {
        Self { phrase, source }
    }
}

/// Result of a remote operation.
pub type OperationResult = Result<String, OperationError>;

/// Runs the remote operation bound to an `api` command.
///
/// The dispatcher knows nothing about upstream services; everything it needs
/// comes through this trait, which makes it easy to drive with a fake.
#[async_trait]
pub trait RemoteOperations: Send + Sync {
    /// Produce the reply text (without the sender mention).
    async fn run(&self, operation: RemoteOperation) -> OperationResult;
}

/// Operations backed by the stat services and caches for one channel and
/// one tracked player.
pub struct StatOperations {
    channel: String,
    puuid: String,
    streams: Arc<dyn StreamDirectory>,
    history: Arc<dyn MatchHistory>,
    games: Arc<dyn LiveGames>,
    sessions: Arc<SessionStatCache>,
    champions: Arc<LookupTable>,
}

impl StatOperations {
    /// Wire the operations to their collaborators.
    pub fn new(
        channel: impl Into<String>,
        puuid: impl Into<String>,
        streams: Arc<dyn StreamDirectory>,
        history: Arc<dyn MatchHistory>,
        games: Arc<dyn LiveGames>,
        sessions: Arc<SessionStatCache>,
        champions: Arc<LookupTable>,
    ) -> Self {
        Self {
            channel: channel.into(),
            puuid: puuid.into(),
            streams,
            history,
            games,
            sessions,
            champions,
        }
    }

    async fn stream_info(&self) -> OperationResult {
        let stream = self
            .streams
            .live_stream(&self.channel)
            .await
            .map_err(|e| OperationError::new(STREAM_INFO_FAILED, e))?;

        Ok(match stream {
            Some(stream) => format!("Title: {} | Game: {}", stream.title, stream.game_name),
            None => "Stream is offline.".to_string(),
        })
    }

    async fn rank_info(&self) -> OperationResult {
        let entries = self
            .history
            .league_entries(&self.puuid)
            .await
            .map_err(|e| OperationError::new(RANK_INFO_FAILED, e))?;

        Ok(match ranked_entry(&entries) {
            Some(entry) => format!(
                "Current Rank: {} {} {}",
                entry.tier, entry.rank, entry.league_points
            ),
            None => "Unranked.".to_string(),
        })
    }

    async fn stream_stats(&self) -> OperationResult {
        let stream = self
            .streams
            .live_stream(&self.channel)
            .await
            .map_err(|e| OperationError::new(STREAM_INFO_FAILED, e))?
            .ok_or_else(|| {
                OperationError::new(
                    STREAM_INFO_FAILED,
                    ServiceError::new(ServiceErrorKind::NotLive(self.channel.clone())),
                )
            })?;

        let window_start = stream.started_at.timestamp();
        debug!(window_start, "Stream session window");
        let stats = self
            .sessions
            .stats(&self.puuid, window_start)
            .await
            .map_err(|e| OperationError::new(STREAM_STATS_FAILED, e))?;

        Ok(format!(
            "Wins: {} | Loss: {} | Winrate: {:.2}%",
            stats.wins, stats.losses, stats.winrate
        ))
    }

    /// Not being in a game (spectator 404) is reported as an error phrase,
    /// not as an empty ban list.
    async fn current_bans(&self) -> OperationResult {
        let game = self
            .games
            .active_game(&self.puuid)
            .await
            .map_err(|e| OperationError::new(NOT_IN_MATCH, e))?;

        let names: Vec<String> = game
            .banned_champions
            .iter()
            .filter(|ban| ban.champion_id >= 0)
            .map(|ban| self.champions.name(ban.champion_id))
            .collect();

        if names.is_empty() {
            Ok("Banned Champions: none".to_string())
        } else {
            Ok(format!("Banned Champions: {}", names.join(", ")))
        }
    }
}

impl std::fmt::Debug for StatOperations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatOperations")
            .field("channel", &self.channel)
            .field("puuid", &self.puuid)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RemoteOperations for StatOperations {
    #[instrument(skip(self), fields(channel = %self.channel))]
    async fn run(&self, operation: RemoteOperation) -> OperationResult {
        match operation {
            RemoteOperation::TwitchStreamInfo => self.stream_info().await,
            RemoteOperation::RiotRankInfo => self.rank_info().await,
            RemoteOperation::StreamStatsInfo => self.stream_stats().await,
            RemoteOperation::CurrentBansInfo => self.current_bans().await,
        }
    }
}

/// The solo queue entry, else whatever queue is listed first.
fn ranked_entry(entries: &[LeagueEntry]) -> Option<&LeagueEntry> {
    entries
        .iter()
        .find(|entry| entry.queue_type == SOLO_QUEUE)
        .or_else(|| entries.first())
}
