//! Riot API response types.
//!
//! Only the fields rankbot reads are modelled; everything else in the
//! upstream payloads is ignored.

use serde::{Deserialize, Serialize};

/// Queue type of ranked solo/duo.
pub const SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

/// Account service record for a Riot ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiotAccount {
    /// Stable cross-service player id
    pub puuid: String,
    /// Riot ID name part
    #[serde(default)]
    pub game_name: String,
    /// Riot ID tag part
    #[serde(default)]
    pub tag_line: String,
}

/// Platform-scoped summoner record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summoner {
    /// Summoner id (absent from newer API revisions)
    #[serde(default)]
    pub id: String,
    /// Stable cross-service player id
    pub puuid: String,
}

/// One ranked queue standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntry {
    /// Queue identifier such as `RANKED_SOLO_5x5`
    pub queue_type: String,
    /// Tier such as `GOLD`
    pub tier: String,
    /// Division such as `II`
    pub rank: String,
    /// League points within the division
    pub league_points: i64,
    /// Season wins
    #[serde(default)]
    pub wins: u32,
    /// Season losses
    #[serde(default)]
    pub losses: u32,
}

/// Result of one game for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MatchOutcome {
    /// Player's team won
    Win,
    /// Anything else
    Loss,
}

/// Match detail payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchDetail {
    /// Game information block
    #[serde(default)]
    pub info: MatchInfo,
}

/// Game information block of a match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchInfo {
    /// All ten players
    #[serde(default)]
    pub participants: Vec<MatchParticipant>,
}

/// One player in a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchParticipant {
    /// Player PUUID
    pub puuid: String,
    /// Whether the player's team won
    #[serde(default)]
    pub win: Option<bool>,
}

impl MatchDetail {
    /// Outcome for `puuid`, or `None` when the player is not in the match.
    ///
    /// A participant without an explicit `win: true` counts as a loss.
    pub fn outcome_for(&self, puuid: &str) -> Option<MatchOutcome> {
        self.info
            .participants
            .iter()
            .find(|p| p.puuid == puuid)
            .map(|p| match p.win {
                Some(true) => MatchOutcome::Win,
                _ => MatchOutcome::Loss,
            })
    }
}

/// Spectator payload for a game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGame {
    /// Bans made during champion select
    #[serde(default)]
    pub banned_champions: Vec<BannedChampion>,
}

/// One champion ban.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannedChampion {
    /// Champion id, `-1` for a skipped ban
    pub champion_id: i64,
    /// Ban order
    #[serde(default)]
    pub pick_turn: i64,
    /// Banning team
    #[serde(default)]
    pub team_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_for_reads_win_flag() {
        let detail: MatchDetail = serde_json::from_str(
            r#"{"metadata": {}, "info": {"participants": [
                {"puuid": "a", "win": true, "kills": 3},
                {"puuid": "b", "win": false}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(detail.outcome_for("a"), Some(MatchOutcome::Win));
        assert_eq!(detail.outcome_for("b"), Some(MatchOutcome::Loss));
        assert_eq!(detail.outcome_for("c"), None);
    }

    #[test]
    fn test_missing_win_flag_counts_as_loss() {
        let detail: MatchDetail =
            serde_json::from_str(r#"{"info": {"participants": [{"puuid": "a"}]}}"#).unwrap();
        assert_eq!(detail.outcome_for("a"), Some(MatchOutcome::Loss));
    }

    #[test]
    fn test_league_entry_decodes_camel_case() {
        let entries: Vec<LeagueEntry> = serde_json::from_str(
            r#"[{"queueType": "RANKED_SOLO_5x5", "tier": "GOLD", "rank": "II",
                 "leaguePoints": 42, "wins": 10, "losses": 8, "hotStreak": false}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].league_points, 42);
        assert_eq!(entries[0].queue_type, SOLO_QUEUE);
    }
}
