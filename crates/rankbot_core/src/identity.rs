//! Persisted identity mapping from a Riot ID to its stable ids.

use serde::{Deserialize, Serialize};

/// One resolved Riot ID, as stored in `players.json`.
///
/// Never updated after creation: the name to PUUID mapping is treated as
/// permanent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityCacheEntry {
    /// Riot ID name part, as reported by the account service
    pub game_name: String,
    /// Riot ID tag part, as reported by the account service
    pub tag_line: String,
    /// Stable cross-service player id
    pub puuid: String,
    /// Platform-scoped summoner id
    #[serde(default)]
    pub summoner_id: String,
    /// Unix seconds when the entry was created
    pub cached_at: i64,
}

/// Cache key for a Riot ID: `name#tag`.
///
/// # Examples
///
/// ```
/// use rankbot_core::identity_key;
///
/// assert_eq!(identity_key("Faker", "KR1"), "Faker#KR1");
/// ```
pub fn identity_key(game_name: &str, tag_line: &str) -> String {
    format!("{}#{}", game_name, tag_line)
}
