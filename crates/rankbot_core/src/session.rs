//! Aggregated stats over one stream session.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Composite key of the session stat cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    /// Player PUUID
    pub puuid: String,
    /// Unix seconds at which the window opened
    pub window_start: i64,
}

impl SessionKey {
    /// Build a key for a player and window start.
    pub fn new(puuid: impl Into<String>, window_start: i64) -> Self {
        Self {
            puuid: puuid.into(),
            window_start,
        }
    }
}

/// Wins, losses, and league point estimates for one window.
///
/// `lp_start` is derived by subtracting the net win/loss count from the
/// current league points, one point per game. It is an estimate, not a
/// historical reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatEntry {
    /// Games won in the window
    pub wins: u32,
    /// Games lost in the window
    pub losses: u32,
    /// Percentage of games won, 0 when no games were played
    pub winrate: f64,
    /// Estimated league points at window start, per queue type
    pub lp_start: HashMap<String, i64>,
    /// League points at computation time, per queue type
    pub lp_end: HashMap<String, i64>,
    /// Unix seconds when the entry was computed
    pub computed_at: i64,
}

impl SessionStatEntry {
    /// Percentage of `wins` over all games, or exactly 0 for no games.
    ///
    /// # Examples
    ///
    /// ```
    /// use rankbot_core::SessionStatEntry;
    ///
    /// assert_eq!(SessionStatEntry::winrate_of(0, 0), 0.0);
    /// assert_eq!(SessionStatEntry::winrate_of(3, 1), 75.0);
    /// ```
    pub fn winrate_of(wins: u32, losses: u32) -> f64 {
        let total = wins + losses;
        if total == 0 {
            return 0.0;
        }
        f64::from(wins) / f64::from(total) * 100.0
    }

    /// Total games counted.
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }
}
