//! Wins and losses per stream session.

use rankbot_interface::MatchHistory;
use parking_lot::Mutex;
use rankbot_core::{MatchOutcome, SessionKey, SessionStatEntry};
use rankbot_error::ServiceResult;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

/// Memoized session statistics keyed by (PUUID, window start).
///
/// Computing an entry costs one match-list call, one call per match, and a
/// ranked lookup, so results are kept for the lifetime of the process. Each
/// key owns a [`OnceCell`]: its initializer covers the whole check,
/// compute, insert sequence, so concurrent callers for the same window share
/// a single computation while other windows proceed independently. A failed
/// computation leaves the cell empty and the next caller retries.
///
/// Entries are never evicted; window keys are bounded by the number of
/// stream sessions.
pub struct SessionStatCache {
    history: Arc<dyn MatchHistory>,
    cells: Mutex<HashMap<SessionKey, Arc<OnceCell<SessionStatEntry>>>>,
}

impl SessionStatCache {
    /// Create an empty cache backed by `history`.
    pub fn new(history: Arc<dyn MatchHistory>) -> Self {
        Self {
            history,
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Stats for `puuid` over `[window_start, now)`.
    #[instrument(skip(self))]
    pub async fn stats(&self, puuid: &str, window_start: i64) -> ServiceResult<SessionStatEntry> {
        let key = SessionKey::new(puuid, window_start);
        let cell = {
            let mut cells = self.cells.lock();
            Arc::clone(cells.entry(key).or_default())
        };

        if let Some(entry) = cell.get() {
            debug!("Session stats cache hit");
            return Ok(entry.clone());
        }

        cell.get_or_try_init(|| self.compute(puuid, window_start))
            .await
            .cloned()
    }

    /// Cached stats for a window, without computing.
    pub fn cached(&self, puuid: &str, window_start: i64) -> Option<SessionStatEntry> {
        let cells = self.cells.lock();
        cells
            .get(&SessionKey::new(puuid, window_start))
            .and_then(|cell| cell.get().cloned())
    }

    /// Number of computed windows.
    pub fn len(&self) -> usize {
        self.cells
            .lock()
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    /// Whether no window has been computed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn compute(&self, puuid: &str, window_start: i64) -> ServiceResult<SessionStatEntry> {
        let window_end = chrono::Utc::now().timestamp();
        let match_ids = self
            .history
            .match_ids(puuid, window_start, window_end)
            .await?;
        debug!(matches = match_ids.len(), window_end, "Aggregating session matches");

        let mut wins = 0u32;
        let mut losses = 0u32;
        for match_id in &match_ids {
            let detail = match self.history.match_detail(match_id).await {
                Ok(detail) => detail,
                Err(e) => {
                    warn!(match_id = %match_id, error = %e, "Skipping match that failed to load");
                    continue;
                }
            };

            match detail.outcome_for(puuid) {
                Some(MatchOutcome::Win) => wins += 1,
                Some(MatchOutcome::Loss) => losses += 1,
                None => debug!(match_id = %match_id, "Player not found in match, skipping"),
            }
        }

        let mut lp_start = HashMap::new();
        let mut lp_end = HashMap::new();
        match self.history.league_entries(puuid).await {
            Ok(entries) => {
                let net = i64::from(wins) - i64::from(losses);
                for entry in entries {
                    lp_start.insert(entry.queue_type.clone(), entry.league_points - net);
                    lp_end.insert(entry.queue_type, entry.league_points);
                }
            }
            Err(e) => warn!(error = %e, "Ranked lookup failed, leaving LP estimates empty"),
        }

        let entry = SessionStatEntry {
            wins,
            losses,
            winrate: SessionStatEntry::winrate_of(wins, losses),
            lp_start,
            lp_end,
            computed_at: window_end,
        };
        info!(wins, losses, winrate = entry.winrate, "Computed session stats");
        Ok(entry)
    }
}
