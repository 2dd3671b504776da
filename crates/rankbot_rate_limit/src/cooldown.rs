//! Last-use tracking keyed by command token.

use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Outcome of a cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    /// The command may run
    Ready,
    /// The command ran too recently
    Cooling {
        /// Time left until the command is ready again
        remaining: Duration,
    },
}

impl CooldownStatus {
    /// Whether the command may run.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Last dispatch instant per command token.
///
/// Owned by the dispatch loop and mutated only from there, so it carries no
/// lock. Times come from `tokio::time::Instant`, which makes cooldowns
/// testable with a paused clock. Nothing is persisted; a restart forgets
/// every cooldown.
///
/// # Example
///
/// ```
/// use rankbot_rate_limit::CooldownTable;
/// use std::time::Duration;
/// use tokio::time::Instant;
///
/// let mut table = CooldownTable::new();
/// let now = Instant::now();
///
/// assert!(table.check("!rank", Duration::from_secs(30), now).is_ready());
/// table.record("!rank", now);
/// assert!(!table.check("!rank", Duration::from_secs(30), now).is_ready());
/// ```
#[derive(Debug, Default)]
pub struct CooldownTable {
    last_used: HashMap<String, Instant>,
}

impl CooldownTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `token` may run at `now` given its `cooldown`.
    ///
    /// A token that has never run is always ready. A zero cooldown never
    /// suppresses.
    #[instrument(level = "trace", skip(self))]
    pub fn check(&self, token: &str, cooldown: Duration, now: Instant) -> CooldownStatus {
        let Some(last) = self.last_used.get(token) else {
            return CooldownStatus::Ready;
        };

        let elapsed = now.saturating_duration_since(*last);
        if elapsed < cooldown {
            let remaining = cooldown - elapsed;
            debug!(token, remaining_ms = remaining.as_millis() as u64, "Command cooling down");
            CooldownStatus::Cooling { remaining }
        } else {
            CooldownStatus::Ready
        }
    }

    /// Record that `token` was dispatched at `now`.
    pub fn record(&mut self, token: &str, now: Instant) {
        self.last_used.insert(token.to_string(), now);
    }

    /// When `token` last ran, if ever.
    pub fn last_used(&self, token: &str) -> Option<Instant> {
        self.last_used.get(token).copied()
    }

    /// Number of tokens that have run at least once.
    pub fn len(&self) -> usize {
        self.last_used.len()
    }

    /// Whether no token has run yet.
    pub fn is_empty(&self) -> bool {
        self.last_used.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_token_is_ready() {
        let table = CooldownTable::new();
        assert_eq!(
            table.check("!hello", Duration::from_secs(5), Instant::now()),
            CooldownStatus::Ready
        );
    }

    #[test]
    fn test_zero_cooldown_never_suppresses() {
        let mut table = CooldownTable::new();
        let now = Instant::now();
        table.record("!hello", now);
        assert!(table.check("!hello", Duration::ZERO, now).is_ready());
    }

    #[test]
    fn test_remaining_time_is_reported() {
        let mut table = CooldownTable::new();
        let start = Instant::now();
        table.record("!hello", start);

        let status = table.check("!hello", Duration::from_secs(10), start + Duration::from_secs(4));
        assert_eq!(
            status,
            CooldownStatus::Cooling {
                remaining: Duration::from_secs(6)
            }
        );
    }

    #[test]
    fn test_cooldowns_are_per_token() {
        let mut table = CooldownTable::new();
        let now = Instant::now();
        table.record("!hello", now);

        assert!(!table.check("!hello", Duration::from_secs(10), now).is_ready());
        assert!(table.check("!rank", Duration::from_secs(10), now).is_ready());
    }
}
