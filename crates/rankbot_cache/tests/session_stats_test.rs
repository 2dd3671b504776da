//! Session stat aggregation against an in-memory match service.

use async_trait::async_trait;
use rankbot_cache::SessionStatCache;
use rankbot_interface::MatchHistory;
use rankbot_core::{LeagueEntry, MatchDetail, MatchInfo, MatchParticipant};
use rankbot_error::{ServiceError, ServiceErrorKind, ServiceResult};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const PLAYER: &str = "player-puuid";

#[derive(Default)]
struct FakeHistory {
    matches: Vec<(String, Option<bool>)>,
    broken_matches: Vec<String>,
    fail_listing: bool,
    fail_ranked: bool,
    league_points: i64,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    delay: Option<Duration>,
}

fn err(status: u16) -> ServiceError {
    ServiceError::new(ServiceErrorKind::Status {
        status,
        body: String::new(),
    })
}

#[async_trait]
impl MatchHistory for FakeHistory {
    async fn match_ids(&self, _puuid: &str, _start: i64, _end: i64) -> ServiceResult<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_listing {
            return Err(err(500));
        }
        Ok(self.matches.iter().map(|(id, _)| id.clone()).collect())
    }

    async fn match_detail(&self, match_id: &str) -> ServiceResult<MatchDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.broken_matches.iter().any(|id| id == match_id) {
            return Err(err(502));
        }
        let win = self
            .matches
            .iter()
            .find(|(id, _)| id == match_id)
            .and_then(|(_, win)| *win);
        let player = if match_id.starts_with("spectated") {
            "someone-else"
        } else {
            PLAYER
        };
        Ok(MatchDetail {
            info: MatchInfo {
                participants: vec![
                    MatchParticipant {
                        puuid: "teammate".to_string(),
                        win: Some(true),
                    },
                    MatchParticipant {
                        puuid: player.to_string(),
                        win,
                    },
                ],
            },
        })
    }

    async fn league_entries(&self, _puuid: &str) -> ServiceResult<Vec<LeagueEntry>> {
        if self.fail_ranked {
            return Err(err(503));
        }
        Ok(vec![LeagueEntry {
            queue_type: "RANKED_SOLO_5x5".to_string(),
            tier: "GOLD".to_string(),
            rank: "II".to_string(),
            league_points: self.league_points,
            wins: 0,
            losses: 0,
        }])
    }
}

fn games(results: &[Option<bool>]) -> Vec<(String, Option<bool>)> {
    results
        .iter()
        .enumerate()
        .map(|(i, win)| (format!("NA1_{}", i), *win))
        .collect()
}

#[tokio::test]
async fn test_counts_wins_and_losses() {
    let history = Arc::new(FakeHistory {
        matches: games(&[Some(true), Some(true), Some(false), None]),
        league_points: 50,
        ..Default::default()
    });
    let cache = SessionStatCache::new(history.clone());

    let stats = cache.stats(PLAYER, 1_700_000_000).await.unwrap();

    assert_eq!(stats.wins, 2);
    assert_eq!(stats.losses, 2);
    assert_eq!(stats.winrate, 50.0);
    assert_eq!(stats.lp_end["RANKED_SOLO_5x5"], 50);
    assert_eq!(stats.lp_start["RANKED_SOLO_5x5"], 50);
}

#[tokio::test]
async fn test_lp_start_subtracts_net_result() {
    let history = Arc::new(FakeHistory {
        matches: games(&[Some(true), Some(true), Some(true), Some(false)]),
        league_points: 75,
        ..Default::default()
    });
    let cache = SessionStatCache::new(history);

    let stats = cache.stats(PLAYER, 0).await.unwrap();
    assert_eq!(stats.lp_start["RANKED_SOLO_5x5"], 73);
    assert_eq!(stats.winrate, 75.0);
}

#[tokio::test]
async fn test_no_games_has_zero_winrate() {
    let history = Arc::new(FakeHistory::default());
    let cache = SessionStatCache::new(history);

    let stats = cache.stats(PLAYER, 0).await.unwrap();
    assert_eq!(stats.games(), 0);
    assert_eq!(stats.winrate, 0.0);
    assert!(!stats.winrate.is_nan());
}

#[tokio::test]
async fn test_failed_match_is_skipped() {
    let history = Arc::new(FakeHistory {
        matches: games(&[Some(true), Some(false), Some(true)]),
        broken_matches: vec!["NA1_1".to_string()],
        ..Default::default()
    });
    let cache = SessionStatCache::new(history);

    let stats = cache.stats(PLAYER, 0).await.unwrap();
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.losses, 0);
    assert_eq!(stats.winrate, 100.0);
}

#[tokio::test]
async fn test_match_without_player_is_skipped() {
    let history = Arc::new(FakeHistory {
        matches: vec![
            ("spectated_1".to_string(), Some(false)),
            ("NA1_1".to_string(), Some(false)),
        ],
        ..Default::default()
    });
    let cache = SessionStatCache::new(history);

    let stats = cache.stats(PLAYER, 0).await.unwrap();
    assert_eq!(stats.games(), 1);
}

#[tokio::test]
async fn test_ranked_failure_leaves_lp_empty() {
    let history = Arc::new(FakeHistory {
        matches: games(&[Some(true)]),
        fail_ranked: true,
        ..Default::default()
    });
    let cache = SessionStatCache::new(history);

    let stats = cache.stats(PLAYER, 0).await.unwrap();
    assert_eq!(stats.wins, 1);
    assert!(stats.lp_start.is_empty());
    assert!(stats.lp_end.is_empty());
}

#[tokio::test]
async fn test_window_is_cached() {
    let history = Arc::new(FakeHistory {
        matches: games(&[Some(true), Some(false)]),
        ..Default::default()
    });
    let cache = SessionStatCache::new(history.clone());

    let first = cache.stats(PLAYER, 100).await.unwrap();
    let second = cache.stats(PLAYER, 100).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(history.list_calls.load(Ordering::SeqCst), 1);
    assert_eq!(history.detail_calls.load(Ordering::SeqCst), 2);
    assert!(cache.cached(PLAYER, 100).is_some());
}

#[tokio::test]
async fn test_new_window_gets_new_entry() {
    let history = Arc::new(FakeHistory {
        matches: games(&[Some(true)]),
        ..Default::default()
    });
    let cache = SessionStatCache::new(history.clone());

    cache.stats(PLAYER, 100).await.unwrap();
    cache.stats(PLAYER, 200).await.unwrap();

    assert_eq!(history.list_calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn test_listing_failure_is_not_cached() {
    let history = Arc::new(FakeHistory {
        fail_listing: true,
        ..Default::default()
    });
    let cache = SessionStatCache::new(history.clone());

    assert!(cache.stats(PLAYER, 0).await.is_err());
    assert!(cache.stats(PLAYER, 0).await.is_err());
    assert_eq!(history.list_calls.load(Ordering::SeqCst), 2);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_identical_upstream_gives_identical_stats() {
    let make = || {
        Arc::new(FakeHistory {
            matches: games(&[Some(true), Some(false), Some(false)]),
            league_points: 10,
            ..Default::default()
        })
    };

    let a = SessionStatCache::new(make()).stats(PLAYER, 0).await.unwrap();
    let b = SessionStatCache::new(make()).stats(PLAYER, 0).await.unwrap();

    assert_eq!(a.wins, b.wins);
    assert_eq!(a.losses, b.losses);
    assert_eq!(a.winrate, b.winrate);
    assert_eq!(a.lp_start, b.lp_start);
    let expected: HashMap<String, i64> = HashMap::from([("RANKED_SOLO_5x5".to_string(), 11)]);
    assert_eq!(a.lp_start, expected);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_requests_share_one_computation() {
    let history = Arc::new(FakeHistory {
        matches: games(&[Some(true)]),
        delay: Some(Duration::from_secs(1)),
        ..Default::default()
    });
    let cache = Arc::new(SessionStatCache::new(history.clone()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.stats(PLAYER, 42).await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().wins, 1);
    }

    assert_eq!(history.list_calls.load(Ordering::SeqCst), 1);
}
