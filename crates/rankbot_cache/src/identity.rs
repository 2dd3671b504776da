//! Riot ID to PUUID resolution with a persisted cache.

use rankbot_interface::IdentityLookup;
use rankbot_core::{IdentityCacheEntry, identity_key};
use rankbot_error::{ServiceResult, StorageError, StorageErrorKind};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

type IdentityMap = BTreeMap<String, IdentityCacheEntry>;

/// Cache of resolved Riot IDs, persisted as a flat JSON file.
///
/// The file is read lazily on the first [`resolve`](Self::resolve) call, not
/// at construction. A single async lock covers the whole
/// load, check, resolve, insert, persist sequence, so concurrent callers for
/// the same Riot ID trigger at most one upstream resolution.
///
/// File layout:
///
/// ```json
/// {
///   "Player#NA1": {
///     "gameName": "Player",
///     "tagLine": "NA1",
///     "puuid": "...",
///     "summonerId": "...",
///     "cachedAt": 1700000000
///   }
/// }
/// ```
pub struct IdentityCache {
    path: PathBuf,
    lookup: Arc<dyn IdentityLookup>,
    entries: Mutex<Option<IdentityMap>>,
}

impl IdentityCache {
    /// Create a cache persisted at `path`, resolving misses through `lookup`.
    pub fn new(path: impl Into<PathBuf>, lookup: Arc<dyn IdentityLookup>) -> Self {
        Self {
            path: path.into(),
            lookup,
            entries: Mutex::new(None),
        }
    }

    /// Resolve `game_name#tag_line` to a PUUID.
    ///
    /// A cached entry is returned without network activity. On a miss the
    /// account record is fetched, then the summoner record; only when both
    /// succeed is an entry inserted and the file rewritten. A failed write is
    /// logged and does not fail the resolution.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn resolve(&self, game_name: &str, tag_line: &str) -> ServiceResult<String> {
        let mut guard = self.entries.lock().await;
        let entries = guard.get_or_insert_with(|| Self::read_file(&self.path));

        let key = identity_key(game_name, tag_line);
        if let Some(entry) = entries.get(&key) {
            debug!(key = %key, "Identity cache hit");
            return Ok(entry.puuid.clone());
        }

        debug!(key = %key, "Identity cache miss, resolving upstream");
        let account = self.lookup.account_by_riot_id(game_name, tag_line).await?;
        let summoner = self.lookup.summoner_by_puuid(&account.puuid).await?;

        let entry = IdentityCacheEntry {
            game_name: account.game_name,
            tag_line: account.tag_line,
            puuid: account.puuid,
            summoner_id: summoner.id,
            cached_at: chrono::Utc::now().timestamp(),
        };
        let puuid = entry.puuid.clone();
        entries.insert(key.clone(), entry);
        info!(key = %key, "Resolved identity");

        if let Err(e) = Self::write_file(&self.path, entries).await {
            warn!(error = %e, "Failed to persist identity cache");
        }

        Ok(puuid)
    }

    /// Cached entry for `game_name#tag_line`, without resolving.
    pub async fn cached(&self, game_name: &str, tag_line: &str) -> Option<IdentityCacheEntry> {
        let mut guard = self.entries.lock().await;
        let entries = guard.get_or_insert_with(|| Self::read_file(&self.path));
        entries.get(&identity_key(game_name, tag_line)).cloned()
    }

    /// Where the cache is persisted.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted map. A missing or unreadable file yields an empty
    /// cache.
    fn read_file(path: &Path) -> IdentityMap {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No identity cache file yet");
                return IdentityMap::new();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read identity cache");
                return IdentityMap::new();
            }
        };

        match serde_json::from_str::<IdentityMap>(&content) {
            Ok(entries) => {
                debug!(count = entries.len(), "Loaded identity cache");
                entries
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring malformed identity cache");
                IdentityMap::new()
            }
        }
    }

    /// Rewrite the whole file through a temporary sibling and a rename.
    async fn write_file(path: &Path, entries: &IdentityMap) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialize(e.to_string())))?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", tmp.display(), e)))
        })?;
        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
        })?;

        debug!(count = entries.len(), path = %path.display(), "Persisted identity cache");
        Ok(())
    }
}
