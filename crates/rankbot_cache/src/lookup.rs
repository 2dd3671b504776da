//! Champion id to display name table.

use parking_lot::Mutex;
use rankbot_error::{StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Load state of the table. Guarded by a single lock so the transition from
/// unloaded to loaded happens once.
#[derive(Debug)]
enum LoadState {
    Unloaded,
    Loaded(HashMap<i64, String>),
    Failed,
}

/// Read-only mapping from numeric id to display name.
///
/// The source file maps string-encoded integers to names:
///
/// ```json
/// {"1": "Annie", "266": "Aatrox"}
/// ```
///
/// A missing or malformed file never fails the process; lookups degrade to
/// `Unknown(<id>)`.
///
/// # Example
///
/// ```
/// use rankbot_cache::LookupTable;
/// use std::collections::HashMap;
///
/// let table = LookupTable::from_entries(HashMap::from([(1, "Aatrox".to_string())]));
/// assert_eq!(table.name(1), "Aatrox");
/// assert_eq!(table.name(999), "Unknown(999)");
/// ```
#[derive(Debug)]
pub struct LookupTable {
    source: Option<PathBuf>,
    state: Mutex<LoadState>,
}

impl LookupTable {
    /// A table backed by a JSON file, loaded on the first [`load`](Self::load)
    /// or [`name`](Self::name) call.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(source.into()),
            state: Mutex::new(LoadState::Unloaded),
        }
    }

    /// An already loaded table.
    pub fn from_entries(entries: HashMap<i64, String>) -> Self {
        Self {
            source: None,
            state: Mutex::new(LoadState::Loaded(entries)),
        }
    }

    /// Load the table from its source file.
    ///
    /// Returns the number of entries held. Calling this on a loaded table is
    /// a no-op. A failure is remembered, so later [`name`](Self::name) calls
    /// fall back to the placeholder without touching the file again; an
    /// explicit `load` retries.
    #[instrument(skip(self), fields(source = ?self.source))]
    pub fn load(&self) -> Result<usize, StorageError> {
        let mut state = self.state.lock();
        Self::load_locked(self.source.as_ref(), &mut state)
    }

    fn load_locked(source: Option<&PathBuf>, state: &mut LoadState) -> Result<usize, StorageError> {
        if let LoadState::Loaded(entries) = state {
            debug!("Lookup table already loaded");
            return Ok(entries.len());
        }

        let Some(path) = source else {
            *state = LoadState::Failed;
            return Err(StorageError::new(StorageErrorKind::FileRead(
                "lookup table has no source".to_string(),
            )));
        };

        let result = std::fs::read_to_string(path)
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })
            .and_then(|content| Self::parse(&content));

        match result {
            Ok(entries) => {
                let count = entries.len();
                info!(count, path = %path.display(), "Loaded lookup table");
                *state = LoadState::Loaded(entries);
                Ok(count)
            }
            Err(e) => {
                *state = LoadState::Failed;
                Err(e)
            }
        }
    }

    /// Parse a JSON object of string ids to names.
    ///
    /// Keys that are not integers are skipped with a warning.
    pub fn parse(content: &str) -> Result<HashMap<i64, String>, StorageError> {
        let raw: HashMap<String, String> = serde_json::from_str(content)
            .map_err(|e| StorageError::new(StorageErrorKind::Parse(e.to_string())))?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (key, name) in raw {
            match key.trim().parse::<i64>() {
                Ok(id) => {
                    entries.insert(id, name);
                }
                Err(e) => warn!(key = %key, error = %e, "Skipping lookup entry with non-numeric id"),
            }
        }
        Ok(entries)
    }

    /// Display name for `id`, or `Unknown(<id>)`.
    pub fn name(&self, id: i64) -> String {
        let mut state = self.state.lock();

        if matches!(*state, LoadState::Unloaded)
            && let Err(e) = Self::load_locked(self.source.as_ref(), &mut state)
        {
            warn!(error = %e, "Lookup table unavailable");
        }

        match &*state {
            LoadState::Loaded(entries) => entries
                .get(&id)
                .cloned()
                .unwrap_or_else(|| Self::placeholder(id)),
            LoadState::Unloaded | LoadState::Failed => Self::placeholder(id),
        }
    }

    /// Whether the table holds data.
    pub fn is_loaded(&self) -> bool {
        matches!(*self.state.lock(), LoadState::Loaded(_))
    }

    fn placeholder(id: i64) -> String {
        format!("Unknown({})", id)
    }
}
