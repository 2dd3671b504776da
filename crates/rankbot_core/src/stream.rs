//! Live stream metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A channel that is currently broadcasting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStream {
    /// Stream title
    pub title: String,
    /// Category being streamed
    pub game_name: String,
    /// When the broadcast began
    pub started_at: DateTime<Utc>,
}
