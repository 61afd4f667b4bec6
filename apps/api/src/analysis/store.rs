//! Result Store: session id → finished analysis.
//!
//! The only shared mutable state in the service. The pipeline writes, the
//! poller reads, and the two race on a multi-threaded runtime, so the
//! in-memory implementation sits behind an `RwLock`.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::analysis::form::FormData;
use crate::analysis::session::SessionId;

/// The finished analysis for one session. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    pub analysis: String,
    pub timestamp: DateTime<Utc>,
    /// The payload exactly as submitted, before normalization.
    pub form_data: FormData,
}

/// Carried in `AppState` as `Arc<dyn ResultStore>`.
pub trait ResultStore: Send + Sync {
    /// Inserts or overwrites unconditionally.
    fn put(&self, id: SessionId, record: AnalysisRecord);

    /// `None` means "not ready yet", never an error.
    fn get(&self, id: &SessionId) -> Option<AnalysisRecord>;
}

struct StoredEntry {
    record: AnalysisRecord,
    stored_at: Instant,
}

/// Process-wide in-memory store with optional time-based retention.
pub struct InMemoryResultStore {
    entries: RwLock<HashMap<SessionId, StoredEntry>>,
    ttl: Option<Duration>,
}

impl InMemoryResultStore {
    /// `ttl = None` keeps every entry for the lifetime of the process.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    fn is_expired(&self, entry: &StoredEntry, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.saturating_duration_since(entry.stored_at) >= ttl)
    }
}

impl Default for InMemoryResultStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ResultStore for InMemoryResultStore {
    fn put(&self, id: SessionId, record: AnalysisRecord) {
        let now = Instant::now();
        let mut entries = match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Result store lock was poisoned; recovering");
                poisoned.into_inner()
            }
        };

        if self.ttl.is_some() {
            let before = entries.len();
            entries.retain(|_, entry| !self.is_expired(entry, now));
            let pruned = before - entries.len();
            if pruned > 0 {
                debug!("Pruned {pruned} expired analysis results");
            }
        }

        entries.insert(
            id,
            StoredEntry {
                record,
                stored_at: now,
            },
        );
    }

    fn get(&self, id: &SessionId) -> Option<AnalysisRecord> {
        let entries = match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries
            .get(id)
            .filter(|entry| !self.is_expired(entry, Instant::now()))
            .map(|entry| entry.record.clone())
    }
}
