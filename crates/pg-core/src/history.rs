//! Bounded history of previously selected ids and its stores.
//!
//! The history is the only durable state of the tool. It is loaded once at
//! start, appended to after a successful fetch, and written back. Stores
//! never fail a load: anything unreadable is logged and treated as empty.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{HistoryError, HistoryResult};
use crate::record::Record;

/// Default number of entries kept.
pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// One past selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The selected id.
    #[serde(rename = "pokemon_id")]
    pub id: u32,
    /// Display name at the time of selection.
    #[serde(
        rename = "pokemon_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// Joined types label at the time of selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    /// When the selection was recorded.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    /// An entry carrying only an id.
    pub fn bare(id: u32) -> Self {
        Self {
            id,
            name: None,
            types: None,
            timestamp: None,
        }
    }

    /// An entry describing a rendered record.
    pub fn for_record(record: &Record, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: record.id,
            name: Some(record.name.clone()),
            types: record.tags_label(),
            timestamp: Some(timestamp),
        }
    }
}

/// Accept RFC 3339 or an offset-less ISO 8601 timestamp read as UTC.
/// Anything else drops the timestamp and keeps the entry.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|t| t.and_utc()))
}

/// On-disk shape of an entry: full objects or bare ids.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Id(u32),
    Entry(HistoryEntry),
}

impl From<StoredEntry> for HistoryEntry {
    fn from(stored: StoredEntry) -> Self {
        match stored {
            StoredEntry::Id(id) => HistoryEntry::bare(id),
            StoredEntry::Entry(entry) => entry,
        }
    }
}

/// An ordered, FIFO-bounded sequence of past selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    max_len: usize,
}

impl History {
    /// Create an empty history holding at most `max_len` entries.
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_len,
        }
    }

    /// Build a history from existing entries, keeping the most recent `max_len`.
    pub fn from_entries(entries: Vec<HistoryEntry>, max_len: usize) -> Self {
        let mut history = Self { entries, max_len };
        history.evict();
        history
    }

    /// Append an entry, dropping the oldest entries past capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
        self.evict();
    }

    fn evict(&mut self) {
        if self.entries.len() > self.max_len {
            let drain_count = self.entries.len() - self.max_len;
            self.entries.drain(..drain_count);
        }
    }

    /// Whether `id` was selected in any retained entry.
    pub fn contains(&self, id: u32) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Ids in insertion order, oldest first.
    pub fn ids(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Number of distinct retained ids within `[1, max_id]`.
    pub fn distinct_in_range(&self, max_id: u32) -> usize {
        let mut ids: Vec<u32> = self
            .entries
            .iter()
            .map(|e| e.id)
            .filter(|id| (1..=max_id).contains(id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// All retained entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Capacity.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

/// Persistence seam for the selection history.
pub trait HistoryStore {
    /// Load the persisted history. Missing or unreadable state yields an empty history.
    fn load(&mut self) -> History;

    /// Append `entry` to `history` and persist the result.
    ///
    /// The in-memory append always happens; an error only reports that the
    /// persisted copy was not updated.
    fn record(&mut self, history: &mut History, entry: HistoryEntry) -> HistoryResult<()>;
}

/// A history store backed by a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    max_len: usize,
}

impl JsonFileStore {
    /// Create a store for `path` keeping at most `max_len` entries.
    pub fn new(path: impl Into<PathBuf>, max_len: usize) -> Self {
        Self {
            path: path.into(),
            max_len,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, distinguishing "absent" from "broken".
    pub fn read(&self) -> HistoryResult<Option<History>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let stored: Vec<StoredEntry> =
            serde_json::from_str(&content).map_err(|source| HistoryError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let entries = stored.into_iter().map(HistoryEntry::from).collect();
        Ok(Some(History::from_entries(entries, self.max_len)))
    }

    /// Write `history` to the file, creating parent directories as needed.
    pub fn save(&self, history: &History) -> HistoryResult<()> {
        let json = serde_json::to_string_pretty(history.entries())?;
        let write_err = |source| HistoryError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, json).map_err(write_err)
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&mut self) -> History {
        match self.read() {
            Ok(Some(history)) => {
                tracing::debug!(
                    path = %self.path.display(),
                    entries = history.len(),
                    "loaded history"
                );
                history
            }
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no history file, starting empty");
                History::new(self.max_len)
            }
            Err(e) => {
                tracing::warn!("{e}; starting with empty history");
                History::new(self.max_len)
            }
        }
    }

    fn record(&mut self, history: &mut History, entry: HistoryEntry) -> HistoryResult<()> {
        history.push(entry);
        self.save(history)
    }
}

/// An in-memory history store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<Vec<HistoryEntry>>,
    max_len: usize,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    /// An empty store keeping at most `max_len` entries.
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len,
            ..Self::default()
        }
    }

    /// A store pre-seeded with `ids`.
    pub fn with_ids(max_len: usize, ids: &[u32]) -> Self {
        Self {
            saved: Some(ids.iter().copied().map(HistoryEntry::bare).collect()),
            ..Self::new(max_len)
        }
    }

    /// Make every subsequent `record` fail to persist.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of `record` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// The last persisted entries, if anything was ever persisted.
    pub fn saved(&self) -> Option<&[HistoryEntry]> {
        self.saved.as_deref()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&mut self) -> History {
        History::from_entries(self.saved.clone().unwrap_or_default(), self.max_len)
    }

    fn record(&mut self, history: &mut History, entry: HistoryEntry) -> HistoryResult<()> {
        self.writes += 1;
        history.push(entry);
        if self.fail_writes {
            return Err(HistoryError::Rejected("writes disabled".to_string()));
        }
        self.saved = Some(history.entries().to_vec());
        Ok(())
    }
}
