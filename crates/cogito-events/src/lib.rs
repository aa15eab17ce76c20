//! Append-only event record stream for the Cogito simulation.
//!
//! Every observable step of the simulation produces an immutable
//! [`EventRecord`] appended to an [`EventSink`]. Records are
//! self-describing: a logical `tick`, a wall-clock `timestamp`, a
//! `type` tag, and type-specific fields flattened alongside them, so
//! consumers can parse the stream line by line without a schema.
//!
//! Two sinks ship with the crate: [`MemorySink`] retains records in
//! memory for assertions, and [`JsonlSink`] writes one JSON object per
//! line to a file. A write failure in the file sink is logged and
//! swallowed -- the event stream is an observer, never a reason to stop
//! the simulation. [`NullSink`] discards everything for callers that
//! do not care.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Record kinds
// ---------------------------------------------------------------------------

/// The type tag of an event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A committed physics effect (metabolism or action).
    Effect,
    /// An agent's full perception payload.
    Perception,
    /// The action an agent decided on.
    Decision,
    /// An agent switched strategic goals.
    GoalSwitch,
    /// An agent adopted a new plan.
    PlanGenerated,
    /// An agent discarded a plan predicted to fail.
    ImaginationAbort,
    /// An agent warned everyone about a hazard.
    AlarmChirp,
    /// An agent requested extraction helpers.
    HelpCallSent,
    /// An agent requested obstacle helpers.
    PuzzleHelpSent,
    /// An agent retold a story to a listener.
    StoryShared,
    /// An agent broadcast its cognitive map.
    Communication,
    /// An agent shared targeted high-value information.
    AltruisticAction,
    /// An object entered an inventory.
    InventoryAdd,
    /// An object left an inventory.
    InventoryRemove,
    /// A cooperative resource was extracted.
    CoopExtraction,
    /// An obstacle was removed with USE.
    ObjectUsed,
    /// Periodic dump of an agent's negative reflection scores.
    Reflection,
    /// Periodic dump of an agent's trust map.
    SocialStatus,
    /// An agent died.
    Death,
    /// Per-tick agent state summary.
    State,
    /// An agent drained a non-empty inbox.
    InfoUpdate,
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One self-describing record in the event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// The logical tick the record belongs to.
    pub tick: u64,
    /// Wall-clock time the record was created.
    pub timestamp: DateTime<Utc>,
    /// The record's type tag.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Type-specific fields, flattened into the record object.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

impl EventRecord {
    /// Create a record stamped with the current wall-clock time.
    ///
    /// `fields` is expected to be a JSON object (as produced by
    /// `serde_json::json!({..})`); any other value is recorded as
    /// an empty field set.
    pub fn new(tick: u64, kind: EventKind, fields: Value) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Self {
            tick,
            timestamp: Utc::now(),
            kind,
            fields,
        }
    }

    /// Fetch a field by key, if present.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Errors from constructing or flushing a file-backed sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The log file could not be created or written.
    #[error("event log I/O failure: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A record could not be serialized.
    #[error("event record serialization failure: {source}")]
    Serialize {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// An append-only consumer of event records.
pub trait EventSink {
    /// Append one record to the stream.
    fn append(&mut self, record: EventRecord);
}

/// A sink that retains every record in memory. Intended for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// The records appended so far, in order.
    pub records: Vec<EventRecord>,
}

impl MemorySink {
    /// Create an empty in-memory sink.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Iterate records of one kind, in append order.
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &EventRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    /// Count records of one kind.
    pub fn count_of(&self, kind: EventKind) -> usize {
        self.of_kind(kind).count()
    }
}

impl EventSink for MemorySink {
    fn append(&mut self, record: EventRecord) {
        self.records.push(record);
    }
}

/// A sink that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn append(&mut self, _record: EventRecord) {}
}

/// A sink that writes one JSON object per line to a file.
#[derive(Debug)]
pub struct JsonlSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create (truncating) the log file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// The path this sink writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush buffered records to disk.
    pub fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }

    fn try_append(&mut self, record: &EventRecord) -> Result<(), SinkError> {
        let line = serde_json::to_string(record)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl EventSink for JsonlSink {
    fn append(&mut self, record: EventRecord) {
        if let Err(error) = self.try_append(&record) {
            tracing::warn!(?error, path = %self.path.display(), "dropping event record");
        }
    }
}
