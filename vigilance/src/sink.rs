//! Persistence of recognized plates
//!
//! Insertion is idempotent on (identity, plate text): re-observing the same
//! plate on the same tracked object never creates a duplicate record.

use crate::error::Result;
use crate::types::ObjectClass;
use centroidtrack::ObjectId;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// One recognized plate attached to a tracked identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateRecord {
    pub object_id: ObjectId,
    pub label: ObjectClass,
    pub plate: String,
}

/// Common interface for plate persistence
pub trait PlateSink: Send {
    /// Insert a record, returning `true` when it was newly stored and
    /// `false` when the (identity, plate) pair was already present
    fn insert(&mut self, record: &PlateRecord) -> Result<bool>;
}

#[derive(Default)]
struct MemoryState {
    seen: HashSet<(ObjectId, String)>,
    records: Vec<PlateRecord>,
}

/// In-memory sink for tests and examples. Clones share the same state, so
/// a test can keep a handle while the pipeline owns the sink.
#[derive(Clone, Default)]
pub struct MemoryPlateSink {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryPlateSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored records in insertion order
    pub fn records(&self) -> Vec<PlateRecord> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlateSink for MemoryPlateSink {
    fn insert(&mut self, record: &PlateRecord) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let key = (record.object_id, record.plate.clone());
        if !state.seen.insert(key) {
            return Ok(false);
        }
        state.records.push(record.clone());
        Ok(true)
    }
}

/// Relational sink backed by SQLite
pub struct SqlitePlateSink {
    conn: Connection,
}

impl SqlitePlateSink {
    /// Open (or create) the plates database at `path`
    pub fn open(path: &str) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// In-memory database, mostly useful in tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS plates (
                object_id INTEGER NOT NULL,
                label     TEXT    NOT NULL,
                plate     TEXT    NOT NULL,
                UNIQUE (object_id, plate)
            )",
            [],
        )?;
        Ok(Self { conn })
    }

    /// Number of stored records
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM plates", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl PlateSink for SqlitePlateSink {
    fn insert(&mut self, record: &PlateRecord) -> Result<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO plates (object_id, label, plate) VALUES (?1, ?2, ?3)",
            params![record.object_id, record.label.name(), record.plate],
        )?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(object_id: ObjectId, plate: &str) -> PlateRecord {
        PlateRecord {
            object_id,
            label: ObjectClass::Car,
            plate: plate.to_string(),
        }
    }

    #[test]
    fn test_memory_sink_is_idempotent() {
        let mut sink = MemoryPlateSink::new();

        assert!(sink.insert(&record(0, "AB123")).unwrap());
        assert!(!sink.insert(&record(0, "AB123")).unwrap());
        assert!(sink.insert(&record(0, "CD456")).unwrap());
        assert!(sink.insert(&record(1, "AB123")).unwrap());

        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_memory_sink_clones_share_state() {
        let handle = MemoryPlateSink::new();
        let mut sink = handle.clone();

        sink.insert(&record(3, "ZZ999")).unwrap();
        assert_eq!(handle.records(), vec![record(3, "ZZ999")]);
    }

    #[test]
    fn test_sqlite_sink_is_idempotent() {
        let mut sink = SqlitePlateSink::open_in_memory().unwrap();

        assert!(sink.insert(&record(0, "AB123")).unwrap());
        assert!(!sink.insert(&record(0, "AB123")).unwrap());
        assert!(sink.insert(&record(1, "AB123")).unwrap());

        assert_eq!(sink.count().unwrap(), 2);
    }
}
