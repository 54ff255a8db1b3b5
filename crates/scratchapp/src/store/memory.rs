use super::{RecordInfo, RecordStore};
use crate::error::{Result, ScratchError};
use crate::model::ScratchName;
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::PathBuf;

struct Entry {
    bytes: Vec<u8>,
    mtime: DateTime<Utc>,
}

/// In-memory record store for testing.
///
/// Uses `RefCell` for interior mutability since the engine is single-threaded,
/// which lets `RecordStore` keep `&self` for all methods.
#[derive(Default)]
pub struct MemStore {
    records: RefCell<BTreeMap<ScratchName, Entry>>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, for exercising error paths.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Test helper: the raw bytes under `name`.
    pub fn raw(&self, name: &ScratchName) -> Option<Vec<u8>> {
        self.records.borrow().get(name).map(|e| e.bytes.clone())
    }
}

impl RecordStore for MemStore {
    fn read(&self, name: &ScratchName) -> Result<Option<Vec<u8>>> {
        Ok(self.raw(name))
    }

    fn write(&self, name: &ScratchName, bytes: &[u8]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ScratchError::Write {
                name: name.to_string(),
                source: std::io::Error::other("Simulated write error"),
            });
        }

        self.records.borrow_mut().insert(
            name.clone(),
            Entry {
                bytes: bytes.to_vec(),
                mtime: Utc::now(),
            },
        );
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn delete(&self, name: &ScratchName) -> Result<bool> {
        Ok(self.records.borrow_mut().remove(name).is_some())
    }

    fn delete_all(&self) -> Result<usize> {
        let mut records = self.records.borrow_mut();
        let removed = records.len();
        records.clear();
        Ok(removed)
    }

    fn list(&self) -> Result<Vec<RecordInfo>> {
        Ok(self
            .records
            .borrow()
            .iter()
            .map(|(name, entry)| RecordInfo {
                name: name.clone(),
                path: self.record_path(name),
                size: entry.bytes.len() as u64,
                modified: Some(entry.mtime),
            })
            .collect())
    }

    fn record_paths(&self) -> Result<Vec<PathBuf>> {
        Ok(self
            .records
            .borrow()
            .keys()
            .map(|name| self.record_path(name))
            .collect())
    }

    fn record_path(&self, name: &ScratchName) -> PathBuf {
        PathBuf::from(format!("memory://{}", name))
    }
}
