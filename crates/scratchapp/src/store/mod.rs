//! # Storage Layer
//!
//! Records live one per file, named after their [`ScratchName`]:
//!
//! ```text
//! <root>/
//! ├── default.scratch          # the global scratch
//! ├── !home!me!proj.scratch    # a project scratch
//! └── notes.txt                # not ours, never touched
//! ```
//!
//! There is no index file. Enumeration and bulk deletion go by suffix, and the
//! engine assumes it owns every file in the root that carries its suffix.
//!
//! ## Backends
//!
//! - [`fs::FsStore`]: production storage on disk.
//! - [`memory::MemStore`]: in-memory storage for testing session logic without a
//!   filesystem.
//!
//! ## Contract
//!
//! - A missing record is `Ok(None)` from [`RecordStore::read`], not an error. A
//!   brand-new name has no record, and that is the common case.
//! - [`RecordStore::write`] must never leave a half-written record in place of a
//!   good one. `FsStore` writes a temporary file and renames it over the target.
//! - Deleting something already gone reports `false` rather than failing.
//!
//! Backends store bytes. Encoding and decoding belong to [`crate::codec`].

use crate::error::Result;
use crate::model::ScratchName;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// A record as seen when enumerating the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInfo {
    pub name: ScratchName,
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Raw record I/O, keyed by name.
pub trait RecordStore {
    /// Read the record bytes. `Ok(None)` if there is no record under `name`.
    fn read(&self, name: &ScratchName) -> Result<Option<Vec<u8>>>;

    /// Write the record, replacing any previous one.
    fn write(&self, name: &ScratchName, bytes: &[u8]) -> Result<()>;

    /// Remove the record. Returns whether one existed.
    fn delete(&self, name: &ScratchName) -> Result<bool>;

    /// Remove every record. Returns how many were removed.
    fn delete_all(&self) -> Result<usize>;

    /// Enumerate records, sorted by name.
    fn list(&self) -> Result<Vec<RecordInfo>>;

    /// Every file [`RecordStore::delete_all`] would remove, sorted. Unlike
    /// `list`, this includes files whose stem is not a valid name.
    fn record_paths(&self) -> Result<Vec<PathBuf>>;

    /// Where the record for `name` lives, or would live once written.
    fn record_path(&self, name: &ScratchName) -> PathBuf;
}
