use super::{RecordInfo, RecordStore};
use crate::error::{Result, ScratchError};
use crate::model::ScratchName;
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_SUFFIX: &str = ".scratch";

pub struct FsStore {
    root: PathBuf,
    suffix: String,
    #[cfg(test)]
    simulate_rename_error: std::cell::Cell<bool>,
}

impl FsStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            suffix: DEFAULT_SUFFIX.to_string(),
            #[cfg(test)]
            simulate_rename_error: std::cell::Cell::new(false),
        }
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        if suffix.starts_with('.') {
            self.suffix = suffix.to_string();
        } else {
            self.suffix = format!(".{}", suffix);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    fn record_filename(&self, name: &ScratchName) -> String {
        format!("{}{}", name, self.suffix)
    }

    fn ensure_dir(&self) -> io::Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    /// Record files in the root: regular, carrying our suffix, not hidden.
    fn record_files(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(ScratchError::Io)? {
            let entry = entry.map_err(ScratchError::Io)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            if file_name.starts_with('.') {
                continue;
            }
            if let Some(stem) = file_name.strip_suffix(self.suffix.as_str()) {
                if !stem.is_empty() {
                    files.push((stem.to_string(), path.clone()));
                }
            }
        }
        Ok(files)
    }

    fn write_atomic(&self, target: &Path, name: &ScratchName, bytes: &[u8]) -> io::Result<()> {
        self.ensure_dir()?;

        let tmp_path = self.root.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        let written = fs::write(&tmp_path, bytes).and_then(|_| self.rename(&tmp_path, target));
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        #[cfg(test)]
        if self.simulate_rename_error.get() {
            return Err(io::Error::other("Simulated rename error"));
        }
        fs::rename(from, to)
    }
}

impl RecordStore for FsStore {
    fn read(&self, name: &ScratchName) -> Result<Option<Vec<u8>>> {
        match fs::read(self.record_path(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScratchError::Io(e)),
        }
    }

    fn write(&self, name: &ScratchName, bytes: &[u8]) -> Result<()> {
        let target = self.record_path(name);
        self.write_atomic(&target, name, bytes)
            .map_err(|source| ScratchError::Write {
                name: name.to_string(),
                source,
            })
    }

    fn delete(&self, name: &ScratchName) -> Result<bool> {
        match fs::remove_file(self.record_path(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ScratchError::Io(e)),
        }
    }

    fn delete_all(&self) -> Result<usize> {
        let mut removed = 0;
        for (_, path) in self.record_files()? {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(ScratchError::Io(e)),
            }
        }
        Ok(removed)
    }

    fn list(&self) -> Result<Vec<RecordInfo>> {
        let mut records = Vec::new();
        for (stem, path) in self.record_files()? {
            let Ok(name) = ScratchName::new(stem) else {
                continue;
            };
            let meta = fs::metadata(&path).map_err(ScratchError::Io)?;
            let modified = meta.modified().ok().map(DateTime::<Utc>::from);
            records.push(RecordInfo {
                name,
                path,
                size: meta.len(),
                modified,
            });
        }
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    fn record_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths: Vec<PathBuf> = self
            .record_files()?
            .into_iter()
            .map(|(_, path)| path)
            .collect();
        paths.sort();
        Ok(paths)
    }

    fn record_path(&self, name: &ScratchName) -> PathBuf {
        self.root.join(self.record_filename(name))
    }
}
