//! # Data Model
//!
//! The engine deals in three kinds of values:
//!
//! - [`ScratchName`]: which scratch destination a buffer belongs to. One reserved
//!   value (`"default"`) names the global scratch; every other value is a project.
//! - [`BufferState`]: the persisted triple of content, cursor and mode.
//! - [`ScratchBuffer`] behind a [`BufferHandle`]: the live buffer the host edits.
//!
//! ## Cursor Offsets
//!
//! Cursors count characters (Unicode scalar values), not bytes. A byte offset could
//! land inside a multi-byte character once the host edits the text, while a character
//! offset only ever needs clamping.
//!
//! ## Modes
//!
//! [`ModeId`] is opaque. The engine stores and restores it but never interprets it;
//! activating the mode is the host's job.

use crate::error::{Result, ScratchError};
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;

/// Stable key identifying a scratch destination.
///
/// Names double as file stems, so they are restricted to what is safe as a single
/// path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ScratchName(String);

impl ScratchName {
    pub const DEFAULT: &'static str = "default";

    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let invalid = |reason| ScratchError::InvalidName {
            name: name.clone(),
            reason,
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if name.starts_with('.') {
            return Err(invalid("name may not start with '.'"));
        }
        if name.contains(['/', '\\', '\0']) {
            return Err(invalid("name may not contain path separators"));
        }

        Ok(Self(name))
    }

    /// The reserved global destination.
    pub fn default_name() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    /// Derives the name of a project's scratch from its root directory.
    ///
    /// Each path component is prefixed with `!`, so `/home/me/proj` maps to
    /// `!home!me!proj`. Inside a component `!`, `%`, `\` and `:` are
    /// percent-escaped, which keeps distinct roots on distinct names: `/a!b`
    /// becomes `!a%21b` while `/a/b` stays `!a!b`.
    pub fn for_project(root: &Path) -> Self {
        let mut name = String::new();
        for component in root.components() {
            if component == Component::RootDir {
                continue;
            }
            name.push('!');
            for c in component.as_os_str().to_string_lossy().chars() {
                match c {
                    '!' => name.push_str("%21"),
                    '%' => name.push_str("%25"),
                    '\\' => name.push_str("%5C"),
                    ':' => name.push_str("%3A"),
                    other => name.push(other),
                }
            }
        }

        if name.is_empty() {
            name.push('!');
        }
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScratchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ScratchName {
    type Err = ScratchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for ScratchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque editing-mode identifier, e.g. `"text"` or `"rust"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeId(String);

impl ModeId {
    const FALLBACK: &'static str = "fundamental";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mode used when neither the caller nor a record picks one.
    pub fn fallback() -> Self {
        Self(Self::FALLBACK.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The part of a buffer that survives a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferState {
    pub content: String,
    pub cursor: usize,
    pub mode: ModeId,
}

impl BufferState {
    pub fn new(content: impl Into<String>, cursor: usize, mode: ModeId) -> Self {
        Self {
            content: content.into(),
            cursor,
            mode,
        }
        .clamped()
    }

    pub fn empty(mode: ModeId) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            mode,
        }
    }

    /// Pulls the cursor back inside the content.
    pub fn clamped(mut self) -> Self {
        self.cursor = self.cursor.min(char_len(&self.content));
        self
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// A live scratch buffer, as the host's editing surface sees it.
#[derive(Debug, Clone)]
pub struct ScratchBuffer {
    state: BufferState,
    working_dir: Option<PathBuf>,
}

impl ScratchBuffer {
    pub fn new(mode: ModeId) -> Self {
        Self {
            state: BufferState::empty(mode),
            working_dir: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.state.content
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn mode(&self) -> &ModeId {
        &self.state.mode
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn set_working_dir(&mut self, dir: PathBuf) {
        self.working_dir = Some(dir);
    }

    /// Replaces the text, keeping the cursor where it was if it still fits.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.state.content = content.into();
        self.state.cursor = self.state.cursor.min(char_len(&self.state.content));
    }

    /// Inserts at the cursor and moves the cursor past the inserted text.
    pub fn insert(&mut self, text: &str) {
        let at = byte_offset(&self.state.content, self.state.cursor);
        self.state.content.insert_str(at, text);
        self.state.cursor += char_len(text);
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.state.cursor = cursor.min(char_len(&self.state.content));
    }

    pub fn set_mode(&mut self, mode: ModeId) {
        self.state.mode = mode;
    }

    /// 1-based line the cursor sits on.
    pub fn cursor_line(&self) -> usize {
        let at = byte_offset(&self.state.content, self.state.cursor);
        self.state.content[..at].matches('\n').count() + 1
    }

    pub fn state(&self) -> BufferState {
        self.state.clone()
    }

    /// Overwrites content, cursor and mode wholesale.
    pub fn apply(&mut self, state: BufferState) {
        self.state = state.clamped();
    }
}

/// Shared handle to a live buffer.
///
/// The host keeps one clone to edit through, the registry keeps another. Everything
/// runs on the host's event loop, so `Rc<RefCell<_>>` is enough.
#[derive(Debug, Clone)]
pub struct BufferHandle(Rc<RefCell<ScratchBuffer>>);

impl BufferHandle {
    pub fn new(buffer: ScratchBuffer) -> Self {
        Self(Rc::new(RefCell::new(buffer)))
    }

    pub fn borrow(&self) -> Ref<'_, ScratchBuffer> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, ScratchBuffer> {
        self.0.borrow_mut()
    }

    /// True when both handles point at the same buffer.
    pub fn same(&self, other: &BufferHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn state(&self) -> BufferState {
        self.0.borrow().state()
    }
}
