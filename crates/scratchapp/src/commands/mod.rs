//! # Command Layer
//!
//! Each user-facing operation lives in its own submodule as a plain function over
//! a [`ScratchSession`](crate::session::ScratchSession). Commands turn session
//! outcomes into a structured [`CmdResult`] that the UI renders.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: no stdout, stderr or terminal concerns
//! - **Argument parsing**: that's the host's job
//! - **User interaction**: confirmations arrive as callbacks, the UI decides
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `opened`: the buffer handed to the host by `open`
//! - `placement`: where the host should show it
//! - `records`: records to display (for `list`)
//! - `paths`: file paths (for `path`)
//! - `messages`: structured messages with levels
//!
//! ## Testing Strategy
//!
//! Command tests use [`MemStore`](crate::store::memory::MemStore) and a fixed
//! project resolver, so they never touch the filesystem.
//!
//! ## Command Modules
//!
//! - [`open`]: Open or create a scratch buffer
//! - [`close`]: Host close callback (save, then forget)
//! - [`revert`]: Revert a live buffer to its saved record
//! - [`delete`]: Delete one record
//! - [`clear`]: Delete every record, after confirmation
//! - [`list`]: Enumerate records
//! - [`paths`]: Record file paths
//! - [`event`]: Host lifecycle events
//! - [`helpers`]: Target resolution

use crate::session::Opened;
use crate::store::RecordInfo;
use serde::Serialize;
use std::path::PathBuf;

pub mod clear;
pub mod close;
pub mod delete;
pub mod event;
pub mod helpers;
pub mod list;
pub mod open;
pub mod paths;
pub mod revert;

/// Which scratch the caller means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The configured default scratch.
    Default,
    /// The scratch of the project containing this directory.
    Project(PathBuf),
    /// A scratch picked by name.
    Named(crate::model::ScratchName),
}

/// Where the host should display an opened buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    #[default]
    SameWindow,
    OtherWindow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub opened: Option<Opened>,
    pub placement: Option<Placement>,
    pub records: Vec<RecordInfo>,
    pub paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_opened(mut self, opened: Opened, placement: Placement) -> Self {
        self.opened = Some(opened);
        self.placement = Some(placement);
        self
    }

    pub fn with_records(mut self, records: Vec<RecordInfo>) -> Self {
        self.records = records;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
