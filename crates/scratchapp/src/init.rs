//! # Project Context
//!
//! Every project gets its own scratch, and everything outside a project shares the
//! default one. Deciding *which* project the user is in is a collaborator's job,
//! expressed by [`ProjectResolver`]; the engine only needs a stable root directory
//! to derive a [`ScratchName`](crate::model::ScratchName) from.
//!
//! ## Detection Algorithm
//!
//! [`GitResolver`] implements git-aware detection:
//!
//! 1. Start at `CWD`.
//! 2. Check: does this directory contain `.git`?
//! 3. **Match**: this is the project root.
//! 4. **No match**: move to the parent directory.
//! 5. **Stop**: at `HOME` or the filesystem root, return `None`.
//!
//! In nested repositories the innermost one wins, since the walk starts at `CWD`.
//!
//! ## Context Setup
//!
//! [`initialize`] loads configuration, opens the record directory and wires a
//! ready-to-use [`ScratchApi`]. Hosts call it once at startup.

use crate::api::ScratchApi;
use crate::config::{default_config_dir, ScratchConfig};
use crate::error::Result;
use crate::session::ScratchSession;
use crate::store::fs::FsStore;
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Maps a working directory to the root of the project it belongs to.
pub trait ProjectResolver {
    fn project_root(&self, cwd: &Path) -> Option<PathBuf>;
}

/// Resolves projects by walking up to the nearest `.git`.
#[derive(Debug, Clone, Default)]
pub struct GitResolver;

impl ProjectResolver for GitResolver {
    fn project_root(&self, cwd: &Path) -> Option<PathBuf> {
        find_project_root(cwd)
    }
}

/// Find the project root by walking up from cwd to the first directory that
/// contains `.git`. Returns None once home or the filesystem root is passed.
pub fn find_project_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(".git").exists() {
            return Some(current);
        }

        if let Some(ref home) = home_dir {
            if &current == home {
                return None;
            }
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

/// Explicit overrides from the host, taking precedence over configuration.
#[derive(Debug, Clone, Default)]
pub struct InitOverrides {
    pub root_dir: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
}

pub struct ScratchContext {
    pub api: ScratchApi<FsStore, GitResolver>,
    pub config: ScratchConfig,
}

/// Build the production context: config, record store, session and API.
pub fn initialize(overrides: InitOverrides) -> Result<ScratchContext> {
    let config_dir = overrides.config_dir.or_else(default_config_dir);
    let mut config = ScratchConfig::load(config_dir.as_deref())?;
    if let Some(root) = overrides.root_dir {
        config.root_dir = Some(root);
    }

    let store = FsStore::new(config.root_dir()?).with_suffix(&config.suffix());
    let session = ScratchSession::new(store, config.settings()?);
    let api = ScratchApi::new(session, GitResolver);

    Ok(ScratchContext { api, config })
}
