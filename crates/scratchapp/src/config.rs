//! # Configuration
//!
//! Configuration is loaded with [`confique`] in layers, highest priority first:
//!
//! 1. **Environment variables**: `SCRATCH_DIR`, `SCRATCH_SUFFIX`, `SCRATCH_DEFAULT_NAME`.
//! 2. **Config file**: `scratch.toml` in the OS config directory (via `directories`).
//! 3. **Compiled defaults**: `#[config(default = ...)]` below.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `root_dir` | OS data dir | Where records are stored |
//! | `suffix` | `.scratch` | Record file suffix |
//! | `default_name` | `default` | Name of the global scratch |
//! | `initial_mode` | `inherit` | `inherit`, `fixed` or `default` |
//! | `fixed_mode` | – | Mode used by the `fixed` policy |
//! | `fallback_mode` | `fundamental` | Mode used by `default`, and by `inherit` with nothing to inherit |
//! | `enabled` | `true` | Whether the default scratch is redirected to the engine |

use crate::error::{Result, ScratchError};
use crate::model::{ModeId, ScratchName};
use crate::session::{InitialMode, SessionSettings};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "scratch.toml";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InitialModeKind {
    Inherit,
    Fixed,
    #[serde(rename = "default")]
    Fallback,
}

impl InitialModeKind {
    /// The value as written in `scratch.toml`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inherit => "inherit",
            Self::Fixed => "fixed",
            Self::Fallback => "default",
        }
    }
}

/// Configuration for scratch, stored in `scratch.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScratchConfig {
    /// Directory holding the records. Defaults to the OS data directory.
    #[config(env = "SCRATCH_DIR")]
    pub root_dir: Option<PathBuf>,

    /// Suffix of record files (e.g. ".scratch", ".rec")
    #[config(env = "SCRATCH_SUFFIX", default = ".scratch")]
    pub suffix: String,

    /// Name used when there is no project context
    #[config(env = "SCRATCH_DEFAULT_NAME", default = "default")]
    pub default_name: String,

    /// How new buffers pick a mode: "inherit", "fixed" or "default"
    #[config(default = "inherit")]
    pub initial_mode: InitialModeKind,

    /// Mode for the "fixed" policy
    pub fixed_mode: Option<String>,

    #[config(default = "fundamental")]
    pub fallback_mode: String,

    #[config(default = true)]
    pub enabled: bool,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            suffix: ".scratch".to_string(),
            default_name: ScratchName::DEFAULT.to_string(),
            initial_mode: InitialModeKind::Inherit,
            fixed_mode: None,
            fallback_mode: "fundamental".to_string(),
            enabled: true,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "scratch", "scratch")
}

/// OS config directory, where `scratch.toml` is looked up.
pub fn default_config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

impl ScratchConfig {
    /// Load from the environment and `<config_dir>/scratch.toml`. A missing file
    /// just means defaults.
    pub fn load(config_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(dir) = config_dir {
            builder = builder.file(dir.join(CONFIG_FILENAME));
        }
        builder
            .load()
            .map_err(|e| ScratchError::Config(e.to_string()))
    }

    /// Load from one file only, ignoring the environment.
    pub fn load_file(path: &Path) -> Result<Self> {
        Self::builder()
            .file(path)
            .load()
            .map_err(|e| ScratchError::Config(e.to_string()))
    }

    /// Get the suffix, normalized to start with a dot.
    pub fn suffix(&self) -> String {
        if self.suffix.starts_with('.') {
            self.suffix.clone()
        } else {
            format!(".{}", self.suffix)
        }
    }

    pub fn root_dir(&self) -> Result<PathBuf> {
        match &self.root_dir {
            Some(dir) => Ok(dir.clone()),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| ScratchError::Config("Could not determine data directory".into())),
        }
    }

    pub fn settings(&self) -> Result<SessionSettings> {
        let default_name = ScratchName::new(self.default_name.as_str())
            .map_err(|e| ScratchError::Config(e.to_string()))?;

        let initial_mode = match self.initial_mode {
            InitialModeKind::Inherit => InitialMode::InheritActive,
            InitialModeKind::Fallback => InitialMode::Fallback,
            InitialModeKind::Fixed => match &self.fixed_mode {
                Some(mode) => InitialMode::Fixed(ModeId::new(mode.as_str())),
                None => {
                    return Err(ScratchError::Config(
                        "initial_mode = \"fixed\" requires fixed_mode".into(),
                    ))
                }
            },
        };

        Ok(SessionSettings {
            default_name,
            initial_mode,
            fallback_mode: ModeId::new(self.fallback_mode.as_str()),
            enabled: self.enabled,
        })
    }
}
