//! External editor integration.
//!
//! The buffer's text goes into a temporary file, the user's editor runs on it,
//! and whatever the file holds afterwards becomes the new content.

use anyhow::{bail, Context, Result};
use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in ["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok(fallback.to_string());
        }
    }

    bail!("No editor found. Set $EDITOR environment variable.")
}

/// Split an editor command like `code --wait` into program and arguments.
fn split_command(editor: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = editor.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Opens `path` in the editor, placing the cursor on `line`, and waits for it to close.
pub fn open_in_editor(path: &Path, line: usize) -> Result<String> {
    let editor = get_editor()?;
    let Some((program, args)) = split_command(&editor) else {
        bail!("Empty editor command");
    };

    debug!("launching '{}' on {} at line {}", editor, path.display(), line);
    let status = Command::new(program)
        .args(args)
        .arg(format!("+{}", line))
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor))?;

    debug!("editor exited with {}", status);
    if !status.success() {
        bail!("Editor '{}' exited with non-zero status", editor);
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn temp_path(label: &str) -> PathBuf {
    let safe: String = label
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    env::temp_dir().join(format!("scratch-{}-{}.txt", safe, std::process::id()))
}

/// Edit `initial` in the user's editor and return the result.
pub fn edit_content(label: &str, initial: &str, line: usize) -> Result<String> {
    let temp_file = temp_path(label);
    fs::write(&temp_file, initial)
        .with_context(|| format!("Failed to write {}", temp_file.display()))?;

    let result = open_in_editor(&temp_file, line);
    let _ = fs::remove_file(&temp_file);
    result
}
