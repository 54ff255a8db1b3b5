//! # CLI Behavior
//!
//! This is **one possible host** for scratch, not the engine itself. It edits
//! buffers in `$EDITOR` rather than in a long-running editor session, so every
//! invocation is a whole session: open, edit, close, shut down.
//!
//! ## Naked Execution (`scratch`)
//!
//! Running `scratch` with no arguments opens the default scratch, exactly like
//! `scratch open`. Opening is nearly all of the usage, so it needs no verb.
//!
//! ## Choosing a Scratch
//!
//! - `scratch open`: the default scratch
//! - `scratch open notes`: the scratch named `notes`
//! - `scratch open -p`: the scratch of the project you are in (nearest `.git`
//!   above the current directory), or the default one outside any project
//!
//! `show`, `write` and `path` take the same arguments.
//!
//! ## Scripting
//!
//! `scratch show` prints only the content on stdout, and `scratch write` reads
//! content from stdin, so both compose with pipes:
//!
//! ```text
//! git diff | scratch write -p --append
//! ```
//!
//! ## Module Structure
//!
//! - `commands`: Context setup, dispatch and per-command handlers
//! - `render`: Output formatting (messages, record list, config)
//! - `setup`: Argument parsing via clap, help text

mod commands;
mod render;
pub mod setup;

use env_logger::{Builder, Env};

pub use commands::run;

/// Log level comes from RUST_LOG; otherwise warnings, or debug with `-v`.
fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = Builder::from_env(Env::default().default_filter_or(default)).try_init();
}
