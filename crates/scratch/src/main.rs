//! # Scratch CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/scratchapp/`: the engine, UI-agnostic
//! - `crates/scratch/`: this CLI host, depends on `scratchapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/scratch/src/cli/)                        │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Dispatch and host duties (commands.rs)                   │
//! │  - Terminal rendering (render.rs)                           │
//! │  - $EDITOR integration (editor.rs)                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/scratchapp/src/api.rs)                   │
//! │  - Resolves targets, dispatches to command modules          │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session + Storage (crates/scratchapp/src/session.rs, store)│
//! │  - Restore on first use, flush on close and shutdown        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Engine**: unit tests per module with the in-memory store, plus
//!   filesystem integration tests in `crates/scratchapp/tests/`.
//! - **CLI**: parsing and rendering unit tests in `src/cli/`, and end-to-end
//!   runs of the binary in `tests/` with `EDITOR` pointed at a script.

mod cli;
mod editor;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
