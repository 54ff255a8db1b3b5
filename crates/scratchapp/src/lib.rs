//! # Scratch Architecture
//!
//! Scratch keeps a persistent scratch buffer per project, plus one global
//! default. Buffers survive restarts: content, cursor and editing mode are saved
//! to a record file and restored the next time the buffer is asked for.
//!
//! This crate is the UI-agnostic engine. A host (an editor plugin, the `scratch`
//! terminal client, a test) owns the editing surface and the event loop; the
//! engine decides what to load, when to save and where records live.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host (e.g. the scratch CLI)                                │
//! │  - Edits buffers, forwards lifecycle events                 │
//! │  - The ONLY place that knows about terminals and editors    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves targets (cwd → project → name)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Turns session outcomes into CmdResult messages           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs, registry.rs)                          │
//! │  - Live buffer registry, restore and flush policy           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/, codec.rs)                                 │
//! │  - RecordStore trait: FsStore (production), MemStore (tests)│
//! │  - Self-describing record format                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Nothing in this crate writes to stdout/stderr, prompts the user or exits the
//! process. Diagnostics go through the `log` facade; the host decides whether
//! and where they are shown.
//!
//! ## Threading
//!
//! The engine runs on the host's event loop. Buffer handles are `Rc<RefCell<_>>`
//! and the session takes `&mut self`, so none of it is `Send`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for hosts
//! - [`commands`]: One module per operation
//! - [`session`]: Buffer lifecycle and persistence policy
//! - [`registry`]: Live buffer tracking
//! - [`store`]: Record storage abstraction and implementations
//! - [`codec`]: Record encoding
//! - [`model`]: Names, modes and buffers
//! - [`config`]: Configuration management
//! - [`init`]: Project resolution and context setup
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod registry;
pub mod session;
pub mod store;
