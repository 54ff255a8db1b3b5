//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for hosts, whatever their UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns the collaborators**: the [`ScratchSession`] and the [`ProjectResolver`]
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Lifecycle logic**: that belongs in [`crate::session`]
//! - **I/O operations**: no stdout, stderr or editor launching
//! - **Presentation concerns**: returns data structures, not strings
//!
//! ## Targets
//!
//! Hosts rarely know a [`ScratchName`] up front. They know the directory the
//! user is working in, so [`ScratchApi::open`] takes a [`Target`]:
//!
//! - `Target::Default`: the global scratch
//! - `Target::Project(cwd)`: the scratch of the project containing `cwd`, or the
//!   global one (with a note) when `cwd` is not in a project
//! - `Target::Named(name)`: exactly that scratch
//!
//! Everything after opening (revert, close, delete) works on the name carried by
//! the returned [`Opened`].
//!
//! ## Generic Over Store and Resolver
//!
//! `ScratchApi<S: RecordStore, R: ProjectResolver>`:
//! - Production: `ScratchApi<FsStore, GitResolver>`
//! - Testing: `ScratchApi<MemStore, _>` with a fixed resolver
//!
//! API tests check dispatch and argument plumbing only. Command logic is tested
//! in the command modules.

use crate::commands::{self, helpers::ResolvedTarget, CmdResult, Placement, Target};
use crate::error::Result;
use crate::init::ProjectResolver;
use crate::model::{ScratchBuffer, ScratchName};
use crate::session::{HostEvent, OpenOptions, Opened, ScratchSession};
use crate::store::RecordStore;
use std::path::PathBuf;

/// The main API facade for scratch operations.
pub struct ScratchApi<S: RecordStore, R: ProjectResolver> {
    session: ScratchSession<S>,
    resolver: R,
}

impl<S: RecordStore, R: ProjectResolver> ScratchApi<S, R> {
    pub fn new(session: ScratchSession<S>, resolver: R) -> Self {
        Self { session, resolver }
    }

    pub fn session(&self) -> &ScratchSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ScratchSession<S> {
        &mut self.session
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Which scratch `target` means right now, without opening it.
    pub fn resolve(&self, target: &Target) -> ResolvedTarget {
        commands::helpers::resolve_target(self.session.settings(), &self.resolver, target)
    }

    pub fn open(&mut self, target: Target, discard: bool, placement: Placement) -> Result<CmdResult> {
        commands::open::run(&mut self.session, &self.resolver, &target, discard, placement)
    }

    /// Host hook for "create the default scratch". `None` while redirect is off.
    pub fn default_scratch(&mut self) -> Option<Opened> {
        self.session.default_scratch(OpenOptions::new())
    }

    pub fn revert(&mut self, name: &ScratchName) -> Result<CmdResult> {
        commands::revert::run(&mut self.session, name)
    }

    pub fn close(&mut self, name: &ScratchName) -> Result<CmdResult> {
        commands::close::run(&mut self.session, name)
    }

    pub fn delete(&self, name: &ScratchName) -> Result<CmdResult> {
        commands::delete::run(&self.session, name)
    }

    pub fn clear<F>(&self, confirm: F) -> Result<CmdResult>
    where
        F: FnOnce(&[PathBuf]) -> bool,
    {
        commands::clear::run(&self.session, confirm)
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.session)
    }

    pub fn path(&self, names: &[ScratchName]) -> Result<CmdResult> {
        commands::paths::run(&self.session, names)
    }

    pub fn event(&mut self, event: HostEvent) -> Result<CmdResult> {
        commands::event::run(&mut self.session, event)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.session.set_enabled(enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.session.is_enabled()
    }

    pub fn on_buffer_created(&mut self, hook: impl Fn(&ScratchName, &mut ScratchBuffer) + 'static) {
        self.session.on_buffer_created(hook);
    }
}
