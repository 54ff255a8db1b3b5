//! # Scratch Session
//!
//! [`ScratchSession`] is the lifecycle controller. It owns the [`BufferRegistry`]
//! and is the only thing that writes to it, and it decides when a buffer is
//! restored from its record and when it is flushed back out.
//!
//! ## Lifecycle
//!
//! A name is either *untracked* or *live*:
//!
//! ```text
//!              get_or_create                close (flush, then untrack)
//!  untracked ───────────────▶ live ──────────────────────────────▶ untracked
//!                              │ ▲
//!                              └─┘ flush / restore
//! ```
//!
//! Nothing is loaded eagerly. A fresh process has an empty registry, and each
//! buffer is restored from disk the first time someone asks for it.
//!
//! ## Never Clobber Live Edits
//!
//! Asking for a name that is already live returns the live buffer untouched,
//! even if the record on disk differs. The only ways to overwrite a live buffer
//! are an explicit `discard` or an explicit [`ScratchSession::restore`].
//!
//! ## Failure Policy
//!
//! - A missing record means "start empty".
//! - A record that cannot be decoded is logged and also means "start empty".
//!   The scratch stays usable; the bad record is overwritten on the next flush.
//!   An explicit revert to such a record leaves the live buffer alone.
//! - A failed write is returned to explicit callers (`flush`, `close`) and only
//!   logged and collected for background flushes (`flush_all`, host events).
//!   Nothing is retried.
//!
//! ## Host Contract
//!
//! The host must call [`ScratchSession::close`] *before* it releases a buffer.
//! That call flushes synchronously; once it returns the host may tear down.

use crate::codec;
use crate::error::{Result, ScratchError};
use crate::model::{BufferHandle, BufferState, ModeId, ScratchBuffer, ScratchName};
use crate::registry::BufferRegistry;
use crate::store::RecordStore;
use log::{debug, warn};
use std::path::PathBuf;

/// How a new buffer picks its mode when the caller does not name one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialMode {
    /// Use the mode of the buffer the host last reported as active.
    InheritActive,
    /// Always use this mode.
    Fixed(ModeId),
    /// Use the fallback mode.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub default_name: ScratchName,
    pub initial_mode: InitialMode,
    pub fallback_mode: ModeId,
    pub enabled: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_name: ScratchName::default_name(),
            initial_mode: InitialMode::InheritActive,
            fallback_mode: ModeId::fallback(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Start empty, ignoring both the live buffer and the record.
    pub discard: bool,
    /// Mode for a buffer that does not get one from its record.
    pub default_mode: Option<ModeId>,
    pub working_dir: Option<PathBuf>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discard(mut self, discard: bool) -> Self {
        self.discard = discard;
        self
    }

    pub fn default_mode(mut self, mode: ModeId) -> Self {
        self.default_mode = Some(mode);
        self
    }

    pub fn working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }
}

/// Where the returned buffer's state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Already open; returned as is.
    Live,
    /// Loaded from its record.
    Restored,
    /// Started empty: no record, or `discard` was set.
    Fresh,
    /// Started empty because the record could not be read or decoded.
    Recovered,
}

#[derive(Debug, Clone)]
pub struct Opened {
    pub name: ScratchName,
    pub handle: BufferHandle,
    pub origin: Origin,
}

/// Outcome of a bulk flush.
#[derive(Debug, Default)]
pub struct FlushReport {
    pub flushed: Vec<ScratchName>,
    pub failed: Vec<(ScratchName, String)>,
}

impl FlushReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Events the host forwards to the session. All of them flush every live buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Shutdown,
    /// The host switched the visible buffer; `mode` is the new buffer's mode.
    VisibleBufferChanged { mode: Option<ModeId> },
    SessionAttached,
    FocusChanged,
}

pub type CreatedHook = Box<dyn Fn(&ScratchName, &mut ScratchBuffer)>;

enum Loaded {
    Record(BufferState),
    Missing,
    Unreadable,
}

pub struct ScratchSession<S: RecordStore> {
    store: S,
    registry: BufferRegistry,
    settings: SessionSettings,
    hooks: Vec<CreatedHook>,
    last_active_mode: Option<ModeId>,
    enabled: bool,
}

impl<S: RecordStore> ScratchSession<S> {
    pub fn new(store: S, settings: SessionSettings) -> Self {
        let enabled = settings.enabled;
        Self {
            store,
            registry: BufferRegistry::new(),
            settings,
            hooks: Vec::new(),
            last_active_mode: None,
            enabled,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &BufferRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn last_active_mode(&self) -> Option<&ModeId> {
        self.last_active_mode.as_ref()
    }

    /// Register a callback run on every newly created or restored buffer,
    /// before it is tracked and handed out.
    pub fn on_buffer_created(&mut self, hook: impl Fn(&ScratchName, &mut ScratchBuffer) + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Mode a new buffer gets when neither the caller nor a record decides.
    pub fn initial_mode(&self) -> ModeId {
        match &self.settings.initial_mode {
            InitialMode::InheritActive => self
                .last_active_mode
                .clone()
                .unwrap_or_else(|| self.settings.fallback_mode.clone()),
            InitialMode::Fixed(mode) => mode.clone(),
            InitialMode::Fallback => self.settings.fallback_mode.clone(),
        }
    }

    pub fn get_or_create(&mut self, name: &ScratchName, options: OpenOptions) -> Opened {
        let live = self.registry.get_live(name);

        if !options.discard {
            if let Some(handle) = &live {
                debug!("scratch '{}' already live", name);
                return Opened {
                    name: name.clone(),
                    handle: handle.clone(),
                    origin: Origin::Live,
                };
            }
        }

        let default_mode = options
            .default_mode
            .unwrap_or_else(|| self.initial_mode());
        let mut buffer = ScratchBuffer::new(default_mode);

        let origin = if options.discard {
            Origin::Fresh
        } else {
            match self.load(name) {
                Loaded::Record(state) => {
                    buffer.apply(state);
                    Origin::Restored
                }
                Loaded::Missing => Origin::Fresh,
                Loaded::Unreadable => Origin::Recovered,
            }
        };

        if let Some(dir) = options.working_dir {
            buffer.set_working_dir(dir);
        }
        for hook in &self.hooks {
            hook(name, &mut buffer);
        }

        // A discarded live buffer is reset in place so the host keeps its handle.
        let handle = match live {
            Some(handle) => {
                *handle.borrow_mut() = buffer;
                handle
            }
            None => {
                let handle = BufferHandle::new(buffer);
                self.registry.track(name.clone(), handle.clone());
                handle
            }
        };

        debug!("scratch '{}' opened ({:?})", name, origin);
        Opened {
            name: name.clone(),
            handle,
            origin,
        }
    }

    /// Close callback: flush, then stop tracking.
    ///
    /// The buffer is untracked even when the flush fails; the error is returned
    /// so the host can tell the user their scratch was not saved.
    pub fn close(&mut self, name: &ScratchName) -> Result<bool> {
        let Some(handle) = self.registry.get_live(name) else {
            return Ok(false);
        };

        let written = self.write_state(name, &handle);
        self.registry.untrack(name);
        if let Err(e) = &written {
            warn!("scratch '{}' closed without saving: {}", name, e);
        }
        written.map(|()| true)
    }

    /// Write the live buffer under `name` to its record. `Ok(false)` if not live.
    pub fn flush(&self, name: &ScratchName) -> Result<bool> {
        match self.registry.get_live(name) {
            Some(handle) => self.write_state(name, &handle).map(|()| true),
            None => Ok(false),
        }
    }

    /// Flush every live buffer. Failures are logged and reported, never raised.
    pub fn flush_all(&self) -> FlushReport {
        let mut report = FlushReport::default();

        for (name, handle) in self.registry.all_live() {
            if !self.registry.is_tracked(&name, &handle) {
                continue;
            }
            match self.write_state(&name, &handle) {
                Ok(()) => report.flushed.push(name),
                Err(e) => {
                    warn!("failed to save scratch '{}': {}", name, e);
                    report.failed.push((name, e.to_string()));
                }
            }
        }
        report
    }

    /// Revert the live buffer to its record, dropping unsaved edits.
    ///
    /// `Ok(false)` if there is no usable record to revert to. The buffer is then
    /// left as it was.
    pub fn restore(&mut self, name: &ScratchName) -> Result<bool> {
        let handle = self
            .registry
            .get_live(name)
            .ok_or_else(|| ScratchError::NotLive(name.to_string()))?;

        let Some(bytes) = self.store.read(name)? else {
            return Ok(false);
        };
        let state = match codec::decode(&bytes) {
            Ok(state) => state,
            Err(e) => {
                warn!("not reverting '{}', record is unreadable: {}", name, e);
                return Ok(false);
            }
        };
        handle.borrow_mut().apply(state);
        debug!("scratch '{}' reverted to saved", name);
        Ok(true)
    }

    pub fn remove_record(&self, name: &ScratchName) -> Result<bool> {
        self.store.delete(name)
    }

    pub fn remove_all_records(&self) -> Result<usize> {
        self.store.delete_all()
    }

    pub fn handle_event(&mut self, event: HostEvent) -> FlushReport {
        debug!("host event {:?}", event);
        if let HostEvent::VisibleBufferChanged { mode: Some(mode) } = &event {
            self.last_active_mode = Some(mode.clone());
        }
        self.flush_all()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn the default-scratch redirect on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The host's "create the default scratch" entry point.
    ///
    /// `None` while the redirect is off; the host then uses its native scratch.
    pub fn default_scratch(&mut self, options: OpenOptions) -> Option<Opened> {
        if !self.enabled {
            return None;
        }
        let name = self.settings.default_name.clone();
        Some(self.get_or_create(&name, options))
    }

    fn load(&self, name: &ScratchName) -> Loaded {
        let bytes = match self.store.read(name) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Loaded::Missing,
            Err(e) => {
                warn!("could not read scratch '{}', starting empty: {}", name, e);
                return Loaded::Unreadable;
            }
        };

        match codec::decode(&bytes) {
            Ok(state) => Loaded::Record(state),
            Err(e) => {
                warn!("ignoring unreadable record for '{}': {}", name, e);
                Loaded::Unreadable
            }
        }
    }

    fn write_state(&self, name: &ScratchName, handle: &BufferHandle) -> Result<()> {
        let bytes = codec::encode(&handle.state());
        self.store.write(name, &bytes)?;
        debug!("scratch '{}' saved ({} bytes)", name, bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn name(s: &str) -> ScratchName {
        ScratchName::new(s).unwrap()
    }

    fn session() -> ScratchSession<MemStore> {
        ScratchSession::new(MemStore::new(), SessionSettings::default())
    }

    fn seed(session: &ScratchSession<MemStore>, n: &str, content: &str, cursor: usize, mode: &str) {
        let state = BufferState::new(content, cursor, ModeId::from(mode));
        session.store().write(&name(n), &codec::encode(&state)).unwrap();
    }

    #[test]
    fn test_missing_record_starts_empty() {
        let mut s = session();
        let opened = s.get_or_create(
            &name("nonexistent-project"),
            OpenOptions::new().default_mode(ModeId::from("M")),
        );

        assert_eq!(opened.origin, Origin::Fresh);
        let buf = opened.handle.borrow();
        assert_eq!(buf.content(), "");
        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.mode(), &ModeId::from("M"));
        assert_eq!(s.store().write_count(), 0);
        assert!(s.store().raw(&name("nonexistent-project")).is_none());
    }

    #[test]
    fn test_restores_record_over_default_mode() {
        let mut s = session();
        seed(&s, "proj-a", "hello", 5, "text");

        let opened = s.get_or_create(
            &name("proj-a"),
            OpenOptions::new().default_mode(ModeId::from("fundamental")),
        );

        assert_eq!(opened.origin, Origin::Restored);
        assert_eq!(
            opened.handle.state(),
            BufferState::new("hello", 5, ModeId::from("text"))
        );
        assert!(s.registry().get_live(&name("proj-a")).is_some());
    }

    #[test]
    fn test_live_buffer_is_never_restored_over() {
        let mut s = session();
        let first = s.get_or_create(&name("a"), OpenOptions::new());
        first.handle.borrow_mut().insert("unsaved edits");

        seed(&s, "a", "different on disk", 0, "text");
        let second = s.get_or_create(&name("a"), OpenOptions::new());

        assert_eq!(second.origin, Origin::Live);
        assert!(second.handle.same(&first.handle));
        assert_eq!(second.handle.borrow().content(), "unsaved edits");
    }

    #[test]
    fn test_discard_starts_empty_and_keeps_record() {
        let mut s = session();
        seed(&s, "a", "keep me", 2, "text");
        let before = s.store().raw(&name("a"));

        let opened = s.get_or_create(&name("a"), OpenOptions::new().discard(true));
        assert_eq!(opened.origin, Origin::Fresh);
        assert_eq!(opened.handle.borrow().content(), "");
        assert_eq!(s.store().raw(&name("a")), before);

        s.flush(&name("a")).unwrap();
        let after = codec::decode(&s.store().raw(&name("a")).unwrap()).unwrap();
        assert_eq!(after.content, "");
    }

    #[test]
    fn test_discard_resets_live_buffer_in_place() {
        let mut s = session();
        let first = s.get_or_create(&name("a"), OpenOptions::new());
        first.handle.borrow_mut().insert("scribble");

        let second = s.get_or_create(&name("a"), OpenOptions::new().discard(true));
        assert!(second.handle.same(&first.handle));
        assert_eq!(first.handle.borrow().content(), "");
        assert_eq!(s.registry().len(), 1);
    }

    #[test]
    fn test_corrupt_record_recovers_empty() {
        let mut s = session();
        s.store().write(&name("a"), b"{\"format\":1,\"mo").unwrap();

        let opened = s.get_or_create(
            &name("a"),
            OpenOptions::new().default_mode(ModeId::from("text")),
        );
        assert_eq!(opened.origin, Origin::Recovered);
        assert_eq!(opened.handle.borrow().content(), "");
        assert_eq!(opened.handle.borrow().mode(), &ModeId::from("text"));
    }

    #[test]
    fn test_working_dir_applied() {
        let mut s = session();
        let opened = s.get_or_create(
            &name("a"),
            OpenOptions::new().working_dir(PathBuf::from("/tmp/proj")),
        );
        assert_eq!(
            opened.handle.borrow().working_dir(),
            Some(std::path::Path::new("/tmp/proj"))
        );
    }

    #[test]
    fn test_flush_is_idempotent() {
        let mut s = session();
        let opened = s.get_or_create(&name("a"), OpenOptions::new());
        opened.handle.borrow_mut().insert("stable");

        assert!(s.flush(&name("a")).unwrap());
        let first = s.store().raw(&name("a")).unwrap();
        assert!(s.flush(&name("a")).unwrap());
        let second = s.store().raw(&name("a")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_flush_untracked_is_noop() {
        let s = session();
        assert!(!s.flush(&name("ghost")).unwrap());
        assert_eq!(s.store().write_count(), 0);
    }

    #[test]
    fn test_flush_reports_write_failure() {
        let mut s = session();
        s.get_or_create(&name("a"), OpenOptions::new());
        s.store().set_simulate_write_error(true);

        let err = s.flush(&name("a")).unwrap_err();
        assert!(matches!(err, ScratchError::Write { .. }));
    }

    #[test]
    fn test_flush_all_collects_failures() {
        let mut s = session();
        s.get_or_create(&name("a"), OpenOptions::new());
        s.get_or_create(&name("b"), OpenOptions::new());
        s.store().set_simulate_write_error(true);

        let report = s.flush_all();
        assert!(report.flushed.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_flush_all_visits_each_once() {
        let mut s = session();
        for n in ["a", "b", "c"] {
            s.get_or_create(&name(n), OpenOptions::new());
        }

        let report = s.flush_all();
        assert!(report.is_clean());
        let mut flushed = report.flushed.clone();
        flushed.sort();
        assert_eq!(flushed, vec![name("a"), name("b"), name("c")]);
        assert_eq!(s.store().write_count(), 3);
    }

    #[test]
    fn test_close_flushes_then_untracks() {
        let mut s = session();
        let opened = s.get_or_create(&name("a"), OpenOptions::new());
        opened.handle.borrow_mut().insert("bye");

        assert!(s.close(&name("a")).unwrap());
        assert!(s.registry().get_live(&name("a")).is_none());

        let saved = codec::decode(&s.store().raw(&name("a")).unwrap()).unwrap();
        assert_eq!(saved.content, "bye");
        assert_eq!(saved.cursor, 3);
    }

    #[test]
    fn test_close_untracks_even_when_write_fails() {
        let mut s = session();
        s.get_or_create(&name("a"), OpenOptions::new());
        s.store().set_simulate_write_error(true);

        assert!(s.close(&name("a")).is_err());
        assert!(s.registry().is_empty());
        assert!(!s.close(&name("a")).unwrap());
    }

    #[test]
    fn test_reopen_after_close_restores() {
        let mut s = session();
        let opened = s.get_or_create(&name("a"), OpenOptions::new());
        opened.handle.borrow_mut().set_content("persisted");
        opened.handle.borrow_mut().set_mode(ModeId::from("markdown"));
        s.close(&name("a")).unwrap();

        let reopened = s.get_or_create(&name("a"), OpenOptions::new());
        assert_eq!(reopened.origin, Origin::Restored);
        assert!(!reopened.handle.same(&opened.handle));
        assert_eq!(reopened.handle.borrow().content(), "persisted");
        assert_eq!(reopened.handle.borrow().mode(), &ModeId::from("markdown"));
    }

    #[test]
    fn test_restore_reverts_live_buffer() {
        let mut s = session();
        let opened = s.get_or_create(&name("a"), OpenOptions::new());
        opened.handle.borrow_mut().set_content("saved");
        s.flush(&name("a")).unwrap();
        opened.handle.borrow_mut().set_content("unsaved");

        assert!(s.restore(&name("a")).unwrap());
        assert_eq!(opened.handle.borrow().content(), "saved");
    }

    #[test]
    fn test_restore_without_record() {
        let mut s = session();
        s.get_or_create(&name("a"), OpenOptions::new());
        assert!(!s.restore(&name("a")).unwrap());
    }

    #[test]
    fn test_restore_requires_live_buffer() {
        let mut s = session();
        seed(&s, "a", "on disk", 0, "text");
        assert!(matches!(
            s.restore(&name("a")),
            Err(ScratchError::NotLive(_))
        ));
    }

    #[test]
    fn test_restore_corrupt_record_keeps_buffer() {
        let mut s = session();
        let opened = s.get_or_create(&name("a"), OpenOptions::new());
        opened.handle.borrow_mut().set_content("mine");
        s.store().write(&name("a"), b"garbage").unwrap();

        assert!(!s.restore(&name("a")).unwrap());
        assert_eq!(opened.handle.borrow().content(), "mine");
    }

    #[test]
    fn test_remove_record_without_live_buffer() {
        let s = session();
        seed(&s, "a", "x", 0, "text");
        assert!(s.remove_record(&name("a")).unwrap());
        assert!(!s.remove_record(&name("a")).unwrap());
    }

    #[test]
    fn test_remove_all_records() {
        let s = session();
        seed(&s, "a", "x", 0, "text");
        seed(&s, "b", "y", 0, "text");
        assert_eq!(s.remove_all_records().unwrap(), 2);
        assert!(s.store().list().unwrap().is_empty());
    }

    #[test]
    fn test_initial_mode_inherits_active() {
        let mut s = session();
        assert_eq!(s.initial_mode(), ModeId::fallback());

        s.handle_event(HostEvent::VisibleBufferChanged {
            mode: Some(ModeId::from("rust")),
        });
        let opened = s.get_or_create(&name("a"), OpenOptions::new());
        assert_eq!(opened.handle.borrow().mode(), &ModeId::from("rust"));
    }

    #[test]
    fn test_initial_mode_fixed_and_fallback() {
        let settings = SessionSettings {
            initial_mode: InitialMode::Fixed(ModeId::from("org")),
            ..Default::default()
        };
        let mut s = ScratchSession::new(MemStore::new(), settings);
        s.handle_event(HostEvent::VisibleBufferChanged {
            mode: Some(ModeId::from("rust")),
        });
        assert_eq!(s.initial_mode(), ModeId::from("org"));

        let settings = SessionSettings {
            initial_mode: InitialMode::Fallback,
            fallback_mode: ModeId::from("text"),
            ..Default::default()
        };
        let mut s = ScratchSession::new(MemStore::new(), settings);
        s.handle_event(HostEvent::VisibleBufferChanged {
            mode: Some(ModeId::from("rust")),
        });
        assert_eq!(s.initial_mode(), ModeId::from("text"));
    }

    #[test]
    fn test_every_event_flushes() {
        let events = [
            HostEvent::Shutdown,
            HostEvent::VisibleBufferChanged { mode: None },
            HostEvent::SessionAttached,
            HostEvent::FocusChanged,
        ];
        for event in events {
            let mut s = session();
            s.get_or_create(&name("a"), OpenOptions::new());
            let report = s.handle_event(event);
            assert_eq!(report.flushed, vec![name("a")]);
        }
    }

    #[test]
    fn test_hooks_run_on_creation_only() {
        let mut s = session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        s.on_buffer_created(move |name, buffer| {
            log.borrow_mut().push(name.to_string());
            buffer.set_mode(ModeId::from("hooked"));
        });

        let opened = s.get_or_create(&name("a"), OpenOptions::new());
        s.get_or_create(&name("a"), OpenOptions::new());

        assert_eq!(*seen.borrow(), vec!["a".to_string()]);
        assert_eq!(opened.handle.borrow().mode(), &ModeId::from("hooked"));
    }

    #[test]
    fn test_default_scratch_redirect() {
        let mut s = session();
        let opened = s.default_scratch(OpenOptions::new()).unwrap();
        assert_eq!(opened.name, ScratchName::default_name());

        s.set_enabled(false);
        assert!(!s.is_enabled());
        assert!(s.default_scratch(OpenOptions::new()).is_none());
    }
}
