use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::ScratchSession;
use crate::store::RecordStore;
use std::path::PathBuf;

/// Delete every record once `confirm` agrees.
///
/// `confirm` sees the files about to go, which is everything the store would
/// remove, not only what `list` shows. It is not called when there is nothing
/// to delete. Declining is not an error.
pub fn run<S, F>(session: &ScratchSession<S>, confirm: F) -> Result<CmdResult>
where
    S: RecordStore,
    F: FnOnce(&[PathBuf]) -> bool,
{
    let paths = session.store().record_paths()?;
    let mut result = CmdResult::default();

    if paths.is_empty() {
        result.add_message(CmdMessage::info("No records to delete."));
        return Ok(result);
    }

    if !confirm(&paths) {
        result.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(result.with_paths(paths));
    }

    let removed = session.remove_all_records()?;
    result.add_message(CmdMessage::success(format!("Deleted {} record(s).", removed)));
    Ok(result.with_paths(paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::ScratchName;
    use crate::session::SessionSettings;
    use crate::store::memory::MemStore;
    use std::cell::Cell;

    fn seeded() -> ScratchSession<MemStore> {
        let s = ScratchSession::new(MemStore::new(), SessionSettings::default());
        for n in ["a", "b"] {
            s.store().write(&ScratchName::new(n).unwrap(), b"{}").unwrap();
        }
        s
    }

    #[test]
    fn confirmed_clear_deletes_all() {
        let s = seeded();
        let result = run(&s, |paths| paths.len() == 2).unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.messages[0].content, "Deleted 2 record(s).");
        assert!(s.store().list().unwrap().is_empty());
    }

    #[test]
    fn declined_clear_keeps_records() {
        let s = seeded();
        let result = run(&s, |_| false).unwrap();

        assert_eq!(result.messages[0].content, "Operation cancelled.");
        assert_eq!(s.store().list().unwrap().len(), 2);
    }

    #[test]
    fn empty_store_skips_confirmation() {
        let s = ScratchSession::new(MemStore::new(), SessionSettings::default());
        let asked = Cell::new(false);
        let result = run(&s, |_| {
            asked.set(true);
            true
        })
        .unwrap();

        assert!(!asked.get());
        assert_eq!(result.messages[0].content, "No records to delete.");
    }
}
