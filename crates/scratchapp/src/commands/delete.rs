use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ScratchName;
use crate::session::ScratchSession;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(session: &ScratchSession<S>, name: &ScratchName) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if session.remove_record(name)? {
        result.add_message(CmdMessage::success(format!("Deleted record '{}'.", name)));
    } else {
        result.add_message(CmdMessage::info(format!("No record named '{}'.", name)));
    }

    // An open buffer survives and will write a new record on its next flush.
    if session.registry().get_live(name).is_some() {
        result.add_message(CmdMessage::warning(format!(
            "Scratch '{}' is still open and will be saved again.",
            name
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::session::{OpenOptions, SessionSettings};
    use crate::store::memory::MemStore;

    fn setup() -> (ScratchSession<MemStore>, ScratchName) {
        let s = ScratchSession::new(MemStore::new(), SessionSettings::default());
        (s, ScratchName::new("notes").unwrap())
    }

    #[test]
    fn deletes_existing_record() {
        let (s, name) = setup();
        s.store().write(&name, b"{}").unwrap();

        let result = run(&s, &name).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert!(s.store().raw(&name).is_none());
    }

    #[test]
    fn missing_record_is_info() {
        let (s, name) = setup();
        let result = run(&s, &name).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn live_buffer_is_left_alone() {
        let (mut s, name) = setup();
        let opened = s.get_or_create(&name, OpenOptions::new());
        opened.handle.borrow_mut().insert("still here");
        s.flush(&name).unwrap();

        let result = run(&s, &name).unwrap();
        assert_eq!(result.messages[1].level, MessageLevel::Warning);
        assert_eq!(opened.handle.borrow().content(), "still here");
        assert!(s.registry().get_live(&name).is_some());
    }
}
