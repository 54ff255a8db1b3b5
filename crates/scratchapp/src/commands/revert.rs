use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ScratchName;
use crate::session::ScratchSession;
use crate::store::RecordStore;

/// Drop unsaved edits in a live buffer and reload its record.
pub fn run<S: RecordStore>(session: &mut ScratchSession<S>, name: &ScratchName) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if session.restore(name)? {
        result.add_message(CmdMessage::success(format!(
            "Reverted '{}' to its saved state.",
            name
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "No saved state for '{}', buffer left unchanged.",
            name
        )));
    }

    Ok(result)
}
