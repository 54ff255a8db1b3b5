use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ScratchName;
use crate::session::ScratchSession;
use crate::store::RecordStore;

/// Close callback. A write failure is still returned as an error, after the
/// buffer has been released.
pub fn run<S: RecordStore>(session: &mut ScratchSession<S>, name: &ScratchName) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if session.close(name)? {
        result.add_message(CmdMessage::success(format!("Saved scratch '{}'.", name)));
    } else {
        result.add_message(CmdMessage::info(format!("Scratch '{}' is not open.", name)));
    }

    Ok(result)
}
