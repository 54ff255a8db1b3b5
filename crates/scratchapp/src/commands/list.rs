use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::ScratchSession;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(session: &ScratchSession<S>) -> Result<CmdResult> {
    let records = session.store().list()?;
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("No saved scratches."));
    }
    Ok(result.with_records(records))
}
