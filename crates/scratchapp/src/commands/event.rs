use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::{HostEvent, ScratchSession};
use crate::store::RecordStore;

/// Forward a host event. Write failures come back as warnings; the event
/// itself never fails.
pub fn run<S: RecordStore>(session: &mut ScratchSession<S>, event: HostEvent) -> Result<CmdResult> {
    let report = session.handle_event(event);
    let mut result = CmdResult::default();

    for (name, reason) in &report.failed {
        result.add_message(CmdMessage::warning(format!(
            "Could not save scratch '{}': {}",
            name, reason
        )));
    }

    Ok(result)
}
