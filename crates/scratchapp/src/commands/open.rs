use crate::commands::{CmdMessage, CmdResult, Placement, Target};
use crate::error::Result;
use crate::init::ProjectResolver;
use crate::session::{OpenOptions, Origin, ScratchSession};
use crate::store::RecordStore;

use super::helpers::resolve_target;

pub fn run<S: RecordStore, R: ProjectResolver>(
    session: &mut ScratchSession<S>,
    resolver: &R,
    target: &Target,
    discard: bool,
    placement: Placement,
) -> Result<CmdResult> {
    let resolved = resolve_target(session.settings(), resolver, target);
    let mut result = CmdResult::default();
    if let Some(note) = resolved.note_message() {
        result.add_message(note);
    }

    let mut options = OpenOptions::new().discard(discard);
    if let Some(dir) = resolved.working_dir {
        options = options.working_dir(dir);
    }

    let opened = session.get_or_create(&resolved.name, options);
    result.add_message(origin_message(&opened.name.to_string(), opened.origin));

    Ok(result.with_opened(opened, placement))
}

fn origin_message(name: &str, origin: Origin) -> CmdMessage {
    match origin {
        Origin::Live => CmdMessage::info(format!("Scratch '{}' is already open.", name)),
        Origin::Restored => CmdMessage::success(format!("Restored scratch '{}'.", name)),
        Origin::Fresh => CmdMessage::info(format!("Started empty scratch '{}'.", name)),
        Origin::Recovered => CmdMessage::warning(format!(
            "Saved scratch '{}' could not be read, starting empty.",
            name
        )),
    }
}
