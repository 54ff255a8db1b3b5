use crate::commands::{CmdMessage, Target};
use crate::init::ProjectResolver;
use crate::model::ScratchName;
use crate::session::SessionSettings;
use std::path::PathBuf;

/// A [`Target`] pinned down to a concrete scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub name: ScratchName,
    /// Directory new buffers should start in.
    pub working_dir: Option<PathBuf>,
    /// Set when resolution had to fall back.
    pub note: Option<String>,
}

pub fn resolve_target<R: ProjectResolver>(
    settings: &SessionSettings,
    resolver: &R,
    target: &Target,
) -> ResolvedTarget {
    match target {
        Target::Named(name) => ResolvedTarget {
            name: name.clone(),
            working_dir: None,
            note: None,
        },
        Target::Default => ResolvedTarget {
            name: settings.default_name.clone(),
            working_dir: None,
            note: None,
        },
        Target::Project(cwd) => match resolver.project_root(cwd) {
            Some(root) => ResolvedTarget {
                name: ScratchName::for_project(&root),
                working_dir: Some(root),
                note: None,
            },
            None => ResolvedTarget {
                name: settings.default_name.clone(),
                working_dir: Some(cwd.clone()),
                note: Some(format!(
                    "{} is not inside a project, using the '{}' scratch.",
                    cwd.display(),
                    settings.default_name
                )),
            },
        },
    }
}

impl ResolvedTarget {
    pub fn note_message(&self) -> Option<CmdMessage> {
        self.note.as_deref().map(CmdMessage::info)
    }
}
