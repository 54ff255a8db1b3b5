use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::ScratchName;
use crate::session::ScratchSession;
use crate::store::RecordStore;

/// Where each named record lives, whether or not it has been written yet.
pub fn run<S: RecordStore>(session: &ScratchSession<S>, names: &[ScratchName]) -> Result<CmdResult> {
    let paths = names
        .iter()
        .map(|name| session.store().record_path(name))
        .collect();
    Ok(CmdResult::default().with_paths(paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionSettings;
    use crate::store::fs::FsStore;
    use tempfile::TempDir;

    #[test]
    fn returns_record_paths() {
        let dir = TempDir::new().unwrap();
        let s = ScratchSession::new(
            FsStore::new(dir.path().to_path_buf()).with_suffix(".rec"),
            SessionSettings::default(),
        );
        let names = [
            ScratchName::default_name(),
            ScratchName::new("notes").unwrap(),
        ];

        let result = run(&s, &names).unwrap();
        assert_eq!(
            result.paths,
            vec![dir.path().join("default.rec"), dir.path().join("notes.rec")]
        );
    }
}
