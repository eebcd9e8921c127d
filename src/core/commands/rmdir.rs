use std::io::Write;

use super::{guard_session_dir, Command, CommandContext, CommandError};
use crate::core::state::{Session, Transition};
use crate::fs::EntryKind;

#[derive(Clone)]
pub struct RmdirCommand {
    context: CommandContext,
}

impl RmdirCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for RmdirCommand {
    fn execute(
        &self,
        session: &Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        let (raw, target) = self.context.path_arg(session, args, 0, "rmdir <dir>")?;
        let fs = &self.context.fs;

        match fs.entry_kind(&target, false) {
            Ok(EntryKind::Directory) => {}
            Ok(_) => {
                return Err(CommandError::WrongType {
                    subject: raw.to_string(),
                    expected: EntryKind::Directory,
                })
            }
            Err(e) => return Err(CommandError::from_io(e, raw)),
        }

        guard_session_dir(session, &target, raw)?;

        // Emptiness is checked up front so the report does not depend on the
        // host's error code for a populated directory.
        let has_children = fs
            .read_dir(&target)
            .map(|children| !children.is_empty())
            .map_err(|e| CommandError::from_io(e, raw))?;
        if has_children {
            return Err(CommandError::NotEmpty(raw.to_string()));
        }

        fs.remove_dir(&target)
            .map_err(|e| CommandError::from_io(e, raw))?;
        writeln!(out, "Directory deleted: {}", target.display())?;
        Ok(Transition::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::test_support::*;
    use crate::core::commands::MkdirCommand;
    use std::collections::BTreeSet;
    use std::fs;

    #[test]
    fn test_mkdir_rmdir_round_trip() {
        let (temp, session) = sandbox();
        fs::write(temp.path().join("keep.txt"), "").expect("write");
        let listing = || -> BTreeSet<_> {
            fs::read_dir(temp.path())
                .expect("read")
                .map(|e| e.expect("entry").file_name())
                .collect()
        };
        let before = listing();

        let (created, _) = run(&MkdirCommand::new(context()), &session, &["a"]);
        assert!(created.is_ok());
        let (removed, output) = run(&RmdirCommand::new(context()), &session, &["a"]);
        assert!(removed.is_ok());
        assert!(output.starts_with("Directory deleted: "));

        assert_eq!(before, listing());
    }

    #[test]
    fn test_rmdir_refuses_non_empty() {
        let (temp, session) = sandbox();
        fs::create_dir(temp.path().join("full")).expect("mkdir");
        fs::write(temp.path().join("full/file.txt"), "data").expect("write");

        let (result, _) = run(&RmdirCommand::new(context()), &session, &["full"]);
        assert!(matches!(result, Err(CommandError::NotEmpty(ref s)) if s == "full"));
        assert!(temp.path().join("full").is_dir());
        assert!(temp.path().join("full/file.txt").is_file());
    }

    #[test]
    fn test_rmdir_distinct_errors() {
        let (temp, session) = sandbox();
        fs::write(temp.path().join("plain.txt"), "").expect("write");
        let cmd = RmdirCommand::new(context());

        let (missing, _) = run(&cmd, &session, &["ghost"]);
        assert!(matches!(missing, Err(CommandError::NotFound(_))));

        let (file, _) = run(&cmd, &session, &["plain.txt"]);
        assert!(matches!(file, Err(CommandError::WrongType { .. })));

        let (usage, _) = run(&cmd, &session, &[]);
        assert!(matches!(usage, Err(CommandError::Usage(_))));
    }
}
