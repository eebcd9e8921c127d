use std::io::Write;

use super::{guard_session_dir, Command, CommandContext, CommandError};
use crate::core::state::{Session, Transition};

#[derive(Clone)]
pub struct MvCommand {
    context: CommandContext,
}

impl MvCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for MvCommand {
    fn execute(
        &self,
        session: &Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        const USAGE: &str = "mv <src> <dest>";
        let (src_raw, source) = self.context.path_arg(session, args, 0, USAGE)?;
        let (_, mut destination) = self.context.path_arg(session, args, 1, USAGE)?;
        let fs = &self.context.fs;

        if !fs.exists(&source) {
            return Err(CommandError::NotFound(src_raw.to_string()));
        }
        guard_session_dir(session, &source, src_raw)?;

        let name = source
            .file_name()
            .ok_or(CommandError::Usage(USAGE))?
            .to_os_string();

        // A directory destination means "move into".
        if fs.is_dir(&destination) {
            destination.push(&name);
        }

        fs.rename(&source, &destination)
            .map_err(|e| CommandError::from_io(e, src_raw))?;
        writeln!(
            out,
            "Moved {} to {}",
            name.to_string_lossy(),
            destination.display()
        )?;
        Ok(Transition::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::test_support::*;
    use std::fs;

    #[test]
    fn test_mv_renames_file() {
        let (temp, session) = sandbox();
        fs::write(temp.path().join("a.txt"), "content").expect("write");

        let (result, _) = run(&MvCommand::new(context()), &session, &["a.txt", "b.txt"]);
        assert!(result.is_ok());
        assert!(!temp.path().join("a.txt").exists());
        assert_eq!(
            fs::read_to_string(temp.path().join("b.txt")).expect("read"),
            "content"
        );
    }

    #[test]
    fn test_mv_into_directory() {
        let (temp, session) = sandbox();
        fs::write(temp.path().join("a.txt"), "content").expect("write");
        fs::create_dir(temp.path().join("box")).expect("mkdir");

        let (result, output) = run(&MvCommand::new(context()), &session, &["a.txt", "box"]);
        assert!(result.is_ok());
        assert!(temp.path().join("box/a.txt").is_file());
        assert!(output.starts_with("Moved a.txt to "));
    }

    #[test]
    fn test_mv_overwrites_existing_file() {
        let (temp, session) = sandbox();
        fs::write(temp.path().join("new.txt"), "new").expect("write");
        fs::write(temp.path().join("old.txt"), "old").expect("write");

        let (result, _) = run(&MvCommand::new(context()), &session, &["new.txt", "old.txt"]);
        assert!(result.is_ok());
        assert_eq!(
            fs::read_to_string(temp.path().join("old.txt")).expect("read"),
            "new"
        );
    }

    #[test]
    fn test_mv_errors() {
        let (_temp, session) = sandbox();
        let cmd = MvCommand::new(context());

        let (missing, _) = run(&cmd, &session, &["ghost", "x"]);
        assert!(matches!(missing, Err(CommandError::NotFound(ref s)) if s == "ghost"));

        let (usage, _) = run(&cmd, &session, &["only-one"]);
        assert!(matches!(usage, Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_mv_refuses_session_dir() {
        let (temp, session) = sandbox();
        let (result, _) = run(&MvCommand::new(context()), &session, &[".", "../elsewhere"]);
        assert!(result.is_err());
        assert!(temp.path().is_dir());
    }
}
