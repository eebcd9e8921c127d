use std::io::Write;

use super::{Command, CommandContext, CommandError};
use crate::core::state::{Session, Transition};

#[derive(Clone)]
pub struct MkdirCommand {
    context: CommandContext,
}

impl MkdirCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    fn create_one(&self, session: &Session, name: &str) -> Result<std::path::PathBuf, CommandError> {
        let path = self.context.resolver.resolve(session.current_dir(), name)?;
        self.context
            .fs
            .create_dir(&path)
            .map_err(|e| CommandError::from_io(e, name))?;
        Ok(path)
    }
}

impl Command for MkdirCommand {
    /// Each name succeeds or fails on its own; failures are reported inline
    /// and never stop the remaining names.
    fn execute(
        &self,
        session: &Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        if args.is_empty() {
            return Err(CommandError::Usage("mkdir <dir>..."));
        }

        for name in args {
            match self.create_one(session, name) {
                Ok(path) => writeln!(out, "Directory created: {}", path.display())?,
                Err(err) => {
                    tracing::debug!(name = %name, error = %err, "mkdir failed");
                    writeln!(out, "mkdir: {}", err)?;
                }
            }
        }
        Ok(Transition::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::test_support::*;
    use std::fs;

    #[test]
    fn test_mkdir_creates_directory() {
        let (temp, session) = sandbox();
        let (result, output) = run(&MkdirCommand::new(context()), &session, &["newDir"]);
        assert!(result.is_ok());
        assert!(temp.path().join("newDir").is_dir());
        assert!(output.starts_with("Directory created: "));
    }

    #[test]
    fn test_mkdir_multiple_names_continue_past_failure() {
        let (temp, session) = sandbox();
        fs::create_dir(temp.path().join("taken")).expect("mkdir");

        let (result, output) = run(
            &MkdirCommand::new(context()),
            &session,
            &["one", "taken", "missing/parent", "two"],
        );
        assert!(result.is_ok());
        assert!(temp.path().join("one").is_dir());
        assert!(temp.path().join("two").is_dir());
        assert!(!temp.path().join("missing").exists());

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "mkdir: 'taken': Already exists");
        assert_eq!(lines[2], "mkdir: 'missing/parent': No such file or directory");
    }

    #[test]
    fn test_mkdir_missing_argument() {
        let (temp, session) = sandbox();
        let (result, _) = run(&MkdirCommand::new(context()), &session, &[]);
        assert!(matches!(result, Err(CommandError::Usage(_))));
        assert_eq!(fs::read_dir(temp.path()).expect("read").count(), 0);
    }
}
