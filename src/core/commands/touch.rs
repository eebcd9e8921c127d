use std::io::Write;

use super::{Command, CommandContext, CommandError};
use crate::core::state::{Session, Transition};

#[derive(Clone)]
pub struct TouchCommand {
    context: CommandContext,
}

impl TouchCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for TouchCommand {
    fn execute(
        &self,
        session: &Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        let (raw, path) = self.context.path_arg(session, args, 0, "touch <file>")?;
        self.context
            .fs
            .create_file(&path)
            .map_err(|e| CommandError::from_io(e, raw))?;
        writeln!(out, "File created: {}", raw)?;
        Ok(Transition::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::test_support::*;
    use std::fs;

    #[test]
    fn test_touch_creates_empty_file() {
        let (temp, session) = sandbox();
        let (result, output) = run(&TouchCommand::new(context()), &session, &["new.txt"]);
        assert!(result.is_ok());
        assert_eq!(output, "File created: new.txt\n");
        assert_eq!(fs::read(temp.path().join("new.txt")).expect("read").len(), 0);
    }

    #[test]
    fn test_touch_existing_file_untouched() {
        let (temp, session) = sandbox();
        fs::write(temp.path().join("old.txt"), "keep me").expect("write");

        let (result, _) = run(&TouchCommand::new(context()), &session, &["old.txt"]);
        assert!(matches!(result, Err(CommandError::AlreadyExists(_))));
        assert_eq!(
            fs::read_to_string(temp.path().join("old.txt")).expect("read"),
            "keep me"
        );
    }

    #[test]
    fn test_touch_errors() {
        let (_temp, session) = sandbox();
        let cmd = TouchCommand::new(context());

        let (usage, _) = run(&cmd, &session, &[]);
        assert!(matches!(usage, Err(CommandError::Usage(_))));

        let (missing_parent, _) = run(&cmd, &session, &["nowhere/file.txt"]);
        assert!(matches!(missing_parent, Err(CommandError::NotFound(_))));
    }
}
