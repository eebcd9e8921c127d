use std::io::{BufRead, Write};

use super::{required, Command, CommandContext, CommandError};
use crate::core::state::{Session, Transition};
use crate::fs::EntryKind;

const USAGE: &str = "grep <text> <file>";

/// Literal substring search; the needle is never treated as a pattern.
#[derive(Clone)]
pub struct GrepCommand {
    context: CommandContext,
}

impl GrepCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for GrepCommand {
    fn execute(
        &self,
        session: &Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        let needle = required(args, 0, USAGE)?;
        let (raw, path) = self.context.path_arg(session, args, 1, USAGE)?;
        if self.context.fs.is_dir(&path) {
            return Err(CommandError::WrongType {
                subject: raw.to_string(),
                expected: EntryKind::File,
            });
        }

        let reader = self
            .context
            .fs
            .open_read(&path)
            .map_err(|e| CommandError::from_io(e, raw))?;
        for line in reader.lines() {
            let line = line.map_err(|e| CommandError::from_io(e, raw))?;
            if line.contains(needle) {
                writeln!(out, "{}", line)?;
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
    fn test_grep_outputs_matching_lines_only() {
        let (temp, session) = sandbox();
        fs::write(temp.path().join("file.txt"), "abc needle\nxyz\n").expect("write");

        let (result, output) = run(&GrepCommand::new(context()), &session, &["needle", "file.txt"]);
        assert!(result.is_ok());
        assert_eq!(output, "abc needle\n");
    }

    #[test]
    fn test_grep_is_literal_and_ordered() {
        let (temp, session) = sandbox();
        fs::write(temp.path().join("f"), "a.c first\nabc\nsecond a.c\n").expect("write");

        let (_, output) = run(&GrepCommand::new(context()), &session, &["a.c", "f"]);
        assert_eq!(output, "a.c first\nsecond a.c\n");
    }

    #[test]
    fn test_grep_errors() {
        let (_temp, session) = sandbox();
        let cmd = GrepCommand::new(context());

        let (usage, _) = run(&cmd, &session, &["needle"]);
        assert!(matches!(usage, Err(CommandError::Usage(USAGE))));

        let (missing, _) = run(&cmd, &session, &["needle", "nope.txt"]);
        assert!(matches!(missing, Err(CommandError::NotFound(_))));
    }
}
