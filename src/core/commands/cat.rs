use std::io::{BufRead, Write};

use super::{Command, CommandContext, CommandError};
use crate::core::state::{Session, Transition};
use crate::fs::EntryKind;

#[derive(Clone)]
pub struct CatCommand {
    context: CommandContext,
}

impl CatCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for CatCommand {
    fn execute(
        &self,
        session: &Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        let (raw, path) = self.context.path_arg(session, args, 0, "cat <file>")?;
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
            writeln!(out, "{}", line)?;
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
    fn test_cat_prints_lines() {
        let (temp, session) = sandbox();
        fs::write(temp.path().join("poem.txt"), "first\nsecond\n").expect("write");

        let (result, output) = run(&CatCommand::new(context()), &session, &["poem.txt"]);
        assert!(result.is_ok());
        assert_eq!(output, "first\nsecond\n");
    }

    #[test]
    fn test_cat_errors() {
        let (temp, session) = sandbox();
        fs::create_dir(temp.path().join("dir")).expect("mkdir");
        let cmd = CatCommand::new(context());

        let (missing, _) = run(&cmd, &session, &["nope.txt"]);
        assert!(matches!(missing, Err(CommandError::NotFound(_))));

        let (dir, _) = run(&cmd, &session, &["dir"]);
        assert!(matches!(
            dir,
            Err(CommandError::WrongType {
                expected: EntryKind::File,
                ..
            })
        ));

        let (usage, _) = run(&cmd, &session, &[]);
        assert!(matches!(usage, Err(CommandError::Usage(_))));
    }
}
