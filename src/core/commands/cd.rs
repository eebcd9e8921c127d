use std::io::Write;

use super::{Command, CommandContext, CommandError};
use crate::core::state::{Session, Transition};
use crate::fs::EntryKind;

#[derive(Clone)]
pub struct CdCommand {
    context: CommandContext,
}

impl CdCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        session: &Session,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        let (raw, target) = self.context.path_arg(session, args, 0, "cd <dir>")?;

        // Checked here so the session never holds a path that is not a directory.
        if self.context.fs.is_dir(&target) {
            Ok(Transition::ChangeDir(target))
        } else if self.context.fs.exists(&target) {
            Err(CommandError::WrongType {
                subject: raw.to_string(),
                expected: EntryKind::Directory,
            })
        } else {
            Err(CommandError::NotFound(raw.to_string()))
        }
    }
}
