use std::io::Write;

use super::{guard_session_dir, Command, CommandContext, CommandError};
use crate::core::state::{Session, Transition};
use crate::fs::{EntryKind, TreeWalker};

#[derive(Clone)]
pub struct RmCommand {
    context: CommandContext,
}

impl RmCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for RmCommand {
    fn execute(
        &self,
        session: &Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        let (raw, target) = self.context.path_arg(session, args, 0, "rm <path>")?;
        let fs = self.context.fs.as_ref();

        let kind = fs
            .entry_kind(&target, false)
            .map_err(|e| CommandError::from_io(e, raw))?;

        guard_session_dir(session, &target, raw)?;

        if kind != EntryKind::Directory {
            fs.remove_file(&target)
                .map_err(|e| CommandError::from_io(e, raw))?;
            writeln!(out, "File deleted: {}", raw)?;
            return Ok(Transition::Stay);
        }

        let mut failures = 0;
        for item in TreeWalker::new(fs, &target).remove() {
            if let Err(err) = item {
                failures += 1;
                writeln!(out, "rm: cannot remove {}", err)?;
            }
        }

        if failures > 0 {
            return Err(CommandError::PartialRemoval {
                subject: raw.to_string(),
                failures,
            });
        }
        writeln!(out, "Directory and its contents deleted: {}", raw)?;
        Ok(Transition::Stay)
    }
}
