use std::io::Write;

use super::{Command, CommandError};
use crate::core::state::{Session, Transition};

#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(
        &self,
        _session: &Session,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        writeln!(out, "Exiting...")?;
        Ok(Transition::Exit)
    }
}
