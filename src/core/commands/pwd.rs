use std::io::Write;

use super::{Command, CommandError};
use crate::core::state::{Session, Transition};

#[derive(Clone, Default)]
pub struct PwdCommand;

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(
        &self,
        session: &Session,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        writeln!(out, "{}", session.current_dir().display())?;
        Ok(Transition::Stay)
    }
}
