use std::io::Write;

use super::commands::{CommandContext, CommandError};
use super::state::Session;
use crate::fs::EntryKind;

const APPEND: &str = ">>";
const OVERWRITE: &str = ">";

/// Commands allowed on the left of a redirect.
const PRODUCERS: &[&str] = &["echo"];

pub fn contains_redirect(line: &str) -> bool {
    line.contains(OVERWRITE)
}

/// `<command> > <target>` or `<command> >> <target>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub command: String,
    pub target: String,
    pub append: bool,
}

impl Redirection {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let format_error = || CommandError::Format(line.trim().to_string());

        // ">>" first: every line containing it also contains ">".
        let (operator, append) = if line.contains(APPEND) {
            (APPEND, true)
        } else if line.contains(OVERWRITE) {
            (OVERWRITE, false)
        } else {
            return Err(format_error());
        };

        let (command, target) = line.split_once(operator).ok_or_else(format_error)?;
        let (command, target) = (command.trim(), target.trim());
        if command.is_empty()
            || target.is_empty()
            || command.contains(OVERWRITE)
            || target.contains(OVERWRITE)
        {
            return Err(format_error());
        }

        Ok(Self {
            command: command.to_string(),
            target: target.to_string(),
            append,
        })
    }

    /// The text the producing command writes, newline terminated.
    pub fn message(&self) -> Result<String, CommandError> {
        let mut tokens = self.command.split_whitespace();
        match tokens.next() {
            Some(producer) if PRODUCERS.contains(&producer) => {}
            _ => return Err(CommandError::UnknownCommand(self.command.clone())),
        }

        let mut body = tokens.collect::<Vec<_>>().join(" ");
        body.push('\n');
        Ok(body)
    }

    /// Writes the message to the target, resolved against the session.
    ///
    /// The file is opened only once the producer is known, and is closed
    /// before this returns whether or not the write succeeded.
    pub fn write(
        &self,
        context: &CommandContext,
        session: &Session,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let body = self.message()?;
        let path = context.resolver.resolve(session.current_dir(), &self.target)?;
        if context.fs.is_dir(&path) {
            return Err(CommandError::WrongType {
                subject: self.target.clone(),
                expected: EntryKind::File,
            });
        }

        {
            let mut file = context
                .fs
                .open_write(&path, self.append)
                .map_err(|e| CommandError::from_io(e, self.target.as_str()))?;
            file.write_all(body.as_bytes())
                .and_then(|()| file.flush())
                .map_err(|e| CommandError::from_io(e, self.target.as_str()))?;
        }

        tracing::debug!(target_file = %path.display(), append = self.append, "redirected output");
        writeln!(out, "Message written to file: {}", self.target)?;
        Ok(())
    }
}
