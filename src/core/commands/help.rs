use std::io::Write;

use super::{Command, CommandError};
use crate::core::state::{Session, Transition};

const USAGE: &[(&str, &str)] = &[
    ("pwd", "Display current directory"),
    ("cd <dir>", "Change to the specified directory"),
    ("ls", "List files in the current directory"),
    ("ls-a", "List all files, including hidden files"),
    ("ls-r", "Recursively list all files and directories"),
    ("mkdir <dir>...", "Create one or more directories"),
    ("rmdir <dir>", "Remove an empty directory"),
    ("touch <file>", "Create a new empty file"),
    ("mv <src> <dest>", "Move or rename a file or directory"),
    ("rm <path>", "Remove a file, or a directory and everything in it"),
    ("cat <file>", "Display the content of a file"),
    ("grep <text> <file>", "Print the lines of a file containing <text>"),
    ("echo <text> > <file>", "Write <text> to a file (overwrites)"),
    ("echo <text> >> <file>", "Append <text> to a file"),
    ("exit", "Terminate the shell"),
    ("help", "Display this help message"),
];

#[derive(Clone, Default)]
pub struct HelpCommand;

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HelpCommand {
    fn execute(
        &self,
        _session: &Session,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        writeln!(out, "Available commands:")?;
        for (usage, description) in USAGE {
            writeln!(out, "  {:<22} {}", usage, description)?;
        }
        Ok(Transition::Stay)
    }
}
