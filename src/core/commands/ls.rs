use std::io::Write;

use super::{Command, CommandContext, CommandError};
use crate::core::state::{Session, Transition};
use crate::fs::{EntryKind, ListOptions, TreeWalker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsMode {
    /// Direct children, dot entries hidden.
    Visible,
    /// Direct children including dot entries.
    All,
    /// Every descendant, pre-order, indented by depth.
    Recursive,
}

impl LsMode {
    pub fn verb(self) -> &'static str {
        match self {
            LsMode::Visible => "ls",
            LsMode::All => "ls-a",
            LsMode::Recursive => "ls-r",
        }
    }

    fn options(self) -> ListOptions {
        match self {
            LsMode::Visible => ListOptions {
                recursive: false,
                show_hidden: false,
            },
            LsMode::All => ListOptions {
                recursive: false,
                show_hidden: true,
            },
            LsMode::Recursive => ListOptions {
                recursive: true,
                show_hidden: true,
            },
        }
    }
}

#[derive(Clone)]
pub struct LsCommand {
    context: CommandContext,
    mode: LsMode,
}

impl LsCommand {
    pub fn new(context: CommandContext, mode: LsMode) -> Self {
        Self { context, mode }
    }
}

impl Command for LsCommand {
    /// Lists the session directory. Arguments are ignored, so a line such as
    /// `ls > out.txt` still lists the current directory.
    fn execute(
        &self,
        session: &Session,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        let root = session.current_dir();
        let fs = self.context.fs.as_ref();

        for item in TreeWalker::new(fs, root).list(self.mode.options()) {
            match item {
                Ok(entry) => {
                    let indent = if self.mode == LsMode::Recursive {
                        "  ".repeat(entry.depth)
                    } else {
                        String::new()
                    };
                    // Links to directories get the suffix but are not descended.
                    let is_dir = entry.is_dir()
                        || (entry.kind == EntryKind::Symlink && fs.is_dir(&entry.path));
                    let suffix = if is_dir { "/" } else { "" };
                    writeln!(out, "{}{}{}", indent, entry.name(), suffix)?;
                }
                Err(err) if err.path == root => {
                    return Err(CommandError::from_io(err.source, "."));
                }
                Err(err) => {
                    tracing::debug!(error = %err, "skipping unreadable directory");
                    writeln!(out, "{}: cannot read {}", self.mode.verb(), err)?;
                }
            }
        }
        Ok(Transition::Stay)
    }
}
