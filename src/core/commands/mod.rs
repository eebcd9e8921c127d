use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

mod cat;
mod cd;
mod exit;
mod grep;
mod help;
mod ls;
mod mkdir;
mod mv;
mod pwd;
mod rm;
mod rmdir;
mod touch;

pub use cat::CatCommand;
pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use grep::GrepCommand;
pub use help::HelpCommand;
pub use ls::{LsCommand, LsMode};
pub use mkdir::MkdirCommand;
pub use mv::MvCommand;
pub use pwd::PwdCommand;
pub use rm::RmCommand;
pub use rmdir::RmdirCommand;
pub use touch::TouchCommand;

use crate::core::state::{Session, Transition};
use crate::fs::{EntryKind, FileSystem};
use crate::path::{PathError, PathResolver};

#[derive(Debug)]
pub enum CommandError {
    Usage(&'static str),
    NotFound(String),
    WrongType { subject: String, expected: EntryKind },
    AlreadyExists(String),
    NotEmpty(String),
    Io { subject: String, source: io::Error },
    Output(io::Error),
    Format(String),
    UnknownCommand(String),
    PartialRemoval { subject: String, failures: usize },
}

impl CommandError {
    /// Sorts a host error on `subject` into the matching variant.
    pub fn from_io(err: io::Error, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        match err.kind() {
            io::ErrorKind::NotFound => CommandError::NotFound(subject),
            io::ErrorKind::AlreadyExists => CommandError::AlreadyExists(subject),
            io::ErrorKind::DirectoryNotEmpty => CommandError::NotEmpty(subject),
            io::ErrorKind::NotADirectory => CommandError::WrongType {
                subject,
                expected: EntryKind::Directory,
            },
            io::ErrorKind::IsADirectory => CommandError::WrongType {
                subject,
                expected: EntryKind::File,
            },
            _ => CommandError::Io {
                subject,
                source: err,
            },
        }
    }

    /// Errors that already name their command and are printed without a
    /// verb prefix.
    pub fn is_standalone(&self) -> bool {
        matches!(self, CommandError::Format(_) | CommandError::UnknownCommand(_))
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Usage(usage) => write!(f, "usage: {}", usage),
            CommandError::NotFound(subject) => {
                write!(f, "'{}': No such file or directory", subject)
            }
            CommandError::WrongType {
                subject,
                expected: EntryKind::Directory,
            } => write!(f, "'{}': Not a directory", subject),
            CommandError::WrongType {
                subject,
                expected: EntryKind::File,
            } => write!(f, "'{}': Is a directory", subject),
            CommandError::WrongType { subject, expected } => {
                write!(f, "'{}': Not a {}", subject, expected)
            }
            CommandError::AlreadyExists(subject) => write!(f, "'{}': Already exists", subject),
            CommandError::NotEmpty(subject) => write!(f, "'{}': Directory not empty", subject),
            CommandError::Io { subject, source } => write!(f, "'{}': {}", subject, source),
            CommandError::Output(err) => write!(f, "failed to write output: {}", err),
            CommandError::Format(line) => write!(f, "Invalid command format: {}", line),
            CommandError::UnknownCommand(cmd) => write!(
                f,
                "Unknown command: '{}'. Type 'help' to list available commands.",
                cmd
            ),
            CommandError::PartialRemoval { subject, failures } => write!(
                f,
                "'{}': {} entr{} could not be removed",
                subject,
                failures,
                if *failures == 1 { "y" } else { "ies" }
            ),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Io { source, .. } => Some(source),
            CommandError::Output(err) => Some(err),
            _ => None,
        }
    }
}

// Only the output stream is written through `?` on a bare io::Error;
// filesystem failures go through `from_io` with their subject.
impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        CommandError::Output(err)
    }
}

impl From<PathError> for CommandError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::Empty => CommandError::Usage("path must not be empty"),
            PathError::HomeDirNotFound => CommandError::NotFound("~".to_string()),
        }
    }
}

pub trait Command {
    fn execute(
        &self,
        session: &Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError>;
}

/// Shared by every path-taking command.
#[derive(Clone)]
pub struct CommandContext {
    pub fs: Rc<dyn FileSystem>,
    pub resolver: PathResolver,
}

impl CommandContext {
    pub fn new(fs: Rc<dyn FileSystem>) -> Self {
        Self {
            fs,
            resolver: PathResolver::new(),
        }
    }

    /// Resolves `args[index]`, reporting `usage` if it is missing.
    pub fn path_arg<'a>(
        &self,
        session: &Session,
        args: &'a [String],
        index: usize,
        usage: &'static str,
    ) -> Result<(&'a str, PathBuf), CommandError> {
        let raw = required(args, index, usage)?;
        let path = self.resolver.resolve(session.current_dir(), raw)?;
        Ok((raw, path))
    }
}

pub(crate) fn required<'a>(
    args: &'a [String],
    index: usize,
    usage: &'static str,
) -> Result<&'a str, CommandError> {
    args.get(index)
        .map(String::as_str)
        .filter(|arg| !arg.is_empty())
        .ok_or(CommandError::Usage(usage))
}

/// Rejects removing or moving the session directory or one of its parents,
/// which would leave the session pointing at nothing.
pub(crate) fn guard_session_dir(
    session: &Session,
    target: &Path,
    raw: &str,
) -> Result<(), CommandError> {
    if session.current_dir().starts_with(target) {
        return Err(CommandError::Io {
            subject: raw.to_string(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "refusing to touch the current directory or its parents",
            ),
        });
    }
    Ok(())
}

#[derive(Clone)]
enum CommandType {
    Help(HelpCommand),
    Pwd(PwdCommand),
    Cd(CdCommand),
    Ls(LsCommand),
    Mkdir(MkdirCommand),
    Rmdir(RmdirCommand),
    Touch(TouchCommand),
    Mv(MvCommand),
    Rm(RmCommand),
    Cat(CatCommand),
    Grep(GrepCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(
        &self,
        session: &Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        match self {
            CommandType::Help(cmd) => cmd.execute(session, args, out),
            CommandType::Pwd(cmd) => cmd.execute(session, args, out),
            CommandType::Cd(cmd) => cmd.execute(session, args, out),
            CommandType::Ls(cmd) => cmd.execute(session, args, out),
            CommandType::Mkdir(cmd) => cmd.execute(session, args, out),
            CommandType::Rmdir(cmd) => cmd.execute(session, args, out),
            CommandType::Touch(cmd) => cmd.execute(session, args, out),
            CommandType::Mv(cmd) => cmd.execute(session, args, out),
            CommandType::Rm(cmd) => cmd.execute(session, args, out),
            CommandType::Cat(cmd) => cmd.execute(session, args, out),
            CommandType::Grep(cmd) => cmd.execute(session, args, out),
            CommandType::Exit(cmd) => cmd.execute(session, args, out),
        }
    }
}

/// Verb table for the shell's fixed vocabulary.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    context: CommandContext,
}

impl CommandExecutor {
    pub fn new(fs: Rc<dyn FileSystem>) -> Self {
        let context = CommandContext::new(fs);
        let mut commands = BTreeMap::new();

        commands.insert("help", CommandType::Help(HelpCommand::new()));
        commands.insert("pwd", CommandType::Pwd(PwdCommand::new()));
        commands.insert("cd", CommandType::Cd(CdCommand::new(context.clone())));
        commands.insert(
            "ls",
            CommandType::Ls(LsCommand::new(context.clone(), LsMode::Visible)),
        );
        commands.insert(
            "ls-a",
            CommandType::Ls(LsCommand::new(context.clone(), LsMode::All)),
        );
        commands.insert(
            "ls-r",
            CommandType::Ls(LsCommand::new(context.clone(), LsMode::Recursive)),
        );
        commands.insert("mkdir", CommandType::Mkdir(MkdirCommand::new(context.clone())));
        commands.insert("rmdir", CommandType::Rmdir(RmdirCommand::new(context.clone())));
        commands.insert("touch", CommandType::Touch(TouchCommand::new(context.clone())));
        commands.insert("mv", CommandType::Mv(MvCommand::new(context.clone())));
        commands.insert("rm", CommandType::Rm(RmCommand::new(context.clone())));
        commands.insert("cat", CommandType::Cat(CatCommand::new(context.clone())));
        commands.insert("grep", CommandType::Grep(GrepCommand::new(context.clone())));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));

        Self { commands, context }
    }

    pub fn execute(
        &self,
        session: &Session,
        verb: &str,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Transition, CommandError> {
        match self.commands.get(verb) {
            Some(cmd) => cmd.execute(session, args, out),
            None => Err(CommandError::UnknownCommand(verb.to_string())),
        }
    }

    pub fn is_builtin(&self, verb: &str) -> bool {
        self.commands.contains_key(verb)
    }

    pub fn verbs(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }
}
