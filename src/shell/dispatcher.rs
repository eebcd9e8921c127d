use std::io::Write;

use crate::core::commands::{CommandError, CommandExecutor};
use crate::core::parser::ParsedCommand;
use crate::core::redirect::{contains_redirect, Redirection};
use crate::core::state::{Session, ShellState, Transition};
use crate::highlight::SyntaxHighlighter;

/// Turns input lines into command runs against a single owned session.
///
/// Every command failure stops here as one line on `out`; only `exit`
/// moves the dispatcher to [`ShellState::Terminated`].
pub struct Dispatcher {
    session: Session,
    executor: CommandExecutor,
    state: ShellState,
    exclusive_redirect: bool,
    highlighter: Option<SyntaxHighlighter>,
}

impl Dispatcher {
    pub fn new(session: Session, executor: CommandExecutor) -> Self {
        Self {
            session,
            executor,
            state: ShellState::Running,
            exclusive_redirect: false,
            highlighter: None,
        }
    }

    /// When set, a line holding a redirect is not also dispatched as a verb.
    pub fn with_exclusive_redirect(mut self, exclusive: bool) -> Self {
        self.exclusive_redirect = exclusive;
        self
    }

    pub fn with_highlighter(mut self, highlighter: SyntaxHighlighter) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }

    pub fn dispatch(&mut self, line: &str, out: &mut dyn Write) -> ShellState {
        if self.state == ShellState::Terminated {
            return self.state;
        }

        let Some(parsed) = ParsedCommand::parse(line) else {
            return self.state;
        };
        tracing::debug!(verb = %parsed.verb, args = ?parsed.args, "dispatching");

        if contains_redirect(line) {
            if let Err(err) = self.redirect(line, out) {
                self.report(None, &err, out);
            }
            // Redirect lines still reach a known verb unless told otherwise.
            if self.exclusive_redirect || !self.executor.is_builtin(&parsed.verb) {
                return self.state;
            }
        }

        match self
            .executor
            .execute(&self.session, &parsed.verb, &parsed.args, out)
        {
            Ok(transition) => self.apply(transition),
            Err(err) => self.report(Some(&parsed.verb), &err, out),
        }
        self.state
    }

    fn redirect(&self, line: &str, out: &mut dyn Write) -> Result<(), CommandError> {
        Redirection::parse(line)?.write(self.executor.context(), &self.session, out)
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::ChangeDir(dir) => {
                tracing::debug!(dir = %dir.display(), "changing directory");
                self.session.change_dir(dir);
            }
            Transition::Exit => self.state = ShellState::Terminated,
        }
    }

    fn report(&self, verb: Option<&str>, err: &CommandError, out: &mut dyn Write) {
        let message = match verb {
            Some(verb) if !err.is_standalone() => format!("{}: {}", verb, err),
            _ => err.to_string(),
        };
        let message = match &self.highlighter {
            Some(highlighter) => highlighter.highlight_error(&message),
            None => message,
        };
        if let Err(e) = writeln!(out, "{}", message) {
            tracing::warn!(error = %e, "failed to report command error");
        }
    }
}
