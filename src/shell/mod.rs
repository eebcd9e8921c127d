use std::io::{self, Write};
use std::rc::Rc;

use rustyline::{history::FileHistory, Editor};

mod dispatcher;

pub use dispatcher::Dispatcher;

use crate::{
    core::{
        commands::CommandExecutor,
        state::{Session, ShellState},
    },
    error::ShellError,
    flags::Flags,
    fs::HostFs,
    highlight::SyntaxHighlighter,
    input::ShellCompleter,
};

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, FileHistory>,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let session = Session::new()?;
        let executor = CommandExecutor::new(Rc::new(HostFs::new()));
        let highlighter = SyntaxHighlighter::new();

        // History lives only as long as the process.
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(ShellCompleter::new(
            executor.verbs(),
            executor.context().fs.clone(),
            highlighter,
        )));

        let dispatcher = Dispatcher::new(session, executor)
            .with_exclusive_redirect(flags.is_set("exclusive-redirect"))
            .with_highlighter(highlighter);

        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to exit the shell");
        })?;

        Ok(Shell {
            editor,
            dispatcher,
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.flags.is_set("quiet") {
            println!("Welcome to fsh. Type 'help' for available commands.");
        }

        loop {
            let current_dir = self.dispatcher.session().current_dir().to_path_buf();
            if let Some(helper) = self.editor.helper_mut() {
                helper.set_current_dir(&current_dir);
            }

            let prompt = format!("{} > ", current_dir.display());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                            tracing::warn!(error = %e, "couldn't add to history");
                        }
                    }

                    let mut stdout = io::stdout().lock();
                    let state = self.dispatcher.dispatch(&line, &mut stdout);
                    stdout.flush()?;
                    if state == ShellState::Terminated {
                        break;
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    if !self.flags.is_set("quiet") {
                        println!("CTRL-C");
                    }
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    if !self.flags.is_set("quiet") {
                        println!("CTRL-D");
                    }
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
