use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    rc::Rc,
};

use super::{command::CommandCompleter, path::PathCompleter};
use crate::fs::FileSystem;
use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
    current_dir: PathBuf,
}

impl ShellCompleter {
    pub fn new(
        verbs: impl IntoIterator<Item = &'static str>,
        fs: Rc<dyn FileSystem>,
        highlighter: SyntaxHighlighter,
    ) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(verbs),
            path_completer: PathCompleter::new(fs),
            highlighter,
            current_dir: PathBuf::from("/"),
        }
    }

    /// Keeps path completion in step with the session after a `cd`.
    pub fn set_current_dir(&mut self, dir: &Path) {
        self.current_dir = dir.to_path_buf();
    }

    fn complete_line(&self, line_up_to_cursor: &str, pos: usize) -> (usize, Vec<Pair>) {
        let mut words: Vec<&str> = line_up_to_cursor.split_whitespace().collect();
        if line_up_to_cursor.is_empty() || line_up_to_cursor.ends_with(char::is_whitespace) {
            words.push("");
        }

        let last_word = words.last().copied().unwrap_or("");
        let start = pos - last_word.len();
        if words.len() <= 1 {
            (start, self.command_completer.complete_command(last_word))
        } else {
            (
                start,
                self.path_completer.complete_path(&self.current_dir, last_word),
            )
        }
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(
            self.highlighter
                .highlight_command(line, |verb| self.command_completer.is_known(verb)),
        )
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.complete_line(&line[..pos], pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::HostFs;
    use std::fs;

    fn completer() -> ShellCompleter {
        ShellCompleter::new(
            ["cat", "cd", "ls"],
            Rc::new(HostFs::new()),
            SyntaxHighlighter::plain(),
        )
    }

    #[test]
    fn test_first_word_completes_verbs() {
        let (start, matches) = completer().complete_line("c", 1);
        assert_eq!(start, 0);
        let displays: Vec<String> = matches.into_iter().map(|p| p.display).collect();
        assert_eq!(displays, ["cat", "cd"]);
    }

    #[test]
    fn test_later_words_complete_paths() -> std::io::Result<()> {
        let temp = tempfile::tempdir()?;
        fs::write(temp.path().join("notes.txt"), "")?;

        let mut completer = completer();
        completer.set_current_dir(temp.path());
        let line = "cat no";
        let (start, matches) = completer.complete_line(line, line.len());
        assert_eq!(start, 4);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].replacement, "notes.txt ");
        Ok(())
    }
}
