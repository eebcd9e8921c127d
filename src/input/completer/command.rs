use std::collections::BTreeSet;

use rustyline::completion::Pair;

/// Completes the first word of a line from the shell's verb table.
#[derive(Clone, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<&'static str>,
}

impl CommandCompleter {
    pub fn new(verbs: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            commands: verbs.into_iter().collect(),
        }
    }

    pub fn is_known(&self, verb: &str) -> bool {
        self.commands.contains(verb)
    }

    pub fn complete_command(&self, line: &str) -> Vec<Pair> {
        let input = line.trim();
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: format!("{} ", cmd),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_command_prefix() {
        let completer = CommandCompleter::new(["ls", "ls-a", "ls-r", "mkdir", "mv"]);
        let displays: Vec<String> = completer
            .complete_command("ls")
            .into_iter()
            .map(|p| p.display)
            .collect();
        assert_eq!(displays, ["ls", "ls-a", "ls-r"]);
        assert!(completer.complete_command("zz").is_empty());
        assert!(completer.is_known("mv"));
        assert!(!completer.is_known("m"));
    }
}
