use std::path::{Path, PathBuf};
use std::rc::Rc;

use rustyline::completion::Pair;

use crate::fs::FileSystem;

/// Completes path arguments relative to the session directory, not the
/// process working directory.
#[derive(Clone)]
pub struct PathCompleter {
    fs: Rc<dyn FileSystem>,
}

impl PathCompleter {
    pub fn new(fs: Rc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    pub fn complete_path(&self, base: &Path, incomplete: &str) -> Vec<Pair> {
        let (dir_part, file_prefix) = Self::split_input(incomplete);
        let dir_to_search = base.join(dir_part);

        // read_dir already returns entries sorted by name
        let Ok(entries) = self.fs.read_dir(&dir_to_search) else {
            return Vec::new();
        };
        entries
            .into_iter()
            .filter(|entry| entry.name.starts_with(file_prefix))
            // Dot entries only when asked for explicitly.
            .filter(|entry| !entry.is_hidden() || file_prefix.starts_with('.'))
            .map(|entry| {
                let is_dir = entry.kind.is_dir() || self.fs.is_dir(&entry.path);
                Self::create_completion_pair(dir_part, &entry.name, is_dir)
            })
            .collect()
    }

    /// Splits `dir/pre` into the directory to list and the name prefix.
    fn split_input(incomplete: &str) -> (&str, &str) {
        match incomplete.rfind('/') {
            Some(slash) => (&incomplete[..=slash], &incomplete[slash + 1..]),
            None => ("", incomplete),
        }
    }

    fn create_completion_pair(dir_part: &str, name: &str, is_dir: bool) -> Pair {
        let mut relative_path = PathBuf::from(dir_part);
        relative_path.push(name);
        let relative_path = relative_path.to_string_lossy().into_owned();

        if is_dir {
            Pair {
                display: format!("{}/", relative_path),
                replacement: format!("{}/", relative_path),
            }
        } else {
            Pair {
                display: relative_path.clone(),
                replacement: format!("{} ", relative_path),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::HostFs;
    use std::fs;

    #[test]
    fn test_complete_relative_to_base() -> std::io::Result<()> {
        let temp = tempfile::tempdir()?;
        fs::create_dir(temp.path().join("docs"))?;
        fs::write(temp.path().join("dog.txt"), "")?;
        fs::write(temp.path().join(".dotfile"), "")?;
        fs::write(temp.path().join("docs/deep.md"), "")?;

        let completer = PathCompleter::new(Rc::new(HostFs::new()));
        let replacements: Vec<String> = completer
            .complete_path(temp.path(), "do")
            .into_iter()
            .map(|p| p.replacement)
            .collect();
        assert_eq!(replacements, ["docs/", "dog.txt "]);

        let nested: Vec<String> = completer
            .complete_path(temp.path(), "docs/d")
            .into_iter()
            .map(|p| p.replacement)
            .collect();
        assert_eq!(nested, ["docs/deep.md "]);

        assert_eq!(completer.complete_path(temp.path(), ".").len(), 1);
        assert!(completer.complete_path(temp.path(), "missing/x").is_empty());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_link_completes_as_directory() -> std::io::Result<()> {
        let temp = tempfile::tempdir()?;
        fs::create_dir(temp.path().join("target"))?;
        std::os::unix::fs::symlink(temp.path().join("target"), temp.path().join("tlink"))?;

        let completer = PathCompleter::new(Rc::new(HostFs::new()));
        let replacements: Vec<String> = completer
            .complete_path(temp.path(), "t")
            .into_iter()
            .map(|p| p.replacement)
            .collect();
        assert_eq!(replacements, ["target/", "tlink/"]);
        Ok(())
    }
}
