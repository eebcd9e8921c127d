use std::fmt;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    Empty,
    HomeDirNotFound,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => write!(f, "empty path"),
            PathError::HomeDirNotFound => write!(f, "Home directory not found"),
        }
    }
}

impl std::error::Error for PathError {}

/// Turns user input into an absolute path below the session's directory.
///
/// Resolution is purely lexical: nothing is checked against the disk.
#[derive(Clone, Debug, Default)]
pub struct PathResolver;

impl PathResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, cwd: &Path, input: &str) -> Result<PathBuf, PathError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(PathError::Empty);
        }

        let joined = if input == "~" {
            self.home_dir()?
        } else if let Some(rest) = input.strip_prefix("~/") {
            self.home_dir()?.join(rest)
        } else {
            cwd.join(input)
        };

        Ok(normalize(&joined))
    }

    fn home_dir(&self) -> Result<PathBuf, PathError> {
        dirs::home_dir().ok_or(PathError::HomeDirNotFound)
    }
}

/// Folds `.` and `..` out of `path`. `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if normalized.parent().is_some() {
                    normalized.pop();
                }
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(cwd: &str, input: &str) -> PathBuf {
        PathResolver::new()
            .resolve(Path::new(cwd), input)
            .expect("input is not empty")
    }

    #[test]
    fn test_relative_paths() {
        assert_eq!(resolve("/home/user", "docs"), PathBuf::from("/home/user/docs"));
        assert_eq!(resolve("/home/user", "./docs/"), PathBuf::from("/home/user/docs"));
        assert_eq!(resolve("/home/user", "../other"), PathBuf::from("/home/other"));
        assert_eq!(resolve("/home/user", "a/./b/../c"), PathBuf::from("/home/user/a/c"));
    }

    #[test]
    fn test_absolute_paths() {
        assert_eq!(resolve("/home/user", "/etc/hosts"), PathBuf::from("/etc/hosts"));
        assert_eq!(resolve("/home/user", "/etc/../var"), PathBuf::from("/var"));
    }

    #[test]
    fn test_parent_stops_at_root() {
        assert_eq!(resolve("/", ".."), PathBuf::from("/"));
        assert_eq!(resolve("/home", "../../../tmp"), PathBuf::from("/tmp"));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        for input in ["/", "/tmp", "/usr/local/bin", "/a/b/c"] {
            assert_eq!(resolve("/somewhere/else", input), PathBuf::from(input));
            let once = resolve("/x", input);
            let twice = resolve("/y", &once.to_string_lossy());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_empty_input_rejected() {
        let resolver = PathResolver::new();
        assert_eq!(resolver.resolve(Path::new("/tmp"), ""), Err(PathError::Empty));
        assert_eq!(resolver.resolve(Path::new("/tmp"), "   "), Err(PathError::Empty));
    }

    #[test]
    fn test_tilde_expansion() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolve("/tmp", "~"), normalize(&home));
            assert_eq!(resolve("/tmp", "~/notes"), normalize(&home.join("notes")));
        }
        // only a leading "~/" is special
        assert_eq!(resolve("/tmp", "a~b"), PathBuf::from("/tmp/a~b"));
    }

    #[test]
    fn test_does_not_touch_disk() {
        assert_eq!(
            resolve("/no/such/dir", "missing/../file"),
            PathBuf::from("/no/such/dir/file")
        );
    }
}
