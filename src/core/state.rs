use std::env;
use std::io;
use std::path::{Path, PathBuf};

use crate::path::normalize;

/// The only state that survives from one command line to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    current_dir: PathBuf,
}

impl Session {
    /// Starts in the process working directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self::at(env::current_dir()?))
    }

    /// Starts in `dir`, which the caller has checked is an absolute,
    /// existing directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: normalize(&dir.into()),
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub(crate) fn change_dir(&mut self, dir: PathBuf) {
        debug_assert!(dir.is_absolute());
        self.current_dir = dir;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Running,
    Terminated,
}

/// What a command asks the dispatcher to do with the session afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Stay,
    ChangeDir(PathBuf),
    Exit,
}
