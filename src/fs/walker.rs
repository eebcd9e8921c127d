use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use super::{EntryKind, FileSystem};

/// A node produced by a walk. `depth` only drives indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub depth: usize,
}

impl TreeEntry {
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    pub fn name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| self.path.to_string_lossy())
    }
}

#[derive(Debug)]
pub struct WalkError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for WalkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub recursive: bool,
    pub show_hidden: bool,
}

pub struct TreeWalker<'a> {
    fs: &'a dyn FileSystem,
    root: PathBuf,
}

impl<'a> TreeWalker<'a> {
    pub fn new(fs: &'a dyn FileSystem, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Pre-order walk below the root. The root itself is not yielded and its
    /// direct children sit at depth 0.
    pub fn list(&self, options: ListOptions) -> ListWalk<'a> {
        ListWalk {
            fs: self.fs,
            options,
            pending: Vec::new(),
            expand_next: Some((self.root.clone(), 0)),
        }
    }

    /// Post-order walk that deletes every entry it yields, root last.
    pub fn remove(&self) -> RemoveWalk<'a> {
        RemoveWalk {
            fs: self.fs,
            stack: Vec::new(),
            root: Some(self.root.clone()),
        }
    }
}

pub struct ListWalk<'a> {
    fs: &'a dyn FileSystem,
    options: ListOptions,
    // Stack of entries still to yield, next one on top.
    pending: Vec<TreeEntry>,
    // Directory whose children get read on the following call.
    expand_next: Option<(PathBuf, usize)>,
}

impl ListWalk<'_> {
    fn expand(&mut self, dir: &Path, depth: usize) -> io::Result<()> {
        let children = self.fs.read_dir(dir)?;
        let show_hidden = self.options.show_hidden;
        self.pending.extend(
            children
                .into_iter()
                .rev()
                .filter(|child| show_hidden || !child.is_hidden())
                .map(|child| TreeEntry {
                    path: child.path,
                    kind: child.kind,
                    depth,
                }),
        );
        Ok(())
    }
}

impl Iterator for ListWalk<'_> {
    type Item = Result<TreeEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((dir, depth)) = self.expand_next.take() {
            if let Err(source) = self.expand(&dir, depth) {
                return Some(Err(WalkError { path: dir, source }));
            }
        }

        let entry = self.pending.pop()?;
        if self.options.recursive && entry.is_dir() {
            self.expand_next = Some((entry.path.clone(), entry.depth + 1));
        }
        Some(Ok(entry))
    }
}

enum Frame {
    Visit {
        path: PathBuf,
        kind: EntryKind,
        depth: usize,
    },
    Leave {
        path: PathBuf,
        depth: usize,
        failed: bool,
    },
}

/// Deleting walk. Each yielded `Ok` entry is already gone from disk.
///
/// A failure is yielded once and poisons every directory still waiting to be
/// removed above it; those are skipped without further errors. Entries in
/// sibling subtrees are still removed.
pub struct RemoveWalk<'a> {
    fs: &'a dyn FileSystem,
    stack: Vec<Frame>,
    root: Option<PathBuf>,
}

impl RemoveWalk<'_> {
    // Every `Leave` frame still on the stack is an ancestor of the entry
    // being processed.
    fn poison_ancestors(&mut self) {
        for frame in self.stack.iter_mut() {
            if let Frame::Leave { failed, .. } = frame {
                *failed = true;
            }
        }
    }

    fn fail(&mut self, path: PathBuf, source: io::Error) -> Result<TreeEntry, WalkError> {
        self.poison_ancestors();
        tracing::debug!(path = %path.display(), error = %source, "removal failed");
        Err(WalkError { path, source })
    }
}

impl Iterator for RemoveWalk<'_> {
    type Item = Result<TreeEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            match self.fs.entry_kind(&root, false) {
                Ok(kind) => self.stack.push(Frame::Visit {
                    path: root,
                    kind,
                    depth: 0,
                }),
                Err(source) => return Some(Err(WalkError { path: root, source })),
            }
        }

        loop {
            match self.stack.pop()? {
                Frame::Visit {
                    path,
                    kind: EntryKind::Directory,
                    depth,
                } => match self.fs.read_dir(&path) {
                    Ok(children) => {
                        self.stack.push(Frame::Leave {
                            path,
                            depth,
                            failed: false,
                        });
                        self.stack
                            .extend(children.into_iter().rev().map(|child| Frame::Visit {
                                path: child.path,
                                kind: child.kind,
                                depth: depth + 1,
                            }));
                    }
                    Err(source) => return Some(self.fail(path, source)),
                },
                Frame::Visit { path, kind, depth } => {
                    return Some(match self.fs.remove_file(&path) {
                        Ok(()) => Ok(TreeEntry { path, kind, depth }),
                        Err(source) => self.fail(path, source),
                    });
                }
                Frame::Leave { failed: true, .. } => continue,
                Frame::Leave { path, depth, .. } => {
                    return Some(match self.fs.remove_dir(&path) {
                        Ok(()) => Ok(TreeEntry {
                            path,
                            kind: EntryKind::Directory,
                            depth,
                        }),
                        Err(source) => self.fail(path, source),
                    });
                }
            }
        }
    }
}
