use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub mod walker;

pub use walker::{ListOptions, ListWalk, RemoveWalk, TreeEntry, TreeWalker, WalkError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

impl From<fs::FileType> for EntryKind {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
            EntryKind::Symlink => write!(f, "symlink"),
        }
    }
}

/// One child of a directory as reported by [`FileSystem::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// The primitives every command is built from.
///
/// Paths handed to the port are already resolved against the session, so
/// implementations never consult the process working directory.
pub trait FileSystem {
    /// Kind of the entry at `path`. Symlinks are reported as such unless
    /// `follow_links` is set.
    fn entry_kind(&self, path: &Path, follow_links: bool) -> io::Result<EntryKind>;

    /// Children of `path`, sorted by name. The directory handle is closed
    /// before this returns.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Creates an empty file, failing if anything already exists at `path`.
    fn create_file(&self, path: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes an empty directory.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn BufRead>>;

    /// Opens `path` for writing, creating it if missing. Existing content is
    /// kept when `append` is set and truncated otherwise.
    fn open_write(&self, path: &Path, append: bool) -> io::Result<Box<dyn Write>>;

    fn exists(&self, path: &Path) -> bool {
        self.entry_kind(path, false).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entry_kind(path, true), Ok(EntryKind::Directory))
    }
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl HostFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for HostFs {
    fn entry_kind(&self, path: &Path, follow_links: bool) -> io::Result<EntryKind> {
        let metadata = if follow_links {
            fs::metadata(path)?
        } else {
            fs::symlink_metadata(path)?
        };
        Ok(metadata.file_type().into())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                kind: entry.file_type()?.into(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        OpenOptions::new().write(true).create_new(true).open(path)?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn BufRead>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }

    fn open_write(&self, path: &Path, append: bool) -> io::Result<Box<dyn Write>> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(append)
            .truncate(!append)
            .open(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
