//! Directory listing capability.
//!
//! The scanner never touches `std::fs` directly — it goes through the
//! [`DirectoryLister`] trait so tests can substitute an in-memory fixture
//! and scan logic stays a pure function of its inputs.
//!
//! [`FsLister`] is the production implementation. It returns entries sorted
//! by name: `read_dir` order is platform-dependent, and the scanner needs a
//! deterministic baseline before applying any family-specific comparator.

use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// What kind of directory entry this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One directory entry as seen by the scanner.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    /// File or directory name, no path components.
    pub name: String,
    pub kind: EntryKind,
    /// Byte length; zero for directories.
    pub size: u64,
    /// Last-modification time, seconds since the Unix epoch; zero when the
    /// platform can't report it.
    pub modified: u64,
}

impl EntryInfo {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Capability to enumerate a directory tree.
pub trait DirectoryLister {
    /// List the entries of `dir`, sorted by name.
    fn list(&self, dir: &Path) -> io::Result<Vec<EntryInfo>>;

    /// Whether `dir` exists and is a directory.
    fn is_dir(&self, dir: &Path) -> bool;
}

/// Production lister backed by `std::fs`.
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<EntryInfo>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let meta = entry.metadata()?;
            let modified = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);
            entries.push(EntryInfo {
                name: entry.file_name().to_string_lossy().to_string(),
                kind: if meta.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
                size: if meta.is_dir() { 0 } else { meta.len() },
                modified,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn is_dir(&self, dir: &Path) -> bool {
        dir.is_dir()
    }
}
