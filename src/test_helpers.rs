//! Shared test utilities for the gallery-assets test suite.
//!
//! Provides the in-memory [`MemLister`] fixture for scanner unit tests, an
//! on-disk fixture tree builder for filesystem-backed tests, and lookup
//! helpers that panic with a clear message on miss.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::lister::{DirectoryLister, EntryInfo, EntryKind};
use crate::manifest::{FolderNode, ImageEntry, Manifest};

/// Fixed modification time stamped on every in-memory fixture file.
pub const MEM_MTIME: u64 = 1_700_000_000;

// =========================================================================
// In-memory lister
// =========================================================================

/// In-memory [`DirectoryLister`] built from a list of file paths.
///
/// Intermediate directories are derived from the file paths; use [`dir`]
/// to add an explicitly empty directory.
///
/// ```rust
/// let lister = MemLister::new()
///     .file("assets/Graphics/Logos/a.png", 10)
///     .file("assets/Graphics/banner.png", 20);
/// ```
///
/// [`dir`]: MemLister::dir
#[derive(Default)]
pub struct MemLister {
    files: BTreeMap<PathBuf, u64>,
    extra_dirs: BTreeSet<PathBuf>,
}

impl MemLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: &str, size: u64) -> Self {
        self.files.insert(PathBuf::from(path), size);
        self
    }

    pub fn dir(mut self, path: &str) -> Self {
        self.extra_dirs.insert(PathBuf::from(path));
        self
    }

    fn dirs(&self) -> BTreeSet<PathBuf> {
        let mut dirs = self.extra_dirs.clone();
        for file in self.files.keys() {
            let mut current = file.parent();
            while let Some(dir) = current {
                if dir.as_os_str().is_empty() {
                    break;
                }
                dirs.insert(dir.to_path_buf());
                current = dir.parent();
            }
        }
        dirs
    }
}

impl DirectoryLister for MemLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<EntryInfo>> {
        if !self.is_dir(dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such fixture directory: {}", dir.display()),
            ));
        }
        let mut entries = Vec::new();
        for (path, size) in &self.files {
            if path.parent() == Some(dir) {
                entries.push(EntryInfo {
                    name: path.file_name().unwrap().to_string_lossy().to_string(),
                    kind: EntryKind::File,
                    size: *size,
                    modified: MEM_MTIME,
                });
            }
        }
        for sub in self.dirs() {
            if sub.parent() == Some(dir) {
                entries.push(EntryInfo {
                    name: sub.file_name().unwrap().to_string_lossy().to_string(),
                    kind: EntryKind::Directory,
                    size: 0,
                    modified: MEM_MTIME,
                });
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn is_dir(&self, dir: &Path) -> bool {
        self.dirs().contains(dir)
    }
}

// =========================================================================
// On-disk fixture
// =========================================================================

/// Build the standard two-family fixture tree under `root`.
///
/// ```text
/// root/
/// ├── Graphics/
/// │   ├── Logos/           a.png, b.svg
/// │   ├── Posters/         Concert Poster.jpg
/// │   └── banner.png
/// └── Photography/
///     ├── Portraits/       1 Model-Ana, Lisbon.jpg · 3 Model-Jane Doe, Paris.jpg
///     ├── Landscapes/      2 Forest.jpg · 7 Tokyo.jpg · 10 Beach.jpg · Apple.jpg
///     └── Product Shoot/   4.jpg · 5 Leather strap.jpg
/// ```
pub fn build_fixture_tree(root: &Path) {
    let files = [
        "Graphics/Logos/a.png",
        "Graphics/Logos/b.svg",
        "Graphics/Posters/Concert Poster.jpg",
        "Graphics/banner.png",
        "Photography/Portraits/1 Model-Ana, Lisbon.jpg",
        "Photography/Portraits/3 Model-Jane Doe, Paris.jpg",
        "Photography/Landscapes/2 Forest.jpg",
        "Photography/Landscapes/7 Tokyo.jpg",
        "Photography/Landscapes/10 Beach.jpg",
        "Photography/Landscapes/Apple.jpg",
        "Photography/Product Shoot/4.jpg",
        "Photography/Product Shoot/5 Leather strap.jpg",
    ];
    for file in files {
        let path = root.join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"fake image bytes").unwrap();
    }
}

// =========================================================================
// Manifest lookups — panic with a clear message on miss
// =========================================================================

/// Find a folder node by name in a slice of nodes. Panics if not found.
pub fn find_folder<'a>(folders: &'a [FolderNode], name: &str) -> &'a FolderNode {
    folders.iter().find(|f| f.name == name).unwrap_or_else(|| {
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
        panic!("folder '{name}' not found. Available: {names:?}")
    })
}

/// Find an image entry by file name in the flat list. Panics if not found.
pub fn find_entry<'a>(manifest: &'a Manifest, name: &str) -> &'a ImageEntry {
    manifest
        .images()
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| {
            let names = entry_names(manifest);
            panic!("image '{name}' not found. Available: {names:?}")
        })
}

/// All flat-list image names in manifest order.
pub fn entry_names(manifest: &Manifest) -> Vec<&str> {
    manifest.images().iter().map(|e| e.name.as_str()).collect()
}
