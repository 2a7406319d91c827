//! On-disk folder reorganization.
//!
//! Applies the folder-mapping table to the filesystem itself: each mapping
//! moves `<assets>/<family-dir>/<from>` to `<assets>/<family-dir>/<to>`,
//! creating intermediate directories as needed. This is how a flat legacy
//! layout (`Graphics/Logos`, `Graphics/Posters`, ...) becomes the
//! hierarchical taxonomy the remote host uses
//! (`Graphics/01-Branding-Identity/Logos`, ...).
//!
//! Each move is attempted exactly once. A missing source folder is a skip,
//! not an error — reorganization is routinely re-run after partial manual
//! moves. Run `scan` afterwards to regenerate the manifest; the old one
//! still points at the previous layout.

use crate::config::{FamilyConfig, FolderMapping};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ReorganizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("destination already exists: {0}")]
    DestinationExists(String),
}

/// What happened to one mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Folder moved, with the number of files it contained.
    Moved { files: usize },
    /// Source folder absent; nothing to do.
    SkippedMissing,
}

/// One mapping's result, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: String,
    pub to: String,
    pub outcome: MoveOutcome,
}

/// Apply every mapping to one family's directory.
pub fn reorganize(
    assets_root: &Path,
    family: &FamilyConfig,
    mappings: &[FolderMapping],
) -> Result<Vec<MoveRecord>, ReorganizeError> {
    let family_root = assets_root.join(&family.dir);
    let mut records = Vec::new();

    for mapping in mappings {
        let source = family_root.join(&mapping.from);
        let dest = family_root.join(&mapping.to);

        if !source.is_dir() {
            records.push(MoveRecord {
                from: mapping.from.clone(),
                to: mapping.to.clone(),
                outcome: MoveOutcome::SkippedMissing,
            });
            continue;
        }
        if dest.exists() {
            return Err(ReorganizeError::DestinationExists(mapping.to.clone()));
        }

        let files = WalkDir::new(&source)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .count();

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(&source, &dest)?;

        records.push(MoveRecord {
            from: mapping.from.clone(),
            to: mapping.to.clone(),
            outcome: MoveOutcome::Moved { files },
        });
    }

    Ok(records)
}
