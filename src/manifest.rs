//! Manifest data model and persistence.
//!
//! The manifest is the JSON document the portfolio front-end consumes to
//! render image galleries. It is produced fresh on every scan (full
//! replacement of the file) and mutated only by the rewrite pass, which
//! loads it, retags every image path, and overwrites the same file.
//!
//! Two shapes exist, selected per asset family:
//!
//! - **Generic** (`graphics`): a folder tree plus one flat image list.
//! - **Categorized** (`photography`): top-level category nodes, each carrying
//!   its own image list, plus the flat list and total counters.
//!
//! ## Hosting state
//!
//! Every image path is an [`AssetPath`] — a tagged variant, `Local` or
//! `Remote`, never a bare string with a boolean flag. The rewrite pass
//! retags entries `Local → Remote`; entries already `Remote` are skipped,
//! so running the rewriter twice cannot double-prefix a URL.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of a persisted manifest. The scanner never lists it as an image.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Legacy category-metadata file some asset trees still carry. Skipped like
/// the manifest itself.
pub const CATEGORY_METADATA_FILE: &str = "categories.json";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where an image currently lives.
///
/// `Local` holds a forward-slash path relative to the assets root
/// (`Graphics/Logos/a.png`); `Remote` holds a fully-qualified CDN URL with
/// percent-encoded segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "hosting", content = "path", rename_all = "lowercase")]
pub enum AssetPath {
    Local(String),
    Remote(String),
}

impl AssetPath {
    pub fn as_str(&self) -> &str {
        match self {
            AssetPath::Local(p) | AssetPath::Remote(p) => p,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, AssetPath::Remote(_))
    }
}

/// Structured fields parsed from a filename by its category's pattern.
///
/// Untagged: the field set identifies the variant, matching what the
/// front-end expects (`model`/`location`, `location`, or `description`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageMetadata {
    Portrait { model: String, location: String },
    Landscape { location: String },
    Product { description: String },
}

/// One discovered image file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    /// File name including extension.
    pub name: String,
    /// Hosting state plus path, flattened to `hosting` + `path` fields.
    #[serde(flatten)]
    pub path: AssetPath,
    /// Byte length at scan time.
    pub size: u64,
    /// Last-modification time at scan time, seconds since the Unix epoch.
    pub modified: u64,
    /// Immediate parent folder name, categorized families only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Absent when the filename does not match its category's pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

/// One directory under a family root.
///
/// `image_count` is the recursive image count of the subtree. Generic
/// manifests populate `subfolders` (tree form); categorized manifests
/// populate `images` on the top-level category nodes instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    pub name: String,
    /// Forward-slash path relative to the assets root.
    pub path: String,
    pub image_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subfolders: Vec<FolderNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageEntry>,
}

/// The persisted document, one of two shapes.
///
/// Untagged: a categorized manifest is recognized by its counter fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Manifest {
    Categorized(CategorizedManifest),
    Generic(GenericManifest),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericManifest {
    pub folders: Vec<FolderNode>,
    pub images: Vec<ImageEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedManifest {
    pub categories: Vec<FolderNode>,
    pub total_categories: usize,
    pub total_images: usize,
    pub images: Vec<ImageEntry>,
}

impl Manifest {
    /// Flat image list (the global one, not per-category copies).
    pub fn images(&self) -> &[ImageEntry] {
        match self {
            Manifest::Generic(m) => &m.images,
            Manifest::Categorized(m) => &m.images,
        }
    }

    /// Every image entry record in the document, mutable — the flat list
    /// plus, for categorized manifests, each category's own list. The
    /// rewrite pass must touch both so the persisted JSON stays consistent.
    pub fn entries_mut(&mut self) -> Box<dyn Iterator<Item = &mut ImageEntry> + '_> {
        match self {
            Manifest::Generic(m) => Box::new(m.images.iter_mut()),
            Manifest::Categorized(m) => Box::new(
                m.images
                    .iter_mut()
                    .chain(m.categories.iter_mut().flat_map(|c| c.images.iter_mut())),
            ),
        }
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Serialize as pretty JSON and fully replace the file at `path`.
    ///
    /// There is no partial-write recovery: an interruption mid-write leaves
    /// a truncated file that the next `load` reports as a parse error.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
