//! Manifest URL rewriting.
//!
//! Stage 2 of the pipeline. Loads a previously serialized manifest and
//! retags every `Local` image entry as `Remote`, constructing its CDN URL:
//!
//! 1. strip the family directory prefix from the local path
//! 2. translate the leading folder through the mapping table (first match)
//! 3. prepend the family's remote base path
//! 4. percent-encode each path segment independently (`/` preserved)
//! 5. concatenate onto `https://<host>/<cloud-name>/image/upload/`
//!
//! `Graphics/Logos/a.png` with mapping `Logos → 01-Branding-Identity/Logos`
//! becomes
//! `https://res.cloudinary.com/<name>/image/upload/Portfolio/Graphic%20Design/01-Branding-Identity/Logos/a.png`.
//!
//! The pass is idempotent: entries already tagged `Remote` are skipped and
//! counted, never re-encoded, so running it twice cannot double-prefix a
//! URL. A missing manifest file skips the family entirely ([`rewrite_file`]
//! returns `None`) — other families still run.
//!
//! [`patch_file`] is the blunt sibling: a raw-text pass over the manifest
//! file that swaps an old cloud identifier (and optionally a folder name)
//! without parsing any JSON, reporting the pre-edit occurrence count.

use crate::config::{CloudConfig, FamilyConfig, FolderMapping, PatchConfig};
use crate::manifest::{AssetPath, Manifest, ManifestError};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Everything except RFC 3986 unreserved characters gets percent-encoded
/// within a path segment. Spaces become `%20`, commas `%2C`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Outcome of one rewrite pass over a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteReport {
    /// Entry records retagged `Local → Remote` (for categorized manifests
    /// this counts the flat list and the per-category copies separately).
    pub rewritten: usize,
    /// Entry records that were already `Remote`.
    pub skipped: usize,
}

impl fmt::Display for RewriteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rewritten, {} already remote",
            self.rewritten, self.skipped
        )
    }
}

/// Build the remote URL for a root-relative local path.
///
/// Deterministic: the same path, mapping table, and config always produce
/// the same URL.
pub fn remote_url(
    cloud: &CloudConfig,
    family: &FamilyConfig,
    mappings: &[FolderMapping],
    local_path: &str,
) -> String {
    // Whole-segment strip: "Graphics/x" loses the prefix, "GraphicsOld/x"
    // keeps it.
    let rest = local_path
        .strip_prefix(&family.dir)
        .and_then(|r| r.strip_prefix('/'))
        .unwrap_or(local_path);
    let mapped = apply_mapping(mappings, rest);
    let full = if family.base_path.is_empty() {
        mapped
    } else {
        format!("{}/{}", family.base_path, mapped)
    };
    format!(
        "https://{}/{}/image/upload/{}",
        cloud.host,
        cloud.name,
        encode_path(&full)
    )
}

/// Translate the leading folder of `path` through the first matching entry.
fn apply_mapping(mappings: &[FolderMapping], path: &str) -> String {
    for mapping in mappings {
        if path == mapping.from {
            return mapping.to.clone();
        }
        if let Some(rest) = path.strip_prefix(&mapping.from)
            && let Some(rest) = rest.strip_prefix('/')
        {
            return format!("{}/{}", mapping.to, rest);
        }
    }
    path.to_string()
}

/// Percent-encode each `/`-separated segment independently.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Retag every `Local` entry in `manifest` as `Remote`. Already-remote
/// entries are counted as skipped and left untouched.
pub fn rewrite_manifest(
    manifest: &mut Manifest,
    cloud: &CloudConfig,
    family: &FamilyConfig,
    mappings: &[FolderMapping],
) -> RewriteReport {
    let mut report = RewriteReport::default();
    for entry in manifest.entries_mut() {
        match &entry.path {
            AssetPath::Remote(_) => report.skipped += 1,
            AssetPath::Local(local) => {
                entry.path = AssetPath::Remote(remote_url(cloud, family, mappings, local));
                report.rewritten += 1;
            }
        }
    }
    report
}

/// Rewrite a manifest file in place. Returns `None` when the file doesn't
/// exist — the family is skipped, not failed.
pub fn rewrite_file(
    manifest_path: &Path,
    cloud: &CloudConfig,
    family: &FamilyConfig,
    mappings: &[FolderMapping],
) -> Result<Option<RewriteReport>, RewriteError> {
    if !manifest_path.exists() {
        return Ok(None);
    }
    let mut manifest = Manifest::load(manifest_path)?;
    let report = rewrite_manifest(&mut manifest, cloud, family, mappings);
    manifest.write(manifest_path)?;
    Ok(Some(report))
}

/// Raw-text patch of a manifest file: swap the old cloud identifier for
/// `new_name`, and optionally an old folder path for a new one. Returns the
/// pre-edit occurrence count of the old identifier, or `None` when the file
/// doesn't exist.
pub fn patch_file(
    manifest_path: &Path,
    patch: &PatchConfig,
    new_name: &str,
) -> Result<Option<usize>, RewriteError> {
    if !manifest_path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(manifest_path)?;
    let replacements = text.matches(patch.old_name.as_str()).count();
    let mut patched = text.replace(patch.old_name.as_str(), new_name);
    if let (Some(old_folder), Some(new_folder)) = (&patch.old_folder, &patch.new_folder) {
        patched = patched.replace(old_folder.as_str(), new_folder.as_str());
    }
    fs::write(manifest_path, patched)?;
    Ok(Some(replacements))
}
