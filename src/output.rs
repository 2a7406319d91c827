//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (folder, category, image) is its semantic identity —
//! name, positional index, counts — with metadata shown as indented context
//! lines. This makes the output readable as a content inventory.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! photography (8 images, 3 categories)
//! 001 Landscapes (4 images)
//!     001 2 Forest.jpg
//!         Location: Forest
//!     002 10 Beach.jpg
//!         Location: Beach
//! ```
//!
//! ## Rewrite / Patch
//!
//! ```text
//! graphics: 4 rewritten, 0 already remote
//! photography: manifest not found, skipped
//! ```
//!
//! ## Verify
//!
//! ```text
//! 200 https://res.cloudinary.com/demo/image/upload/a.png
//! ERR https://res.cloudinary.com/demo/image/upload/b.png (connection refused)
//! Verified: 1 reachable, 1 failed
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>` or `String`)
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::manifest::{FolderNode, ImageEntry, ImageMetadata, Manifest};
use crate::reorganize::{MoveOutcome, MoveRecord};
use crate::rewrite::RewriteReport;
use crate::verify::{ProbeResult, VerifySummary};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Indented context line for an entry's extracted metadata.
fn metadata_line(metadata: &ImageMetadata) -> String {
    match metadata {
        ImageMetadata::Portrait { model, location } => format!("Model: {model} ({location})"),
        ImageMetadata::Landscape { location } => format!("Location: {location}"),
        ImageMetadata::Product { description } => format!("Description: {description}"),
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan output showing the discovered structure.
pub fn format_scan_output(family_name: &str, manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();
    match manifest {
        Manifest::Generic(generic) => {
            lines.push(format!(
                "{family_name} ({} images)",
                generic.images.len()
            ));
            push_folder_tree(&generic.folders, 1, &mut lines);
        }
        Manifest::Categorized(categorized) => {
            lines.push(format!(
                "{family_name} ({} images, {} categories)",
                categorized.total_images, categorized.total_categories
            ));
            for (i, category) in categorized.categories.iter().enumerate() {
                lines.push(format!(
                    "{} {} ({} images)",
                    format_index(i + 1),
                    category.name,
                    category.image_count
                ));
                push_image_lines(&category.images, 1, &mut lines);
            }
        }
    }
    lines
}

fn push_folder_tree(folders: &[FolderNode], depth: usize, lines: &mut Vec<String>) {
    for folder in folders {
        lines.push(format!(
            "{}{} ({} images)",
            indent(depth),
            folder.name,
            folder.image_count
        ));
        push_folder_tree(&folder.subfolders, depth + 1, lines);
    }
}

fn push_image_lines(images: &[ImageEntry], depth: usize, lines: &mut Vec<String>) {
    for (i, image) in images.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            indent(depth),
            format_index(i + 1),
            image.name
        ));
        if let Some(metadata) = &image.metadata {
            lines.push(format!("{}{}", indent(depth + 1), metadata_line(metadata)));
        }
    }
}

/// Print scan output to stdout.
pub fn print_scan_output(family_name: &str, manifest: &Manifest) {
    for line in format_scan_output(family_name, manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Rewrite / patch output
// ============================================================================

/// One summary line per family for the rewrite pass. `None` means the
/// manifest file was absent and the family skipped.
pub fn format_rewrite_line(family_name: &str, report: Option<&RewriteReport>) -> String {
    match report {
        Some(report) => format!("{family_name}: {report}"),
        None => format!("{family_name}: manifest not found, skipped"),
    }
}

/// One summary line per family for the raw-text patch pass.
pub fn format_patch_line(family_name: &str, replacements: Option<usize>) -> String {
    match replacements {
        Some(n) => format!("{family_name}: {n} replacements"),
        None => format!("{family_name}: manifest not found, skipped"),
    }
}

// ============================================================================
// Reorganize output
// ============================================================================

/// Per-mapping move lines under a family header.
pub fn format_reorganize_output(family_name: &str, records: &[MoveRecord]) -> Vec<String> {
    let mut lines = vec![family_name.to_string()];
    for record in records {
        let line = match &record.outcome {
            MoveOutcome::Moved { files } => format!(
                "    {} -> {} ({} files)",
                record.from, record.to, files
            ),
            MoveOutcome::SkippedMissing => {
                format!("    {} -> {} (missing, skipped)", record.from, record.to)
            }
        };
        lines.push(line);
    }
    lines
}

/// Print reorganize output to stdout.
pub fn print_reorganize_output(family_name: &str, records: &[MoveRecord]) {
    for line in format_reorganize_output(family_name, records) {
        println!("{}", line);
    }
}

// ============================================================================
// Verify output
// ============================================================================

/// Per-URL status lines plus the aggregate summary.
pub fn format_verify_output(results: &[ProbeResult], summary: &VerifySummary) -> Vec<String> {
    let mut lines = Vec::new();
    for result in results {
        match &result.error {
            Some(error) => lines.push(format!("ERR {} ({error})", result.url)),
            None => lines.push(format!("{} {}", result.status, result.url)),
        }
    }
    lines.push(format!("Verified: {summary}"));
    lines
}

/// Print verify output to stdout.
pub fn print_verify_output(results: &[ProbeResult], summary: &VerifySummary) {
    for line in format_verify_output(results, summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
