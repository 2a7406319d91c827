//! Filesystem scanning and manifest generation.
//!
//! Stage 1 of the pipeline. Walks a family's directory tree to discover
//! images, producing the [`Manifest`] that the rewrite and verify stages
//! consume.
//!
//! ## Directory Structure
//!
//! Each asset family is one directory under the assets root:
//!
//! ```text
//! assets/
//! ├── config.toml
//! ├── Graphics/                    # generic family: folder tree
//! │   ├── Logos/
//! │   │   └── a.png
//! │   ├── Posters/
//! │   │   └── Concert Poster.jpg
//! │   └── banner.png
//! └── Photography/                 # categorized family: folders are categories
//!     ├── Portraits/
//!     │   └── 3 Model-Jane Doe, Paris.jpg
//!     ├── Landscapes/
//!     │   ├── 2 Forest.jpg         # ordered by numeric prefix
//!     │   └── 10 Beach.jpg
//!     └── Product Shoot/
//!         └── 4.jpg
//! ```
//!
//! ## Traversal
//!
//! Depth-first, siblings in name order — or numeric-prefix order for
//! families with `numeric_ordering` (see [`crate::naming`]). Manifest files,
//! category-metadata files, and dot-files are never listed and never
//! recursed into. All filesystem access goes through a
//! [`DirectoryLister`], so tests can scan an in-memory fixture.
//!
//! ## Failure
//!
//! A missing family root is a terminal error: the scan produces nothing and
//! no manifest is written. An unreadable subdirectory surfaces as an IO
//! error mid-walk.

use crate::config::{FamilyConfig, ManifestShape};
use crate::lister::DirectoryLister;
use crate::manifest::{
    AssetPath, CATEGORY_METADATA_FILE, CategorizedManifest, FolderNode, GenericManifest,
    ImageEntry, MANIFEST_FILE, Manifest,
};
use crate::{metadata, naming};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("asset directory not found: {0}")]
    MissingRoot(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Scan one family under `assets_root` into a manifest.
pub fn scan(
    lister: &dyn DirectoryLister,
    assets_root: &Path,
    family: &FamilyConfig,
) -> Result<Manifest, ScanError> {
    let family_root = assets_root.join(&family.dir);
    if !lister.is_dir(&family_root) {
        return Err(ScanError::MissingRoot(family_root));
    }

    let (root, images) = scan_dir(lister, &family_root, &family.dir, family, true)?;

    Ok(match family.shape {
        ManifestShape::Generic => Manifest::Generic(GenericManifest {
            folders: root.subfolders,
            images,
        }),
        ManifestShape::Categorized => {
            let categories: Vec<FolderNode> = root
                .subfolders
                .into_iter()
                .map(|node| {
                    let prefix = format!("{}/", node.path);
                    let category_images = images
                        .iter()
                        .filter(|e| e.path.as_str().starts_with(&prefix))
                        .cloned()
                        .collect();
                    FolderNode {
                        subfolders: Vec::new(),
                        images: category_images,
                        ..node
                    }
                })
                .collect();
            Manifest::Categorized(CategorizedManifest {
                total_categories: categories.len(),
                total_images: images.len(),
                categories,
                images,
            })
        }
    })
}

/// Files the scanner must never list as images or recurse into.
fn is_excluded(name: &str) -> bool {
    name.starts_with('.') || name == MANIFEST_FILE || name == CATEGORY_METADATA_FILE
}

/// Walk one directory. Returns its node (subfolder tree, recursive image
/// count) and the depth-first image sequence of its subtree.
fn scan_dir(
    lister: &dyn DirectoryLister,
    dir: &Path,
    rel: &str,
    family: &FamilyConfig,
    is_family_root: bool,
) -> Result<(FolderNode, Vec<ImageEntry>), ScanError> {
    let mut entries: Vec<_> = lister
        .list(dir)?
        .into_iter()
        .filter(|e| !is_excluded(&e.name))
        .collect();
    if family.numeric_ordering {
        entries.sort_by_key(|e| naming::sort_key(&e.name));
    }

    let dir_name = rel.rsplit('/').next().unwrap_or(rel);
    // An image's category is its immediate parent folder, categorized
    // families only. Images directly under the family root have none.
    let category = (!is_family_root && family.shape == ManifestShape::Categorized)
        .then_some(dir_name);

    let mut images = Vec::new();
    let mut subfolders = Vec::new();
    for entry in entries {
        let child_rel = format!("{rel}/{}", entry.name);
        if entry.is_dir() {
            let (node, sub_images) =
                scan_dir(lister, &dir.join(&entry.name), &child_rel, family, false)?;
            subfolders.push(node);
            images.extend(sub_images);
        } else if family.is_image(&entry.name) {
            let stem = entry
                .name
                .rsplit_once('.')
                .map(|(s, _)| s)
                .unwrap_or(&entry.name);
            let parsed = naming::split_numeric_prefix(stem);
            let metadata = category.and_then(|c| metadata::extract(c, &parsed.rest));
            images.push(ImageEntry {
                name: entry.name.clone(),
                path: AssetPath::Local(child_rel),
                size: entry.size,
                modified: entry.modified,
                category: category.map(str::to_string),
                metadata,
            });
        }
    }

    let node = FolderNode {
        name: dir_name.to_string(),
        path: rel.to_string(),
        image_count: images.len(),
        subfolders,
        images: Vec::new(),
    };
    Ok((node, images))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::lister::FsLister;
    use crate::manifest::ImageMetadata;
    use crate::test_helpers::{MemLister, build_fixture_tree, find_entry, find_folder};
    use std::path::Path;
    use tempfile::TempDir;

    fn graphics() -> FamilyConfig {
        Config::default().family("graphics").unwrap().clone()
    }

    fn photography() -> FamilyConfig {
        Config::default().family("photography").unwrap().clone()
    }

    fn fixture_lister() -> MemLister {
        MemLister::new()
            .file("assets/Graphics/Logos/a.png", 10)
            .file("assets/Graphics/Logos/b.svg", 11)
            .file("assets/Graphics/Posters/Concert Poster.jpg", 12)
            .file("assets/Graphics/banner.png", 13)
            .file("assets/Photography/Portraits/1 Model-Ana, Lisbon.jpg", 20)
            .file("assets/Photography/Portraits/3 Model-Jane Doe, Paris.jpg", 21)
            .file("assets/Photography/Landscapes/2 Forest.jpg", 22)
            .file("assets/Photography/Landscapes/7 Tokyo.jpg", 23)
            .file("assets/Photography/Landscapes/10 Beach.jpg", 24)
            .file("assets/Photography/Landscapes/Apple.jpg", 25)
            .file("assets/Photography/Product Shoot/4.jpg", 26)
            .file("assets/Photography/Product Shoot/5 Leather strap.jpg", 27)
    }

    #[test]
    fn missing_root_is_terminal() {
        let lister = MemLister::new().file("assets/Graphics/a.png", 1);
        let result = scan(&lister, Path::new("assets"), &photography());
        assert!(matches!(result, Err(ScanError::MissingRoot(_))));
    }

    #[test]
    fn generic_scan_finds_every_image_at_any_depth() {
        let manifest = scan(&fixture_lister(), Path::new("assets"), &graphics()).unwrap();
        assert_eq!(manifest.images().len(), 4);
        let Manifest::Generic(generic) = &manifest else {
            panic!("graphics family must produce the generic shape");
        };
        assert_eq!(generic.folders.len(), 2);
        assert_eq!(find_folder(&generic.folders, "Logos").image_count, 2);
        assert_eq!(find_folder(&generic.folders, "Posters").image_count, 1);
    }

    #[test]
    fn image_count_is_recursive() {
        let lister = MemLister::new()
            .file("assets/Graphics/Web/Site/hero.png", 1)
            .file("assets/Graphics/Web/Site/footer.png", 1)
            .file("assets/Graphics/Web/icon.png", 1);
        let manifest = scan(&lister, Path::new("assets"), &graphics()).unwrap();
        let Manifest::Generic(generic) = &manifest else {
            panic!("expected generic manifest");
        };
        let web = find_folder(&generic.folders, "Web");
        assert_eq!(web.image_count, 3);
        assert_eq!(find_folder(&web.subfolders, "Site").image_count, 2);
    }

    #[test]
    fn unrecognized_extensions_are_ignored() {
        let lister = MemLister::new()
            .file("assets/Graphics/a.png", 1)
            .file("assets/Graphics/readme.txt", 1)
            .file("assets/Graphics/raw.cr2", 1);
        let manifest = scan(&lister, Path::new("assets"), &graphics()).unwrap();
        assert_eq!(manifest.images().len(), 1);
    }

    #[test]
    fn manifest_and_metadata_files_are_skipped() {
        let lister = MemLister::new()
            .file("assets/Graphics/manifest.json", 1)
            .file("assets/Graphics/categories.json", 1)
            .file("assets/Graphics/.hidden.png", 1)
            .file("assets/Graphics/a.png", 1);
        let manifest = scan(&lister, Path::new("assets"), &graphics()).unwrap();
        assert_eq!(manifest.images().len(), 1);
        assert_eq!(manifest.images()[0].name, "a.png");
    }

    #[test]
    fn svg_recognized_only_where_configured() {
        let lister = MemLister::new()
            .file("assets/Graphics/logo.svg", 1)
            .file("assets/Photography/Landscapes/7 Tokyo.svg", 1);
        let graphics_manifest = scan(&lister, Path::new("assets"), &graphics()).unwrap();
        assert_eq!(graphics_manifest.images().len(), 1);
        let photo_manifest = scan(&lister, Path::new("assets"), &photography()).unwrap();
        assert_eq!(photo_manifest.images().len(), 0);
    }

    #[test]
    fn local_paths_are_root_relative_with_forward_slashes() {
        let manifest = scan(&fixture_lister(), Path::new("assets"), &graphics()).unwrap();
        let entry = find_entry(&manifest, "a.png");
        assert_eq!(entry.path.as_str(), "Graphics/Logos/a.png");
        assert!(!entry.path.is_remote());
    }

    #[test]
    fn size_and_modified_are_recorded() {
        let manifest = scan(&fixture_lister(), Path::new("assets"), &graphics()).unwrap();
        let entry = find_entry(&manifest, "banner.png");
        assert_eq!(entry.size, 13);
        assert_eq!(entry.modified, crate::test_helpers::MEM_MTIME);
    }

    #[test]
    fn photography_produces_categorized_shape() {
        let manifest = scan(&fixture_lister(), Path::new("assets"), &photography()).unwrap();
        let Manifest::Categorized(categorized) = &manifest else {
            panic!("photography family must produce the categorized shape");
        };
        assert_eq!(categorized.total_categories, 3);
        assert_eq!(categorized.total_images, 8);
        assert_eq!(categorized.images.len(), 8);
        let landscapes = find_folder(&categorized.categories, "Landscapes");
        assert_eq!(landscapes.image_count, 4);
        assert_eq!(landscapes.images.len(), 4);
        assert!(landscapes.subfolders.is_empty());
    }

    #[test]
    fn numeric_prefix_ordering_within_category() {
        let manifest = scan(&fixture_lister(), Path::new("assets"), &photography()).unwrap();
        let Manifest::Categorized(categorized) = &manifest else {
            panic!("expected categorized manifest");
        };
        let names: Vec<&str> = find_folder(&categorized.categories, "Landscapes")
            .images
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["2 Forest.jpg", "7 Tokyo.jpg", "10 Beach.jpg", "Apple.jpg"]
        );
    }

    #[test]
    fn category_is_the_immediate_parent_folder() {
        let manifest = scan(&fixture_lister(), Path::new("assets"), &photography()).unwrap();
        let entry = find_entry(&manifest, "7 Tokyo.jpg");
        assert_eq!(entry.category.as_deref(), Some("Landscapes"));
    }

    #[test]
    fn portrait_metadata_extracted() {
        let manifest = scan(&fixture_lister(), Path::new("assets"), &photography()).unwrap();
        let entry = find_entry(&manifest, "3 Model-Jane Doe, Paris.jpg");
        assert_eq!(
            entry.metadata,
            Some(ImageMetadata::Portrait {
                model: "Jane Doe".into(),
                location: "Paris".into()
            })
        );
    }

    #[test]
    fn landscape_metadata_extracted() {
        let manifest = scan(&fixture_lister(), Path::new("assets"), &photography()).unwrap();
        let entry = find_entry(&manifest, "7 Tokyo.jpg");
        assert_eq!(
            entry.metadata,
            Some(ImageMetadata::Landscape {
                location: "Tokyo".into()
            })
        );
    }

    #[test]
    fn product_default_description_for_bare_number() {
        let manifest = scan(&fixture_lister(), Path::new("assets"), &photography()).unwrap();
        let entry = find_entry(&manifest, "4.jpg");
        assert_eq!(
            entry.metadata,
            Some(ImageMetadata::Product {
                description: "Product shot".into()
            })
        );
    }

    #[test]
    fn non_matching_portrait_filename_has_no_metadata() {
        let lister = MemLister::new().file("assets/Photography/Portraits/5 Casual.jpg", 1);
        let manifest = scan(&lister, Path::new("assets"), &photography()).unwrap();
        let entry = find_entry(&manifest, "5 Casual.jpg");
        assert_eq!(entry.category.as_deref(), Some("Portraits"));
        assert_eq!(entry.metadata, None);
    }

    #[test]
    fn empty_category_folder_is_listed_with_zero_images() {
        let lister = MemLister::new()
            .file("assets/Photography/Portraits/1 Model-Ana, Lisbon.jpg", 1)
            .dir("assets/Photography/Street");
        let manifest = scan(&lister, Path::new("assets"), &photography()).unwrap();
        let Manifest::Categorized(categorized) = &manifest else {
            panic!("expected categorized manifest");
        };
        assert_eq!(categorized.total_categories, 2);
        let street = find_folder(&categorized.categories, "Street");
        assert_eq!(street.image_count, 0);
        assert!(street.images.is_empty());
    }

    #[test]
    fn images_directly_under_family_root_have_no_category() {
        let lister = MemLister::new().file("assets/Photography/stray.jpg", 1);
        let manifest = scan(&lister, Path::new("assets"), &photography()).unwrap();
        let entry = find_entry(&manifest, "stray.jpg");
        assert_eq!(entry.category, None);
        assert_eq!(entry.metadata, None);
    }

    #[test]
    fn scan_against_real_filesystem_matches_mem_fixture() {
        let tmp = TempDir::new().unwrap();
        build_fixture_tree(tmp.path());

        let graphics_manifest = scan(&FsLister, tmp.path(), &graphics()).unwrap();
        assert_eq!(graphics_manifest.images().len(), 4);

        let photo_manifest = scan(&FsLister, tmp.path(), &photography()).unwrap();
        assert_eq!(photo_manifest.images().len(), 8);
        let entry = find_entry(&photo_manifest, "10 Beach.jpg");
        assert_eq!(entry.size, "fake image bytes".len() as u64);
        assert!(entry.modified > 0);
    }

    #[test]
    fn rescan_of_unchanged_tree_is_identical() {
        let lister = fixture_lister();
        let first = scan(&lister, Path::new("assets"), &photography()).unwrap();
        let second = scan(&lister, Path::new("assets"), &photography()).unwrap();
        assert_eq!(first, second);
    }
}
