//! Category-driven metadata extraction from filenames.
//!
//! Photography folders double as categories, and each category encodes
//! structured fields directly in its filenames — no sidecar files, no
//! embedded tags, just the naming convention the photographer already uses
//! when exporting:
//!
//! - **Portraits**: `NN Model-<name>, <location>.jpg` → `model` + `location`.
//!   `3 Model-Jane Doe, Paris.jpg` yields model "Jane Doe", location "Paris".
//! - **Landscapes**: the whole stem is the location. `7 Tokyo.jpg` → "Tokyo".
//! - **Product Shoot**: the stem is a free-form description; an empty stem
//!   falls back to a fixed default so the gallery never renders a blank
//!   caption.
//!
//! Extraction is applied to the stem *after* the numeric ordering prefix is
//! stripped (see [`crate::naming`]). A filename that does not match its
//! category's pattern yields no metadata — that is normal content, not an
//! error.

use crate::manifest::ImageMetadata;

/// Portrait filenames start with this marker after the ordering prefix.
const PORTRAIT_MARKER: &str = "Model-";

/// Caption used for product shots whose stem is empty (e.g. `4.jpg`).
const DEFAULT_PRODUCT_DESCRIPTION: &str = "Product shot";

/// Extract metadata for an image under `category`, given its prefix-stripped
/// stem. Returns `None` for unknown categories and pattern mismatches.
pub fn extract(category: &str, stem: &str) -> Option<ImageMetadata> {
    match category {
        "Portraits" => parse_portrait(stem),
        "Landscapes" => {
            if stem.is_empty() {
                None
            } else {
                Some(ImageMetadata::Landscape {
                    location: stem.to_string(),
                })
            }
        }
        "Product Shoot" => {
            let description = if stem.is_empty() {
                DEFAULT_PRODUCT_DESCRIPTION.to_string()
            } else {
                stem.to_string()
            };
            Some(ImageMetadata::Product { description })
        }
        _ => None,
    }
}

/// Parse `Model-<name>, <location>`.
///
/// Splits on the first `", "` so commas stay available to the location part
/// (`Model-Jane, Old Port, Montreal` → name "Jane", location
/// "Old Port, Montreal"). Either side empty is a mismatch.
fn parse_portrait(stem: &str) -> Option<ImageMetadata> {
    let rest = stem.strip_prefix(PORTRAIT_MARKER)?;
    let (model, location) = rest.split_once(", ")?;
    if model.is_empty() || location.is_empty() {
        return None;
    }
    Some(ImageMetadata::Portrait {
        model: model.to_string(),
        location: location.to_string(),
    })
}
