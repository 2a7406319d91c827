//! Pipeline configuration.
//!
//! Handles loading and validating `config.toml` from the assets root. Every
//! pipeline stage takes its configuration as explicit parameters — nothing
//! reads module-level constants, so the scanner, rewriter, and prober are
//! pure functions of their inputs.
//!
//! ## Config File Location
//!
//! Place `config.toml` in the assets root (or point `--config` anywhere):
//!
//! ```text
//! assets/
//! ├── config.toml
//! ├── Graphics/
//! │   └── ...
//! └── Photography/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [cloud]
//! host = "res.cloudinary.com"  # CDN host
//! name = "demo"                # Cloud name (account/namespace segment)
//!
//! [[families]]
//! name = "graphics"
//! dir = "Graphics"             # Directory under the assets root
//! shape = "generic"            # Manifest shape: "generic" | "categorized"
//! base_path = "Portfolio/Graphic Design"  # Remote folder prefix
//! extensions = ["jpg", "jpeg", "png", "gif", "webp", "svg"]
//! numeric_ordering = false     # Sort siblings by leading integer prefix
//!
//! [[families]]
//! name = "photography"
//! dir = "Photography"
//! shape = "categorized"
//! base_path = "Portfolio/Photography"
//! extensions = ["jpg", "jpeg", "png", "gif", "webp"]
//! numeric_ordering = true
//!
//! # Folder mappings translate a flat legacy folder into its new home, both
//! # for URL rewriting and for on-disk reorganization. First match wins.
//! #
//! # [[mappings]]
//! # from = "Logos"
//! # to = "01-Branding-Identity/Logos"
//!
//! [verify]
//! sample = 10                  # Remote URLs probed per verify run
//!
//! # Raw-text patching of an already-rewritten manifest. Only needed when
//! # migrating between cloud accounts or renaming a remote base folder.
//! #
//! # [patch]
//! # old_name = "dacbxyltq"
//! # old_folder = "Portfolio/Graphics"
//! # new_folder = "Portfolio/Graphic Design"
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown
//! keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Pipeline configuration loaded from `config.toml`.
///
/// All fields have working defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote image host settings.
    pub cloud: CloudConfig,
    /// Asset families, one manifest each.
    pub families: Vec<FamilyConfig>,
    /// Folder translation table, first match wins.
    pub mappings: Vec<FolderMapping>,
    /// URL verification settings.
    pub verify: VerifyConfig,
    /// Raw-text manifest patching, absent unless a migration needs it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<PatchConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cloud: CloudConfig::default(),
            families: vec![FamilyConfig::graphics(), FamilyConfig::photography()],
            mappings: Vec::new(),
            verify: VerifyConfig::default(),
            patch: None,
        }
    }
}

impl Config {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cloud.host.is_empty() || self.cloud.name.is_empty() {
            return Err(ConfigError::Validation(
                "cloud.host and cloud.name must be non-empty".into(),
            ));
        }
        if self.families.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[families]] entry is required".into(),
            ));
        }
        for family in &self.families {
            if family.name.is_empty() || family.dir.is_empty() {
                return Err(ConfigError::Validation(
                    "family name and dir must be non-empty".into(),
                ));
            }
            if family.extensions.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "family '{}' has an empty extension list",
                    family.name
                )));
            }
            if family.extensions.iter().any(|e| e.starts_with('.')) {
                return Err(ConfigError::Validation(format!(
                    "family '{}' extensions must not include the dot",
                    family.name
                )));
            }
        }
        if self.mappings.iter().any(|m| m.from.is_empty()) {
            return Err(ConfigError::Validation(
                "mapping 'from' must be non-empty".into(),
            ));
        }
        if self.verify.sample == 0 {
            return Err(ConfigError::Validation("verify.sample must be > 0".into()));
        }
        Ok(())
    }

    /// Look up a family by name.
    pub fn family(&self, name: &str) -> Option<&FamilyConfig> {
        self.families.iter().find(|f| f.name == name)
    }
}

/// Remote image host settings. URLs take the form
/// `https://<host>/<name>/image/upload/<path>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloudConfig {
    /// CDN host serving the images.
    pub host: String,
    /// Cloud name — the account/namespace segment of every remote URL.
    pub name: String,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            host: "res.cloudinary.com".to_string(),
            name: "demo".to_string(),
        }
    }
}

/// Manifest shape produced for a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestShape {
    /// Folder tree plus flat image list.
    Generic,
    /// Top-level category nodes with per-category image lists and counters.
    Categorized,
}

/// One asset family: a directory under the assets root with its own
/// manifest, shape, extension set, and remote base path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FamilyConfig {
    pub name: String,
    /// Directory under the assets root.
    pub dir: String,
    pub shape: ManifestShape,
    /// Remote folder prefix prepended after mapping translation.
    pub base_path: String,
    /// Recognized image extensions, lowercase, no dot.
    pub extensions: Vec<String>,
    /// Sort siblings by leading integer prefix (photography convention).
    pub numeric_ordering: bool,
}

impl FamilyConfig {
    pub fn graphics() -> Self {
        Self {
            name: "graphics".to_string(),
            dir: "Graphics".to_string(),
            shape: ManifestShape::Generic,
            base_path: "Portfolio/Graphic Design".to_string(),
            extensions: ["jpg", "jpeg", "png", "gif", "webp", "svg"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            numeric_ordering: false,
        }
    }

    pub fn photography() -> Self {
        Self {
            name: "photography".to_string(),
            dir: "Photography".to_string(),
            shape: ManifestShape::Categorized,
            base_path: "Portfolio/Photography".to_string(),
            extensions: ["jpg", "jpeg", "png", "gif", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            numeric_ordering: true,
        }
    }

    /// Whether `name` has a recognized image extension.
    pub fn is_image(&self, name: &str) -> bool {
        let ext = name
            .rsplit_once('.')
            .map(|(_, e)| e.to_lowercase())
            .unwrap_or_default();
        self.extensions.iter().any(|e| *e == ext)
    }
}

impl Default for FamilyConfig {
    fn default() -> Self {
        Self::graphics()
    }
}

/// Translation of a flat legacy folder name into its destination path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolderMapping {
    pub from: String,
    pub to: String,
}

/// URL verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifyConfig {
    /// Number of remote URLs probed per run.
    pub sample: usize,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self { sample: 10 }
    }
}

/// Raw-text manifest patching values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchConfig {
    /// Cloud name to replace (the new one comes from `[cloud]`).
    pub old_name: String,
    /// Optional remote folder rename applied in the same pass.
    #[serde(default)]
    pub old_folder: Option<String>,
    #[serde(default)]
    pub new_folder: Option<String>,
}

/// Load configuration from `<root>/config.toml`, falling back to defaults
/// when the file doesn't exist.
pub fn load_config(root: &Path) -> Result<Config, ConfigError> {
    load_file(&root.join("config.toml"))
}

/// Load configuration from an explicit file path, falling back to defaults
/// when the file doesn't exist.
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    let config = if path.exists() {
        toml::from_str(&fs::read_to_string(path)?)?
    } else {
        Config::default()
    };
    config.validate()?;
    Ok(config)
}

/// A stock `config.toml` with every option documented, printed by the
/// `gen-config` subcommand.
pub fn stock_config_toml() -> &'static str {
    r#"# gallery-assets configuration
# All options are optional - defaults shown below.

[cloud]
host = "res.cloudinary.com"  # CDN host
name = "demo"                # Cloud name (account/namespace segment)

[[families]]
name = "graphics"
dir = "Graphics"             # Directory under the assets root
shape = "generic"            # Manifest shape: "generic" | "categorized"
base_path = "Portfolio/Graphic Design"  # Remote folder prefix
extensions = ["jpg", "jpeg", "png", "gif", "webp", "svg"]
numeric_ordering = false     # Sort siblings by leading integer prefix

[[families]]
name = "photography"
dir = "Photography"
shape = "categorized"
base_path = "Portfolio/Photography"
extensions = ["jpg", "jpeg", "png", "gif", "webp"]
numeric_ordering = true

# Folder mappings translate a flat legacy folder into its new home, both
# for URL rewriting and for on-disk reorganization. First match wins.
#
# [[mappings]]
# from = "Logos"
# to = "01-Branding-Identity/Logos"

[verify]
sample = 10                  # Remote URLs probed per verify run

# Raw-text patching of an already-rewritten manifest. Only needed when
# migrating between cloud accounts or renaming a remote base folder.
#
# [patch]
# old_name = "dacbxyltq"
# old_folder = "Portfolio/Graphics"
# new_folder = "Portfolio/Graphic Design"
"#
}
