//! # Gallery Assets
//!
//! Asset manifest builder and CDN migration tool for portfolio image
//! libraries. Your filesystem is the data source: directories become
//! folders or categories, filenames carry ordering and metadata, and the
//! manifest is the JSON document the portfolio front-end renders from.
//!
//! # Architecture: Scan → Rewrite → Verify
//!
//! The pipeline runs as independent batch stages, each reading the previous
//! stage's manifest from disk:
//!
//! ```text
//! 1. Scan      assets/<family>/  →  manifest.json   (filesystem → structured data)
//! 2. Rewrite   manifest.json    →  manifest.json   (local paths → CDN URLs)
//! 3. Verify    manifest.json    →  stdout          (probe a sample of URLs)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: the manifest is human-readable JSON you can inspect
//!   between stages.
//! - **Safety**: the rewrite pass can run any number of times — hosting
//!   state is a tagged variant, so already-migrated entries are skipped,
//!   never double-prefixed.
//! - **Testability**: every stage is a pure function of explicit inputs
//!   (config, lister, manifest), so tests run against in-memory fixtures.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks a family directory, extracts metadata, produces the manifest |
//! | [`rewrite`] | Stage 2 — retags local paths as remote CDN URLs; raw-text patch variant |
//! | [`verify`] | Stage 3 — parallel reachability probe over a URL sample |
//! | [`reorganize`] | Moves legacy flat folders into the mapped taxonomy on disk |
//! | [`manifest`] | Manifest data model (`AssetPath`, `ImageEntry`, `FolderNode`) and persistence |
//! | [`config`] | `config.toml` loading, validation, stock config generation |
//! | [`lister`] | Directory-listing capability; filesystem and in-memory implementations |
//! | [`naming`] | `NN Name` numeric-prefix convention parser and sibling comparator |
//! | [`metadata`] | Category-specific filename metadata extraction |
//! | [`output`] | CLI output formatting — information-first display of stage results |
//!
//! # Design Decisions
//!
//! ## Tagged Hosting State
//!
//! Every image path is [`manifest::AssetPath`] — `Local` or `Remote`. The
//! earlier generation of this tooling rewrote bare path strings in place,
//! which corrupted data when a migration ran twice (the remote URL got a
//! second base prefix). Making hosting state part of the data model turns
//! the rewriter into a checked state transition: `Local → Remote` happens
//! once, `Remote` entries are reported as skipped.
//!
//! ## Explicit Configuration
//!
//! Cloud identifiers, folder mappings, family layouts, and probe sample
//! sizes all live in `config.toml` and are passed into each stage as
//! parameters. No stage reads module-level constants, so behavior is fully
//! determined by (config, filesystem) and tests can construct any scenario.
//!
//! ## Percent-Encoding at the Boundary
//!
//! Local paths stay human-readable (`Photography/Landscapes/12 Old Port,
//! Montreal.jpg`). Encoding happens once, per path segment, when the remote
//! URL is constructed — space becomes `%20`, comma `%2C`, and `/` survives
//! as the separator.
//!
//! ## One Attempt Per Operation
//!
//! Scans, rewrites, moves, and probes are each attempted exactly once. A
//! missing input skips its step and the siblings still run; a real IO error
//! aborts the run with a non-zero exit. There are no retries and no
//! partial-write recovery — the manifest is cheap to regenerate from disk.

pub mod config;
pub mod lister;
pub mod manifest;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod reorganize;
pub mod rewrite;
pub mod scan;
pub mod verify;

#[cfg(test)]
pub(crate) mod test_helpers;
