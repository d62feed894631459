//! Koha Relayout: rewrite the paths in a patch between Koha's git checkout
//! layout and its Debian package layout.
//!
//! A patch written against a git checkout refers to `C4/Auth.pm`; the same
//! file in an installed package lives at `lib/C4/Auth.pm` below
//! `/usr/share/koha`. This crate rewrites every path that follows a diff
//! header so a patch made in one layout applies to the other.
//!
//! # Architecture
//!
//! - [`mapping`]: ordered `from => to` prefix tables for both directions
//! - [`anchor`]: the diff-header patterns after which a path begins
//! - [`direction`]: decides which layout the patch is already in
//! - [`translate`]: replaces the matched prefix in place
//! - [`rewriter`]: the sequential pass tying the above together
//!
//! # Example
//!
//! ```
//! use koha_relayout::{rewrite_patch, OutputFormat};
//!
//! let out = rewrite_patch("--- a/C4/Auth.pm\n+++ b/C4/Auth.pm\n", OutputFormat::Deb);
//! assert_eq!(out.text, "--- a/lib/C4/Auth.pm\n+++ b/lib/C4/Auth.pm\n");
//! ```

pub mod anchor;
pub mod config;
pub mod direction;
pub mod export;
pub mod mapping;
pub mod output;
pub mod rewriter;
pub mod translate;

// Re-exports
pub use anchor::{find_anchors, match_anchor, AnchorMatch, AnchorPattern};
pub use config::{CliOverrides, ConfigError, Mode, RunConfig, Settings};
pub use direction::{detect, Contradiction, Detection, Direction};
pub use export::{export_commit, ExportError};
pub use mapping::{resolve, LayoutTables, MappingEntry, MappingTable, PathRule};
pub use output::{write_output, OutputError};
pub use rewriter::{rewrite_patch, PatchRewriter, RewriteOutput, RewriteReport};
pub use translate::{translate, OutputFormat, Translation};
