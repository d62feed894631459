//! In-place rewriting of a single anchored path.

use crate::direction::Direction;
use crate::mapping::{LayoutTables, MappingTable};
use serde::Deserialize;

/// Layout the output patch should be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Packaged layout (`/usr/share/koha`)
    #[default]
    Deb,
    /// Git checkout layout
    Git,
}

impl OutputFormat {
    /// Whether a patch detected as `direction` is looked up in this
    /// format's table. `deb` only rewrites source-layout patches; `git`
    /// looks up any patch with a real direction, so a source path under
    /// `git` is reported as unmapped.
    pub fn rewrites(self, direction: Direction) -> bool {
        match self {
            OutputFormat::Deb => direction == Direction::SourceToPackaged,
            OutputFormat::Git => matches!(
                direction,
                Direction::SourceToPackaged | Direction::PackagedToSource
            ),
        }
    }

    pub fn table(self, tables: &LayoutTables) -> &MappingTable {
        match self {
            OutputFormat::Deb => &tables.source_to_packaged,
            OutputFormat::Git => &tables.packaged_to_source,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Deb => f.write_str("deb"),
            OutputFormat::Git => f.write_str("git"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an Unmapped translation should be reported"]
pub enum Translation {
    /// The path prefix was replaced.
    Rewritten { from: String, to: String },
    /// The patch is already in the requested layout.
    AlreadyCorrect,
    /// No entry applies to this path.
    Unmapped,
}

impl Translation {
    pub fn is_success(&self) -> bool {
        !matches!(self, Translation::Unmapped)
    }
}

/// Rewrite the path that starts at `position` in `line`.
///
/// Only the matched prefix is replaced; everything before `position` and
/// after the prefix is preserved byte for byte.
pub fn translate(
    tables: &LayoutTables,
    format: OutputFormat,
    direction: Direction,
    line: &mut String,
    position: usize,
) -> Translation {
    if direction == Direction::Undetermined {
        return Translation::Unmapped;
    }
    if !format.rewrites(direction) {
        return Translation::AlreadyCorrect;
    }

    let Some((entry, len)) = format.table(tables).first_match(&line[position..]) else {
        return Translation::Unmapped;
    };
    if entry.is_identity() {
        return Translation::AlreadyCorrect;
    }

    let from = line[position..position + len].to_string();
    line.replace_range(position..position + len, entry.to());
    Translation::Rewritten {
        from,
        to: entry.to().to_string(),
    }
}
