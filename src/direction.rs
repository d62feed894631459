//! Which layout a patch is currently written in.
//!
//! A single [`Direction`] is live for the whole pass over a patch. It starts
//! [`Direction::Undetermined`], is set by the first line whose path matches a
//! table entry, and is force-corrected when a later line proves otherwise.

use crate::mapping::{LayoutTables, MappingEntry};

/// Named after the table whose `from` side matched the patch's paths: a
/// patch in `SourceToPackaged` direction is written in the source layout and
/// would be translated by the source-to-packaged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Undetermined,
    /// Only paths that are the same in both layouts have been seen so far.
    Identity,
    SourceToPackaged,
    PackagedToSource,
}

impl Direction {
    /// `Undetermined` and `Identity` carry no evidence about the layout and
    /// are replaced by the first real match without a warning.
    pub fn is_weak(self) -> bool {
        matches!(self, Direction::Undetermined | Direction::Identity)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Undetermined => "undetermined",
            Direction::Identity => "identity",
            Direction::SourceToPackaged => "git2deb",
            Direction::PackagedToSource => "deb2git",
        };
        f.write_str(name)
    }
}

/// A later line contradicted the established direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contradiction {
    pub previous: Direction,
    pub current: Direction,
    /// The entry that matched, formatted as `'from' => 'to'`.
    pub rule: String,
}

/// What a single detection step did to the live direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Nothing matched, or the match agreed with the current direction.
    Unchanged,
    /// The direction moved from a weak state to `direction`.
    Established { direction: Direction, rule: String },
    /// The direction was force-corrected.
    Contradicted(Contradiction),
}

/// Update `direction` from the path that starts `remainder`.
///
/// The packaged-side table is tried first: a path that matches a packaged
/// prefix is in the packaged layout. The source-side table is only consulted
/// while the direction is still weak. Within each table the first matching
/// entry is the only one considered.
pub fn detect(tables: &LayoutTables, direction: &mut Direction, remainder: &str) -> Detection {
    let mut outcome = Detection::Unchanged;

    if let Some((entry, _)) = tables.packaged_to_source.first_match(remainder) {
        outcome = record(direction, entry, Direction::PackagedToSource);
    }

    if direction.is_weak() {
        if let Some((entry, _)) = tables.source_to_packaged.first_match(remainder) {
            let step = record(direction, entry, Direction::SourceToPackaged);
            if step != Detection::Unchanged {
                outcome = step;
            }
        }
    }

    outcome
}

fn record(direction: &mut Direction, entry: &MappingEntry, evidence: Direction) -> Detection {
    if entry.is_identity() {
        if *direction == Direction::Undetermined {
            *direction = Direction::Identity;
            return Detection::Established {
                direction: Direction::Identity,
                rule: entry.to_string(),
            };
        }
        return Detection::Unchanged;
    }

    let previous = *direction;
    if previous == evidence {
        return Detection::Unchanged;
    }

    *direction = evidence;
    if previous.is_weak() {
        Detection::Established {
            direction: evidence,
            rule: entry.to_string(),
        }
    } else {
        Detection::Contradicted(Contradiction {
            previous,
            current: evidence,
            rule: entry.to_string(),
        })
    }
}
