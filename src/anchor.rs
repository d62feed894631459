//! Diff-header anchors that precede a rewritable path.
//!
//! Matching is purely textual. A line can carry several anchors (a git
//! header has two paths), and each anchor is matched against the line as it
//! stands after the previous anchor's rewrite.

use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorPattern {
    /// ` create mode 100644 <path>` in a commit summary
    CreateMode,
    /// `--- a/<path>`
    MinusHeader,
    /// `+++ b/<path>`
    PlusHeader,
    /// first path of `diff --git a/<path> b/<path>`
    GitDiffOld,
    /// second path of `diff --git a/<path> b/<path>`
    GitDiffNew,
}

impl AnchorPattern {
    /// All anchors in processing order.
    pub const ALL: [AnchorPattern; 5] = [
        AnchorPattern::CreateMode,
        AnchorPattern::MinusHeader,
        AnchorPattern::PlusHeader,
        AnchorPattern::GitDiffOld,
        AnchorPattern::GitDiffNew,
    ];

    pub fn as_regex_str(self) -> &'static str {
        match self {
            AnchorPattern::CreateMode => r"^ create mode [0-7]{6} ",
            AnchorPattern::MinusHeader => r"^--- a/",
            AnchorPattern::PlusHeader => r"^\+\+\+ b/",
            AnchorPattern::GitDiffOld => r"^diff --git a/",
            AnchorPattern::GitDiffNew => r"^diff --git a/.+? b/",
        }
    }

    fn regex(self) -> &'static Regex {
        &COMPILED[self as usize]
    }

    /// Byte offset just past the anchor, where the path begins.
    pub fn position(self, line: &str) -> Option<usize> {
        self.regex().find(line).map(|m| m.end())
    }
}

impl std::fmt::Display for AnchorPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AnchorPattern::CreateMode => "create-mode",
            AnchorPattern::MinusHeader => "minus-header",
            AnchorPattern::PlusHeader => "plus-header",
            AnchorPattern::GitDiffOld => "git-diff-old",
            AnchorPattern::GitDiffNew => "git-diff-new",
        };
        f.write_str(name)
    }
}

static COMPILED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    AnchorPattern::ALL
        .iter()
        .map(|anchor| Regex::new(anchor.as_regex_str()).expect("anchor patterns are valid"))
        .collect()
});

/// An anchor found on a line and the offset at which its path begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorMatch {
    pub anchor: AnchorPattern,
    pub position: usize,
}

/// Match a single anchor against `line`.
pub fn match_anchor(anchor: AnchorPattern, line: &str) -> Option<AnchorMatch> {
    anchor
        .position(line)
        .map(|position| AnchorMatch { anchor, position })
}

/// Every anchor present on `line`, in processing order.
pub fn find_anchors(line: &str) -> Vec<AnchorMatch> {
    AnchorPattern::ALL
        .iter()
        .filter_map(|&anchor| match_anchor(anchor, line))
        .collect()
}
