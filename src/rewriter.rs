//! One sequential pass over a patch.
//!
//! Lines are processed strictly in order because the detected [`Direction`]
//! carries over from one line to the next. Lines without an anchor are
//! copied through untouched.

use crate::anchor::{match_anchor, AnchorPattern};
use crate::direction::{detect, Contradiction, Detection, Direction};
use crate::mapping::LayoutTables;
use crate::translate::{translate, OutputFormat, Translation};

/// An anchored path that no entry could translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedLine {
    /// 1-based
    pub line_number: usize,
    pub anchor: AnchorPattern,
    pub line: String,
}

/// A direction correction and where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContradictionAt {
    /// 1-based
    pub line_number: usize,
    pub line: String,
    pub contradiction: Contradiction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub lines: usize,
    pub anchors_matched: usize,
    pub lines_rewritten: usize,
    pub direction: Direction,
    pub contradictions: Vec<ContradictionAt>,
    pub unmapped: Vec<UnmappedLine>,
}

impl RewriteReport {
    pub fn is_clean(&self) -> bool {
        self.contradictions.is_empty() && self.unmapped.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutput {
    pub text: String,
    pub report: RewriteReport,
}

impl RewriteOutput {
    pub fn changed(&self) -> bool {
        self.report.lines_rewritten > 0
    }
}

/// Rewrites every anchored path in a patch into the requested layout.
#[derive(Debug, Clone, Copy)]
pub struct PatchRewriter<'t> {
    tables: &'t LayoutTables,
    format: OutputFormat,
}

impl PatchRewriter<'static> {
    /// Rewriter over the built-in Koha tables.
    pub fn builtin(format: OutputFormat) -> Self {
        Self::new(LayoutTables::builtin(), format)
    }
}

impl<'t> PatchRewriter<'t> {
    pub fn new(tables: &'t LayoutTables, format: OutputFormat) -> Self {
        Self { tables, format }
    }

    /// Rewrite a whole patch, starting from an undetermined direction.
    pub fn rewrite(&self, input: &str) -> RewriteOutput {
        let mut direction = Direction::Undetermined;
        let mut report = RewriteReport::default();
        let mut text = String::with_capacity(input.len());

        for (index, raw) in input.split_inclusive('\n').enumerate() {
            report.lines += 1;
            let mut line = raw.to_string();
            if self.rewrite_line(&mut direction, &mut line, index + 1, &mut report) {
                report.lines_rewritten += 1;
            }
            text.push_str(&line);
        }

        report.direction = direction;
        RewriteOutput { text, report }
    }

    /// Process every anchor on one line. Returns whether the line changed.
    pub fn rewrite_line(
        &self,
        direction: &mut Direction,
        line: &mut String,
        line_number: usize,
        report: &mut RewriteReport,
    ) -> bool {
        let mut changed = false;

        for anchor in AnchorPattern::ALL {
            let Some(found) = match_anchor(anchor, line) else {
                continue;
            };
            report.anchors_matched += 1;

            match detect(self.tables, direction, &line[found.position..]) {
                Detection::Unchanged => {}
                Detection::Established {
                    direction: established,
                    rule,
                } => {
                    tracing::debug!(line = line_number, %rule, "detected {established} patch");
                }
                Detection::Contradicted(contradiction) => {
                    tracing::warn!(
                        "previous mapping changed from {} to {} at line {}: {} (rule {})",
                        contradiction.previous,
                        contradiction.current,
                        line_number,
                        line.trim_end(),
                        contradiction.rule,
                    );
                    report.contradictions.push(ContradictionAt {
                        line_number,
                        line: line.clone(),
                        contradiction,
                    });
                }
            }

            match translate(self.tables, self.format, *direction, line, found.position) {
                Translation::Rewritten { from, to } => {
                    tracing::debug!(line = line_number, %anchor, "rewrote '{from}' to '{to}'");
                    changed = true;
                }
                Translation::AlreadyCorrect => {}
                Translation::Unmapped => {
                    tracing::info!(
                        "no mapping found for {} at line {}: {}",
                        anchor,
                        line_number,
                        line.trim_end()
                    );
                    report.unmapped.push(UnmappedLine {
                        line_number,
                        anchor,
                        line: line.clone(),
                    });
                }
            }
        }

        changed
    }
}

/// Rewrite `input` with the built-in tables.
pub fn rewrite_patch(input: &str, format: OutputFormat) -> RewriteOutput {
    PatchRewriter::builtin(format).rewrite(input)
}
