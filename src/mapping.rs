//! Ordered path-prefix tables between the two Koha layouts.
//!
//! The source layout is a git checkout of Koha; the packaged layout is the
//! tree installed under `/usr/share/koha` by the Debian packages. Each table
//! is an ordered list of start-anchored prefix rules where the first rule
//! whose `from` side matches wins, so narrower prefixes must precede broader
//! ones.

use regex::Regex;
use std::sync::LazyLock;

/// A literal pair of path prefixes, `source` on the left, `packaged` on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRule {
    pub source: &'static str,
    pub packaged: &'static str,
}

const fn rule(source: &'static str, packaged: &'static str) -> PathRule {
    PathRule { source, packaged }
}

/// Directory that only exists in the packaged layout. Stripping it maps any
/// intranet CGI script back to the checkout root.
pub const PACKAGED_CGI_ROOT: &str = "intranet/cgi-bin/";

/// Built-in rules, narrow before broad.
pub const KOHA_RULES: &[PathRule] = &[
    rule("api/", "api/"),
    rule("misc/translator/", "misc/translator/"),
    rule("misc/", "bin/"),
    rule("C4/", "lib/C4/"),
    rule("Koha/", "lib/Koha/"),
    rule("Koha.pm", "lib/Koha.pm"),
    rule("koha-tmpl/intranet-tmpl/", "intranet/htdocs/intranet-tmpl/"),
    rule("koha-tmpl/opac-tmpl/", "opac/htdocs/opac-tmpl/"),
    rule("opac/", "opac/cgi-bin/opac/"),
    rule("installer/data/", "intranet/cgi-bin/installer/data/"),
    rule("installer/", "intranet/cgi-bin/installer/"),
    rule("acqui/", "intranet/cgi-bin/acqui/"),
    rule("admin/", "intranet/cgi-bin/admin/"),
    rule("authorities/", "intranet/cgi-bin/authorities/"),
    rule("basket/", "intranet/cgi-bin/basket/"),
    rule("catalogue/", "intranet/cgi-bin/catalogue/"),
    rule("cataloguing/", "intranet/cgi-bin/cataloguing/"),
    rule("circ/", "intranet/cgi-bin/circ/"),
    rule("labels/", "intranet/cgi-bin/labels/"),
    rule("members/", "intranet/cgi-bin/members/"),
    rule("reports/", "intranet/cgi-bin/reports/"),
    rule("reserve/", "intranet/cgi-bin/reserve/"),
    rule("serials/", "intranet/cgi-bin/serials/"),
    rule("svc/", "intranet/cgi-bin/svc/"),
    rule("tools/", "intranet/cgi-bin/tools/"),
    rule("mainpage.pl", "intranet/cgi-bin/mainpage.pl"),
];

/// One compiled `from => to` entry.
#[derive(Debug, Clone)]
pub struct MappingEntry {
    from: String,
    to: String,
    pattern: Regex,
}

impl MappingEntry {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        let pattern = Regex::new(&format!("^{}", regex::escape(&from)))
            .expect("escaped literal prefix is always a valid pattern");
        Self {
            from,
            to: to.into(),
            pattern,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    /// Entries whose two sides are equal never change a path; matching one
    /// only tells us the path is valid in both layouts.
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }

    /// Length of the matched prefix when `remainder` starts with `from`.
    pub fn match_len(&self, remainder: &str) -> Option<usize> {
        self.pattern.find(remainder).map(|m| m.end())
    }
}

impl std::fmt::Display for MappingEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' => '{}'", self.from, self.to)
    }
}

/// An ordered, immutable table of entries.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
}

impl MappingTable {
    pub fn new(entries: Vec<MappingEntry>) -> Self {
        Self { entries }
    }

    /// Source paths on the `from` side, packaged paths on the `to` side.
    pub fn source_to_packaged(rules: &[PathRule]) -> Self {
        Self::new(
            rules
                .iter()
                .map(|r| MappingEntry::new(r.source, r.packaged))
                .collect(),
        )
    }

    /// The reverse of [`MappingTable::source_to_packaged`] in the same order,
    /// followed by an entry that strips `packaged_only_root`.
    pub fn packaged_to_source(rules: &[PathRule], packaged_only_root: &str) -> Self {
        let mut entries: Vec<MappingEntry> = rules
            .iter()
            .map(|r| MappingEntry::new(r.packaged, r.source))
            .collect();
        entries.push(MappingEntry::new(packaged_only_root, ""));
        Self::new(entries)
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// First entry whose `from` is a prefix of `remainder`.
    pub fn first_match(&self, remainder: &str) -> Option<(&MappingEntry, usize)> {
        self.entries
            .iter()
            .find_map(|entry| entry.match_len(remainder).map(|len| (entry, len)))
    }

    /// Replacement text for the first matching entry, or `None` if no entry applies.
    pub fn resolve(&self, remainder: &str) -> Option<&str> {
        self.first_match(remainder).map(|(entry, _)| entry.to())
    }
}

/// Both directions of the layout mapping, built once per run.
#[derive(Debug, Clone)]
pub struct LayoutTables {
    pub source_to_packaged: MappingTable,
    pub packaged_to_source: MappingTable,
}

static BUILTIN: LazyLock<LayoutTables> =
    LazyLock::new(|| LayoutTables::from_rules(KOHA_RULES, PACKAGED_CGI_ROOT));

impl LayoutTables {
    pub fn from_rules(rules: &[PathRule], packaged_only_root: &str) -> Self {
        Self {
            source_to_packaged: MappingTable::source_to_packaged(rules),
            packaged_to_source: MappingTable::packaged_to_source(rules, packaged_only_root),
        }
    }

    /// The Koha tables.
    pub fn builtin() -> &'static LayoutTables {
        &BUILTIN
    }
}

/// Convenience wrapper over [`MappingTable::resolve`].
pub fn resolve<'t>(table: &'t MappingTable, remainder: &str) -> Option<&'t str> {
    table.resolve(remainder)
}
