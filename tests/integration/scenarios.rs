//! Worked examples of detection and translation over real-looking patches.

use koha_relayout::{
    detect, find_anchors, rewrite_patch, translate, AnchorPattern, Direction, LayoutTables,
    OutputFormat, PatchRewriter, RewriteReport, Translation,
};

fn tables() -> &'static LayoutTables {
    LayoutTables::builtin()
}

/// Run detection then translation for every anchor on `line`.
fn step(format: OutputFormat, direction: &mut Direction, line: &str) -> (String, RewriteReport) {
    let mut line = line.to_string();
    let mut report = RewriteReport::default();
    PatchRewriter::new(tables(), format).rewrite_line(direction, &mut line, 1, &mut report);
    (line, report)
}

#[test]
fn test_source_minus_header_to_deb() {
    let mut direction = Direction::Undetermined;
    let (line, report) = step(OutputFormat::Deb, &mut direction, "--- a/C4/Auth.pm\n");
    assert_eq!(direction, Direction::SourceToPackaged);
    assert_eq!(line, "--- a/lib/C4/Auth.pm\n");
    assert!(report.is_clean());
}

#[test]
fn test_packaged_plus_header_forces_direction() {
    let mut direction = Direction::SourceToPackaged;
    let (line, report) = step(OutputFormat::Deb, &mut direction, "+++ b/lib/C4/Auth.pm\n");
    assert_eq!(direction, Direction::PackagedToSource);
    assert_eq!(line, "+++ b/lib/C4/Auth.pm\n");
    assert_eq!(report.contradictions.len(), 1);
    assert_eq!(report.contradictions[0].contradiction.rule, "'lib/C4/' => 'C4/'");
}

#[test]
fn test_api_paths_are_identity() {
    let input = "diff --git a/api/v1/app.pl b/api/v1/app.pl\n";
    for format in [OutputFormat::Deb, OutputFormat::Git] {
        let mut direction = Direction::Undetermined;
        let (line, report) = step(format, &mut direction, input);
        assert_eq!(direction, Direction::Identity);
        assert_eq!(line, input);
        assert_eq!(report.anchors_matched, 2);
        assert!(report.is_clean());
    }
}

#[test]
fn test_source_path_under_packaged_direction_is_unmapped() {
    let mut direction = Direction::PackagedToSource;
    let (line, report) = step(
        OutputFormat::Git,
        &mut direction,
        " create mode 100644 misc/cronjobs/foo.pl\n",
    );
    assert_eq!(line, " create mode 100644 misc/cronjobs/foo.pl\n");
    assert_eq!(direction, Direction::PackagedToSource);
    assert_eq!(report.unmapped.len(), 1);
    assert_eq!(report.unmapped[0].anchor, AnchorPattern::CreateMode);
}

#[test]
fn test_git_format_reports_source_path_as_unmapped() {
    let mut direction = Direction::SourceToPackaged;
    let (line, report) = step(
        OutputFormat::Git,
        &mut direction,
        " create mode 100644 misc/cronjobs/foo.pl\n",
    );
    assert_eq!(line, " create mode 100644 misc/cronjobs/foo.pl\n");
    assert_eq!(direction, Direction::SourceToPackaged);
    assert_eq!(report.unmapped.len(), 1);
    assert_eq!(report.unmapped[0].anchor, AnchorPattern::CreateMode);
    assert!(report.contradictions.is_empty());
}

#[test]
fn test_translate_reports_table_mismatch() {
    let line = "+++ b/C4/Auth.pm\n";
    let anchor = find_anchors(line)[0];
    let mut direction = Direction::PackagedToSource;
    detect(tables(), &mut direction, &line[anchor.position..]);
    let mut text = line.to_string();
    let outcome = translate(
        tables(),
        OutputFormat::Git,
        direction,
        &mut text,
        anchor.position,
    );
    assert_eq!(outcome, Translation::Unmapped);
    assert_eq!(text, line);
}

#[test]
fn test_identity_then_real_path_overrides() {
    let input = "\
diff --git a/api/v1/app.pl b/api/v1/app.pl
--- a/api/v1/app.pl
+++ b/api/v1/app.pl
diff --git a/Koha/Patron.pm b/Koha/Patron.pm
--- a/Koha/Patron.pm
+++ b/Koha/Patron.pm
";
    let out = rewrite_patch(input, OutputFormat::Deb);
    assert_eq!(out.report.direction, Direction::SourceToPackaged);
    assert!(out.report.contradictions.is_empty());
    assert_eq!(
        out.text,
        "\
diff --git a/api/v1/app.pl b/api/v1/app.pl
--- a/api/v1/app.pl
+++ b/api/v1/app.pl
diff --git a/lib/Koha/Patron.pm b/lib/Koha/Patron.pm
--- a/lib/Koha/Patron.pm
+++ b/lib/Koha/Patron.pm
"
    );
}

#[test]
fn test_identity_after_real_direction_keeps_it() {
    let input = "--- a/lib/C4/Auth.pm\n--- a/api/v1/app.pl\n+++ b/opac/cgi-bin/opac/opac-main.pl\n";
    let out = rewrite_patch(input, OutputFormat::Git);
    assert_eq!(out.report.direction, Direction::PackagedToSource);
    assert_eq!(
        out.text,
        "--- a/C4/Auth.pm\n--- a/api/v1/app.pl\n+++ b/opac/opac-main.pl\n"
    );
    assert!(out.report.is_clean());
}

#[test]
fn test_full_format_patch_to_deb_and_back() {
    let source = "\
From 5d1b3c2 Mon Sep 17 00:00:00 2001
From: Jane Librarian <jane@example.org>
Subject: [PATCH] Bug 12345: Show holds on the detail page

---
 catalogue/detail.pl                                      | 3 ++-
 koha-tmpl/intranet-tmpl/prog/en/modules/catalogue/detail.tt | 1 +
 create mode 100644 koha-tmpl/opac-tmpl/bootstrap/js/holds.js

diff --git a/catalogue/detail.pl b/catalogue/detail.pl
index 1111111..2222222 100755
--- a/catalogue/detail.pl
+++ b/catalogue/detail.pl
@@ -10,7 +10,8 @@ use C4::Auth;
-my $holds = 0;
+my $holds = 1;
diff --git a/koha-tmpl/intranet-tmpl/prog/en/modules/catalogue/detail.tt b/koha-tmpl/intranet-tmpl/prog/en/modules/catalogue/detail.tt
--- a/koha-tmpl/intranet-tmpl/prog/en/modules/catalogue/detail.tt
+++ b/koha-tmpl/intranet-tmpl/prog/en/modules/catalogue/detail.tt
@@ -1 +1,2 @@
+[% holds %]
diff --git a/koha-tmpl/opac-tmpl/bootstrap/js/holds.js b/koha-tmpl/opac-tmpl/bootstrap/js/holds.js
new file mode 100644
--- /dev/null
+++ b/koha-tmpl/opac-tmpl/bootstrap/js/holds.js
@@ -0,0 +1 @@
+// holds
-- 
2.39.2
";
    let deb = rewrite_patch(source, OutputFormat::Deb);
    assert!(deb.text.contains("--- a/intranet/cgi-bin/catalogue/detail.pl\n"));
    assert!(deb
        .text
        .contains("+++ b/intranet/htdocs/intranet-tmpl/prog/en/modules/catalogue/detail.tt\n"));
    assert!(deb
        .text
        .contains(" create mode 100644 opac/htdocs/opac-tmpl/bootstrap/js/holds.js\n"));
    assert!(deb.text.contains("--- /dev/null\n"));
    assert!(deb.report.is_clean());
    assert_eq!(deb.report.direction, Direction::SourceToPackaged);

    let git = rewrite_patch(&deb.text, OutputFormat::Git);
    assert_eq!(git.text, source);
    assert!(git.report.is_clean());
}

#[test]
fn test_packaged_only_cgi_path_to_git() {
    let input = "\
diff --git a/intranet/cgi-bin/virtualshelves/shelves.pl b/intranet/cgi-bin/virtualshelves/shelves.pl
--- a/intranet/cgi-bin/virtualshelves/shelves.pl
+++ b/intranet/cgi-bin/virtualshelves/shelves.pl
";
    let out = rewrite_patch(input, OutputFormat::Git);
    assert_eq!(
        out.text,
        "\
diff --git a/virtualshelves/shelves.pl b/virtualshelves/shelves.pl
--- a/virtualshelves/shelves.pl
+++ b/virtualshelves/shelves.pl
"
    );
}
