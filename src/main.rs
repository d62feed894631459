use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use koha_relayout::config::{discover, CliOverrides, Mode, RunConfig};
use koha_relayout::{export_commit, write_output, OutputFormat, PatchRewriter, RewriteReport};
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "koha-relayout")]
#[command(about = "Rewrite patch paths between the Koha git and Debian package layouts", long_about = None)]
#[command(version)]
struct Cli {
    /// Patch file to rewrite
    #[arg(short, long, conflicts_with = "commit")]
    input: Option<PathBuf>,

    /// Where to write the rewritten patch (standard output if not given)
    #[arg(short, long, conflicts_with = "commit")]
    output: Option<PathBuf>,

    /// Directory for patches exported with --commit
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Export this commit with git format-patch and rewrite the export in place
    #[arg(short, long)]
    commit: Option<String>,

    /// Repository to export the commit from (current directory if not given)
    #[arg(short = 'C', long, requires = "commit")]
    repo: Option<PathBuf>,

    /// Layout to produce
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Log every detection and rewrite
    #[arg(short, long)]
    verbose: bool,

    /// Show a diff of the rewritten lines on stderr
    #[arg(long)]
    diff: bool,

    /// Settings file (defaults to $KOHA_RELAYOUT_CONFIG, then ~/.config/koha-relayout/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            input: self.input.clone(),
            output: self.output.clone(),
            output_dir: self.output_dir.clone(),
            commit: self.commit.clone(),
            repo: self.repo.clone(),
            format: self.format,
            verbose: self.verbose,
            diff: self.diff,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = discover(cli.config.as_deref())?;
    let run = RunConfig::resolve(cli.overrides(), settings)?;

    init_logging(run.verbose);

    match &run.mode {
        Mode::File { input, output } => {
            let patch = fs::read_to_string(input)
                .with_context(|| format!("failed to read patch {}", input.display()))?;
            process(&run, input, &patch, output.as_deref())
        }
        Mode::Commit {
            commit,
            output_dir,
            repo,
        } => {
            let exported = export_commit(commit, output_dir, repo.as_deref())?;
            let patch = fs::read_to_string(&exported)
                .with_context(|| format!("failed to read exported patch {}", exported.display()))?;
            process(&run, &exported, &patch, Some(&exported))?;
            println!("{}", exported.display());
            Ok(())
        }
    }
}

/// Diagnostics go to stderr so a patch written to stdout stays clean.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn process(run: &RunConfig, source: &Path, patch: &str, output: Option<&Path>) -> Result<()> {
    let rewriter = PatchRewriter::builtin(run.format);
    let result = rewriter.rewrite(patch);

    write_output(output, &result.text)?;

    if run.diff && result.changed() {
        display_diff(source, patch, &result.text);
    }
    if run.verbose || !result.report.is_clean() {
        print_summary(source, run.format, &result.report);
    }

    Ok(())
}

fn print_summary(source: &Path, format: OutputFormat, report: &RewriteReport) {
    eprintln!(
        "{} {} ({} → {})",
        "Summary:".bold(),
        source.display(),
        report.direction,
        format
    );
    eprintln!(
        "  {} lines rewritten",
        format!("{}", report.lines_rewritten).green()
    );
    eprintln!("  {} anchors matched", report.anchors_matched);
    if !report.contradictions.is_empty() {
        eprintln!(
            "  {} direction changes",
            format!("{}", report.contradictions.len()).yellow()
        );
    }
    if !report.unmapped.is_empty() {
        eprintln!(
            "  {} without mapping",
            format!("{}", report.unmapped.len()).yellow()
        );
        for unmapped in &report.unmapped {
            eprintln!(
                "    {}: {}",
                unmapped.line_number,
                unmapped.line.trim_end().dimmed()
            );
        }
    }
}

fn display_diff(file: &Path, original: &str, modified: &str) {
    eprintln!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    eprintln!("{}", format!("+++ {} (rewritten)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => eprint!("{}", format!("-{}", change).red()),
            ChangeTag::Insert => eprint!("{}", format!("+{}", change).green()),
            ChangeTag::Equal => {}
        }
    }
}
