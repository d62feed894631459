//! Merge command-line flags with the settings file into one run.

use crate::config::loader::ConfigError;
use crate::config::schema::Settings;
use crate::translate::OutputFormat;
use std::path::PathBuf;

/// Values given on the command line; `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub commit: Option<String>,
    pub repo: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub verbose: bool,
    pub diff: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Rewrite `input`, writing to `output` or standard output.
    File {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    /// Export `commit` into `output_dir`, then rewrite the export in place.
    Commit {
        commit: String,
        output_dir: PathBuf,
        repo: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: Mode,
    pub format: OutputFormat,
    pub verbose: bool,
    pub diff: bool,
}

impl RunConfig {
    /// Command-line values win over settings, settings over defaults.
    pub fn resolve(cli: CliOverrides, settings: Settings) -> Result<Self, ConfigError> {
        let mode = match (cli.commit, cli.input) {
            (Some(commit), _) => Mode::Commit {
                commit,
                output_dir: cli
                    .output_dir
                    .or(settings.output_dir)
                    .unwrap_or_else(|| PathBuf::from(".")),
                repo: cli.repo,
            },
            (None, Some(input)) => Mode::File {
                input,
                output: cli.output,
            },
            (None, None) => return Err(ConfigError::MissingInput),
        };

        Ok(Self {
            mode,
            format: cli.format.or(settings.format).unwrap_or_default(),
            verbose: cli.verbose || settings.verbose,
            diff: cli.diff || settings.diff,
        })
    }
}
