use crate::config::schema::{Settings, ValidationError};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "KOHA_RELAYOUT_CONFIG";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    Validation {
        path: Option<PathBuf>,
        source: ValidationError,
    },
    /// Neither an input patch nor a commit id was given.
    MissingInput,
}

impl ConfigError {
    fn with_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(path),
                source,
            },
            ConfigError::Validation { path: None, source } => ConfigError::Validation {
                path: Some(path),
                source,
            },
            other => other,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read settings from {}: {}", path.display(), source)
            }
            ConfigError::Toml { path, source } => match path {
                Some(path) => write!(
                    f,
                    "failed to parse settings TOML ({}): {}",
                    path.display(),
                    source
                ),
                None => write!(f, "failed to parse settings TOML: {}", source),
            },
            ConfigError::Validation { path, source } => match path {
                Some(path) => write!(f, "invalid settings ({}): {}", path.display(), source),
                None => write!(f, "invalid settings: {}", source),
            },
            ConfigError::MissingInput => write!(
                f,
                "an input patch (--input) or a commit id (--commit) is required"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::Validation { source, .. } => Some(source),
            ConfigError::MissingInput => None,
        }
    }
}

pub fn load_from_str(input: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    settings
        .validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    Ok(settings)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents).map_err(|error| error.with_path(path))
}

/// Locate and load the settings file.
///
/// Priority order:
/// 1. Explicit `--config` path
/// 2. `KOHA_RELAYOUT_CONFIG` environment variable
/// 3. `~/.config/koha-relayout/config.toml`, if it exists
///
/// An explicitly named file must be readable; a missing default file just
/// yields the default settings.
pub fn discover(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }

    if let Some(path) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return load_from_path(PathBuf::from(path));
    }

    if let Some(path) = default_path().filter(|p| p.is_file()) {
        tracing::debug!(path = %path.display(), "loading settings");
        return load_from_path(path);
    }

    Ok(Settings::default())
}

fn default_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".config/koha-relayout/config.toml"))
}
