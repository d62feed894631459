//! Export a single commit as a patch file with `git format-patch`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("commit id must not be empty")]
    EmptyCommit,

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("git format-patch failed for {commit} ({status}): {stderr}")]
    Failed {
        commit: String,
        status: String,
        stderr: String,
    },

    #[error("git format-patch produced no patch for {commit}")]
    NoPatch { commit: String },
}

/// Arguments passed to git for exporting `commit` into `out_dir`.
pub fn format_patch_args(commit: &str, out_dir: &Path, repo: Option<&Path>) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(repo) = repo {
        args.push("-C".to_string());
        args.push(repo.display().to_string());
    }
    args.extend([
        "format-patch".to_string(),
        "-1".to_string(),
        commit.to_string(),
        "--output-directory".to_string(),
        out_dir.display().to_string(),
    ]);
    args
}

/// Export `commit` into `out_dir` and return the path of the patch file.
///
/// `out_dir` is created if missing. When `repo` is given, git runs against
/// that repository instead of the current directory.
pub fn export_commit(
    commit: &str,
    out_dir: &Path,
    repo: Option<&Path>,
) -> Result<PathBuf, ExportError> {
    let commit = commit.trim();
    if commit.is_empty() {
        return Err(ExportError::EmptyCommit);
    }

    fs::create_dir_all(out_dir).map_err(|source| ExportError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    // git resolves a relative --output-directory against -C, so pin it first.
    let out_dir = out_dir
        .canonicalize()
        .map_err(|source| ExportError::CreateDir {
            path: out_dir.to_path_buf(),
            source,
        })?;

    let output = Command::new("git")
        .args(format_patch_args(commit, &out_dir, repo))
        .output()
        .map_err(ExportError::Spawn)?;

    if !output.status.success() {
        return Err(ExportError::Failed {
            commit: commit.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let produced = stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| ExportError::NoPatch {
            commit: commit.to_string(),
        })?;

    let path = PathBuf::from(produced);
    let path = if path.is_absolute() {
        path
    } else {
        out_dir.join(path)
    };
    tracing::debug!(commit, path = %path.display(), "exported commit");
    Ok(path)
}
