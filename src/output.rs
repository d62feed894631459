use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write patch to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write patch to standard output: {0}")]
    Stdout(#[source] std::io::Error),
}

/// Write the rewritten patch to `path`, or to standard output when `None`.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<(), OutputError> {
    match path {
        Some(path) => atomic_write(path, content.as_bytes()).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(content.as_bytes())
                .and_then(|()| lock.flush())
                .map_err(OutputError::Stdout)
        }
    }
}

/// Atomic file write: tempfile + fsync + rename.
///
/// The tempfile lives in the destination directory so the rename never
/// crosses filesystems.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
