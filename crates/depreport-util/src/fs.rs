use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::ReportError;

/// Walk up from `start` looking for a file named `filename`.
/// Returns the path to the directory containing the file, or `None`.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Ensure a directory exists, creating it and any parents if needed.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Write `contents` to `dest` atomically.
///
/// The parent directory is created if missing. Bytes go to a temporary file
/// in the same directory which is then renamed over `dest`, so readers never
/// observe a half-written file. A new file gets the usual umask-derived mode;
/// an existing one keeps its mode. Returns the absolute path written.
pub fn write_atomic(dest: &Path, contents: &[u8]) -> Result<PathBuf, ReportError> {
    let fail = |source: std::io::Error| ReportError::OutputWrite {
        path: dest.to_path_buf(),
        source,
    };

    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    ensure_dir(&parent).map_err(fail)?;

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    // Same mode as a plain `File::create`: 0o666 masked by the umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(&parent).map_err(fail)?;
    tmp.write_all(contents).map_err(fail)?;
    tmp.flush().map_err(fail)?;
    // Rewriting a report keeps whatever mode it already had.
    if let Ok(existing) = std::fs::metadata(dest) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(fail)?;
    }
    tmp.persist(dest).map_err(|e| fail(e.error))?;
    tracing::debug!("wrote {} bytes to {}", contents.len(), dest.display());

    Ok(std::fs::canonicalize(dest).unwrap_or_else(|_| dest.to_path_buf()))
}
