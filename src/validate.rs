//! Destination directory validation for enqueue.
//!
//! Runs before any store mutation: an invalid destination rejects the whole
//! enqueue command rather than leaving a half-inserted batch.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Reasons a destination directory is rejected.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The path does not exist.
    #[error("destination {path} does not exist")]
    Missing {
        /// Path as given by the caller.
        path: String,
    },

    /// The path exists but is not a directory.
    #[error("destination {path} is not a directory")]
    NotADirectory {
        /// Path as given by the caller.
        path: String,
    },

    /// The path could not be resolved to an absolute path.
    #[error("failed to resolve destination {path}: {source}")]
    Resolve {
        /// Path as given by the caller.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// A write probe into the directory failed.
    #[error("destination {path} is not writable: {source}")]
    NotWritable {
        /// Resolved directory path.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}

/// Checks that `path` is an existing, writable directory and resolves it to
/// an absolute path.
///
/// Writability is probed by creating (and immediately removing) a temporary
/// file inside the directory, since permission bits alone don't answer the
/// question portably.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the failed check.
pub fn resolve_destdir(path: &Path) -> Result<PathBuf, ValidationError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(ValidationError::Missing { path: display });
    }
    if !path.is_dir() {
        return Err(ValidationError::NotADirectory { path: display });
    }

    let resolved = path
        .canonicalize()
        .map_err(|source| ValidationError::Resolve {
            path: display,
            source,
        })?;

    tempfile::NamedTempFile::new_in(&resolved).map_err(|source| ValidationError::NotWritable {
        path: resolved.display().to_string(),
        source,
    })?;

    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_writable_directory_resolves_to_absolute() {
        let temp_dir = tempfile::tempdir().unwrap();

        let resolved = resolve_destdir(temp_dir.path()).unwrap();

        assert!(resolved.is_absolute());
        assert_eq!(resolved, temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_relative_dot_resolves_to_current_directory() {
        let resolved = resolve_destdir(Path::new(".")).unwrap();
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = resolve_destdir(&missing);

        assert!(matches!(result, Err(ValidationError::Missing { .. })));
    }

    #[test]
    fn test_file_path_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("a-file");
        std::fs::write(&file_path, b"x").unwrap();

        let result = resolve_destdir(&file_path);

        assert!(matches!(result, Err(ValidationError::NotADirectory { .. })));
    }
}
