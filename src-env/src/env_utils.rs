//! Environment variable utilities
//!
//! This module resolves the MIXINT_DIR variable that points to the project
//! root and the directories below it where sweep reports are written.

use crate::constants::{DATA_GENERATED, FALLBACK_OUTPUT, MIXINT_DIR, OUTPUT};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Error type for environment variable issues
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "MIXINT_DIR environment variable is not set. Please set it to the project root directory (e.g., export MIXINT_DIR=/path/to/mixint-de)"
    )]
    MixintDirNotSet,

    #[error("MIXINT_DIR points to a non-existent directory: {0}")]
    MixintDirNotFound(PathBuf),

    #[error("Failed to create directory {0}: {1}")]
    DirectoryCreationFailed(PathBuf, std::io::Error),
}

fn resolve_mixint_dir(value: Option<OsString>) -> Result<PathBuf, EnvError> {
    let path = PathBuf::from(value.ok_or(EnvError::MixintDirNotSet)?);
    if !path.exists() {
        return Err(EnvError::MixintDirNotFound(path));
    }
    Ok(path)
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, EnvError> {
    if !path.exists() {
        std::fs::create_dir_all(&path)
            .map_err(|e| EnvError::DirectoryCreationFailed(path.clone(), e))?;
    }
    Ok(path)
}

fn output_dir_below(root: &Path) -> Result<PathBuf, EnvError> {
    ensure_dir(root.join(DATA_GENERATED).join(OUTPUT))
}

/// Get the MIXINT_DIR environment variable and validate it exists
///
/// # Errors
///
/// Returns an error if:
/// - MIXINT_DIR is not set
/// - MIXINT_DIR points to a non-existent directory
pub fn get_mixint_dir() -> Result<PathBuf, EnvError> {
    resolve_mixint_dir(env::var_os(MIXINT_DIR))
}

/// Get the path to the data_generated directory, creating it if necessary
pub fn get_data_generated_dir() -> Result<PathBuf, EnvError> {
    ensure_dir(get_mixint_dir()?.join(DATA_GENERATED))
}

/// Get the directory receiving sweep reports.
///
/// Uses `$MIXINT_DIR/data_generated/output` when MIXINT_DIR is configured and
/// falls back to `./output` when it is not set. A MIXINT_DIR pointing to a
/// missing directory is still an error.
///
/// # Example
///
/// ```no_run
/// use mixint_env::get_output_dir;
///
/// let output = get_output_dir()?;
/// println!("Reports go to: {}", output.display());
/// # Ok::<(), mixint_env::EnvError>(())
/// ```
pub fn get_output_dir() -> Result<PathBuf, EnvError> {
    match resolve_mixint_dir(env::var_os(MIXINT_DIR)) {
        Ok(root) => output_dir_below(&root),
        Err(EnvError::MixintDirNotSet) => Ok(PathBuf::from(FALLBACK_OUTPUT)),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixint_dir_not_set() {
        let result = resolve_mixint_dir(None);
        assert!(matches!(result, Err(EnvError::MixintDirNotSet)));
    }

    #[test]
    fn test_mixint_dir_nonexistent() {
        let result = resolve_mixint_dir(Some(OsString::from("/this/path/should/not/exist")));
        assert!(matches!(result, Err(EnvError::MixintDirNotFound(_))));
    }

    #[test]
    fn test_output_dir_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let root = resolve_mixint_dir(Some(tmp.path().as_os_str().to_owned())).unwrap();
        let output = output_dir_below(&root).unwrap();
        assert!(output.is_dir());
        assert!(output.ends_with("data_generated/output"));
    }
}
