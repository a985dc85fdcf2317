//! Centralized validation of command-line paths and identifiers.

use std::path::Path;

/// Maximum length of a run identifier (it becomes part of a file name)
pub const MAX_RUN_ID_LENGTH: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Input file not found: {0}")]
    FileNotFound(String),
    #[error("Input directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("Not a directory: {0}")]
    NotADirectory(String),
    #[error("Could not create output directory {path}: {source}")]
    CreateOutputDir {
        path: String,
        source: std::io::Error,
    },
    #[error("Empty run ID provided")]
    EmptyRunId,
    #[error("Run ID too long: exceeds {MAX_RUN_ID_LENGTH} characters")]
    RunIdTooLong,
    #[error("Invalid run ID '{0}': contains path separators or control characters")]
    InvalidRunId(String),
}

/// Check that `path` exists and is a file
///
/// # Errors
///
/// Returns `ValidationError::FileNotFound` if it does not.
pub fn validate_input_file(path: &Path) -> Result<(), ValidationError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ValidationError::FileNotFound(path.display().to_string()))
    }
}

/// Check that `path` exists and is a directory
///
/// # Errors
///
/// Returns `ValidationError::DirectoryNotFound` if it is missing or
/// `ValidationError::NotADirectory` if it is something else.
pub fn validate_input_dir(path: &Path) -> Result<(), ValidationError> {
    if !path.exists() {
        return Err(ValidationError::DirectoryNotFound(
            path.display().to_string(),
        ));
    }
    if !path.is_dir() {
        return Err(ValidationError::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Create the output directory (and parents) if it does not exist yet
///
/// # Errors
///
/// Returns `ValidationError::NotADirectory` if the path is an existing file,
/// or `ValidationError::CreateOutputDir` if creation fails.
pub fn ensure_output_dir(path: &Path) -> Result<(), ValidationError> {
    if path.exists() && !path.is_dir() {
        return Err(ValidationError::NotADirectory(path.display().to_string()));
    }
    std::fs::create_dir_all(path).map_err(|source| ValidationError::CreateOutputDir {
        path: path.display().to_string(),
        source,
    })
}

/// Check that a run ID is safe to embed in an output file name
///
/// # Errors
///
/// Returns `ValidationError::EmptyRunId`, `ValidationError::RunIdTooLong`, or
/// `ValidationError::InvalidRunId` for traversal or control characters.
pub fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::EmptyRunId);
    }
    if run_id.len() > MAX_RUN_ID_LENGTH {
        return Err(ValidationError::RunIdTooLong);
    }
    if run_id.contains("..")
        || run_id.contains('/')
        || run_id.contains('\\')
        || run_id.chars().any(char::is_control)
    {
        return Err(ValidationError::InvalidRunId(run_id.to_string()));
    }
    Ok(())
}
