use std::path::PathBuf;
use thiserror::Error;
use tokio::task::JoinError;

/// Type alias for Result with MergerError as the error type
pub type MergerResult<T> = Result<T, MergerError>;

/// Whole-operation errors. Per-file read problems never show up here;
/// they are embedded in the merged text instead.
#[derive(Error, Debug)]
pub enum MergerError {
    /// Standard IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error handling via anyhow
    #[error("Internal error: {0}")]
    Anyhow(#[from] anyhow::Error),

    /// Configuration related errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Archive could not be expanded
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Merged document could not be persisted
    #[error("Failed to write merged output to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input selection errors (no files, both files and archive, ...)
    #[error("Input validation error: {0}")]
    InputValidation(String),

    /// Everything else that aborts a run
    #[error("Processing error: {0}")]
    Processing(String),
}

/// Errors raised while expanding a ZIP archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Cannot open archive {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create scratch directory {path}: {source}")]
    Scratch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error extracting zip file: {0}")]
    Extract(#[from] zip::result::ZipError),

    #[error("Error walking extracted files: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Specific errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Output name must not be empty")]
    EmptyOutputName,

    #[error("Output name must not start or end with whitespace, got: {0:?}")]
    OutputNameHasWhitespace(String),

    #[error("Output name must be a plain file name, got: {0}")]
    OutputNameHasPath(String),

    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("Output directory does not exist: {0}")]
    OutputDirectoryMissing(PathBuf),

    #[error("Output directory is not writable: {0}")]
    OutputDirectoryNotWritable(PathBuf),

    #[error("Invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<dialoguer::Error> for MergerError {
    fn from(err: dialoguer::Error) -> Self {
        MergerError::Processing(err.to_string())
    }
}

impl From<JoinError> for MergerError {
    fn from(err: JoinError) -> Self {
        MergerError::Processing(format!("Task join error: {}", err))
    }
}

impl From<serde_json::Error> for MergerError {
    fn from(err: serde_json::Error) -> Self {
        MergerError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<ctrlc::Error> for MergerError {
    fn from(err: ctrlc::Error) -> Self {
        MergerError::Processing(format!("Ctrl+C handler error: {}", err))
    }
}

impl From<log::SetLoggerError> for MergerError {
    fn from(err: log::SetLoggerError) -> Self {
        MergerError::Processing(format!("Logger already initialized: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_error_names_path() {
        let err = MergerError::Output {
            path: PathBuf::from("/nope/merged.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("/nope/merged.txt"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_archive_error_converts() {
        let err: MergerError = ArchiveError::Extract(zip::result::ZipError::InvalidArchive(
            "bad header".into(),
        ))
        .into();
        assert!(matches!(err, MergerError::Archive(_)));
        assert!(err.to_string().contains("Error extracting zip file"));
    }
}
