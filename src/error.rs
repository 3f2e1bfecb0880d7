use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the snapfilter library
#[derive(Error, Debug)]
pub enum SnapfilterError {
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Export job error: {0}")]
    Job(#[from] JobError),

    #[error("Transcode error: {0}")]
    Transcode(#[from] TranscodeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Batch-level errors: the batch could not be submitted at all
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Destination directory unavailable: {path}")]
    DestinationUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Batch runtime unavailable: {reason}")]
    RuntimeUnavailable { reason: String },
}

/// Failure of a single export job
///
/// A job failure never aborts its batch; it is counted and logged.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Could not remove existing file {path:?}")]
    ClearDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write image {path:?}")]
    WriteImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Could not copy video to {path:?}")]
    CopyVideo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoder failed: {0}")]
    Transcode(#[from] TranscodeError),

    #[error("Encoder reported success but {path:?} does not exist")]
    MissingOutput { path: PathBuf },

    #[error("Job aborted: {reason}")]
    Aborted { reason: String },
}

/// External encoder errors
#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("Encoder binary not found")]
    Unavailable,

    #[error("Failed to start encoder {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoder exited with {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using SnapfilterError
pub type Result<T> = std::result::Result<T, SnapfilterError>;

impl SnapfilterError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if resubmitting the same batch could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Export(ExportError::DestinationUnavailable { .. }) => true,
            Self::Job(JobError::ClearDestination { .. }) => true,
            Self::Transcode(TranscodeError::Spawn { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Export(ExportError::DestinationUnavailable { path, .. }) => {
                format!("Cannot save into '{}'. Please check the folder is writable.", path)
            }
            Self::Transcode(TranscodeError::Unavailable) => {
                "FFmpeg was not found; videos are saved without filters.".to_string()
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_error_is_recoverable() {
        let err: SnapfilterError = ExportError::DestinationUnavailable {
            path: "/nope".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        }
        .into();

        assert!(err.is_recoverable());
        assert!(err.user_message().contains("/nope"));
    }

    #[test]
    fn test_config_errors_are_permanent() {
        let err: SnapfilterError = ConfigError::InvalidValue {
            key: "encoder.crf".to_string(),
            value: "99".to_string(),
        }
        .into();

        assert!(!err.is_recoverable());
        assert_eq!(
            err.user_message(),
            "Configuration error: Invalid configuration value: encoder.crf = 99"
        );
    }
}
