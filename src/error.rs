//! Error taxonomy for a single image conversion

use image::error::UnsupportedErrorKind;
use image::ImageError;
use std::io;
use std::path::PathBuf;

/// Every way a conversion can fail. The display text is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Error: Input file not found at '{}'.", .path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error: Cannot identify image file. It may be corrupt or an unsupported format.")]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("Error: Unsupported output format '{format}'.")]
    UnsupportedOutputFormat { format: String },

    #[error("Error: Failed to save the image. Reason: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("An unexpected error occurred during conversion: {detail}")]
    Unclassified { detail: String },
}

impl ConversionError {
    pub fn missing_input(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::MissingInput {
            path: path.into(),
            source,
        }
    }

    pub fn unreadable_input(path: impl Into<PathBuf>, source: ImageError) -> Self {
        Self::UnreadableInput {
            path: path.into(),
            source,
        }
    }

    pub fn unsupported_format(format: &str) -> Self {
        Self::UnsupportedOutputFormat {
            format: format.to_string(),
        }
    }

    pub fn write_failure(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }

    pub fn unclassified(detail: impl ToString) -> Self {
        Self::Unclassified {
            detail: detail.to_string(),
        }
    }

    /// Classify an error returned by an encoder for `format`.
    ///
    /// Only a rejected format counts as unsupported; an encoder that exists but refuses
    /// the pixel layout is an unexpected failure.
    pub fn from_encode(format: &str, path: impl Into<PathBuf>, error: ImageError) -> Self {
        match error {
            ImageError::Unsupported(e) if matches!(e.kind(), UnsupportedErrorKind::Format(_)) => {
                Self::unsupported_format(format)
            }
            ImageError::IoError(source) => Self::write_failure(path, source),
            other => Self::unclassified(other),
        }
    }
}
