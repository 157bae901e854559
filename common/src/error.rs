//! Error types for the line injector.
//!
//! Only genuine I/O failures are errors. Missing files, missing anchors and
//! no-op substitutions are soft outcomes reported through
//! [`crate::Outcome::Skipped`].

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures that prevent the injector from reading or persisting a file.
#[derive(Debug, Error)]
pub enum InjectError {
    /// The target file exists but could not be read as UTF-8 text.
    #[error("failed to read {path}")]
    Read {
        /// File that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The temporary sibling file could not be written.
    #[error("failed to write {path}")]
    Write {
        /// Temporary file that could not be written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The temporary file could not be moved over the target.
    #[error("failed to move {from} over {to}")]
    Replace {
        /// Temporary file path.
        from: Utf8PathBuf,
        /// Target file path.
        to: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`InjectError`].
pub type Result<T> = std::result::Result<T, InjectError>;
