//! Error types for the Blueprint scaffolding CLI.
//!
//! This module defines semantic error variants that tell users which file or
//! template step failed and, where it helps, how to recover.

use blueprint_common::{InjectError, SkipReason};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while scaffolding a project.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// A plugin name is empty or contains characters CMake targets reject.
    #[error("invalid plugin name {name:?}: {reason}")]
    InvalidPluginName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// The plugin template directory does not exist.
    #[error("plugin template not found at {path}")]
    TemplateNotFound {
        /// Expected template location.
        path: Utf8PathBuf,
    },

    /// Copying the plugin template failed.
    #[error("failed to copy template {from} to {to}")]
    CopyTemplate {
        /// Template directory.
        from: Utf8PathBuf,
        /// Destination directory.
        to: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The line injector could not read or write a file.
    #[error(transparent)]
    Inject(#[from] InjectError),

    /// A CI marker pair was missing or out of order.
    #[error(
        "could not inject {category} devkits into {path}: {reason}; \
         add `{category} DEVKITS[START]` and `{category} DEVKITS[END]` marker lines"
    )]
    CiMarkers {
        /// CI workflow file.
        path: Utf8PathBuf,
        /// Marker category, for example `WINDOWS`.
        category: &'static str,
        /// Why the injection was skipped.
        reason: SkipReason,
    },

    /// An `inject` command left the file untouched.
    #[error("{path} left unchanged: {reason}")]
    InjectionSkipped {
        /// Target file.
        path: Utf8PathBuf,
        /// Why the injection was skipped.
        reason: SkipReason,
    },

    /// The definitions file could not be read.
    #[error("failed to read definitions {path}; run `blueprint init` first")]
    ReadDefinitions {
        /// Definitions file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The definitions file is not valid JSON for the expected schema.
    #[error("invalid definitions {path}")]
    ParseDefinitions {
        /// Definitions file path.
        path: Utf8PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The definitions could not be serialised.
    #[error("failed to serialise definitions")]
    SerializeDefinitions {
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },

    /// The project `VERSION` file could not be read.
    #[error("failed to read project version from {path}")]
    VersionFile {
        /// `VERSION` file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The project `VERSION` file is empty.
    #[error("project version file {path} is empty")]
    EmptyVersion {
        /// `VERSION` file path.
        path: Utf8PathBuf,
    },

    /// The user's home directory could not be determined.
    #[error("could not determine the home directory; pass --output explicitly")]
    HomeDirectory,

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the offending path.
        path: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write command output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;
