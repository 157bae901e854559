//! Project layout and root resolution.
//!
//! Every command works against a generated project rooted at a single
//! directory. [`ProjectLayout`] names the well-known files inside it.

use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Well-known paths of a generated plugin project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: Utf8PathBuf,
}

impl ProjectLayout {
    /// Creates a layout rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Repository root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Template copied for each new plugin.
    #[must_use]
    pub fn template_dir(&self) -> Utf8PathBuf {
        self.root.join("_blueprint").join("plugin_template")
    }

    /// Directory holding one folder per plugin.
    #[must_use]
    pub fn src_dir(&self) -> Utf8PathBuf {
        self.root.join("src")
    }

    /// Top-level `CMakeLists.txt`.
    #[must_use]
    pub fn root_cmake(&self) -> Utf8PathBuf {
        self.root.join("CMakeLists.txt")
    }

    /// Persisted project definitions.
    #[must_use]
    pub fn definitions_file(&self) -> Utf8PathBuf {
        self.root.join("package").join("definitions.json")
    }

    /// Release workflow carrying the devkit markers.
    #[must_use]
    pub fn release_ci_file(&self) -> Utf8PathBuf {
        self.root.join(".github").join("workflows").join("release.yml")
    }
}

/// Returns the current working directory as a UTF-8 path.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or is not UTF-8.
pub fn current_dir_utf8() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|err| InstallerError::NonUtf8Path {
        path: err.into_path_buf().to_string_lossy().into_owned(),
    })
}

/// Resolves the project root from an optional CLI override.
///
/// # Errors
///
/// Returns an error if no override is given and the current directory cannot
/// be determined.
pub fn resolve_root(cli_root: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
    match cli_root {
        Some(root) => Ok(root.to_owned()),
        None => current_dir_utf8(),
    }
}
