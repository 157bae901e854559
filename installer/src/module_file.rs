//! Maya module descriptor (`.mod`) generation.
//!
//! A release module points Maya at the packaged `plugins/<platform>-<version>`
//! folders shipped next to it. A development module points at the repository
//! itself so locally built plugins and scripts load without packaging.

use crate::definitions::Definitions;
use crate::dirs::BaseDirs;
use crate::error::{InstallerError, Result};
use crate::platform::Platform;
use blueprint_common::Document;
use camino::{Utf8Path, Utf8PathBuf};

/// Name of the file holding the project version at the repository root.
pub const VERSION_FILE: &str = "VERSION";

fn module_header(
    definitions: &Definitions,
    maya: &str,
    platform: Platform,
    version: &str,
    path: &str,
) -> String {
    format!(
        "+ MAYAVERSION:{maya} PLATFORM:{code} {slug} {version} {path}\n",
        code = platform.module_code(),
        slug = definitions.project_slug,
    )
}

/// Renders the release module for every platform and target Maya version.
///
/// # Examples
///
/// ```
/// use blueprint_installer::definitions::Definitions;
/// use blueprint_installer::module_file::release_module;
///
/// let definitions = Definitions {
///     project_slug: "hello".to_owned(),
///     target_maya_versions: vec!["2025".to_owned()],
///     ..Definitions::default()
/// };
/// let text = release_module(&definitions, "1.2.0");
/// assert!(text.starts_with("+ MAYAVERSION:2025 PLATFORM:win64 hello 1.2.0 hello\n"));
/// ```
#[must_use]
pub fn release_module(definitions: &Definitions, version: &str) -> String {
    let mut text = String::new();
    for platform in Platform::ALL {
        for maya in &definitions.target_maya_versions {
            text.push_str(&module_header(
                definitions,
                maya,
                platform,
                version,
                &definitions.project_slug,
            ));
            text.push_str(&format!("MAYA_PLUG_IN_PATH +:= plugins\\{platform}-{maya}\n"));
            text.push('\n');
        }
    }
    text
}

/// Renders the development module rooted at `repo_root`.
///
/// The root is written with forward slashes on every platform.
#[must_use]
pub fn dev_module(definitions: &Definitions, version: &str, repo_root: &Utf8Path) -> String {
    let root = repo_root.as_str().replace('\\', "/");
    let mut text = String::new();
    for platform in Platform::ALL {
        for maya in &definitions.target_maya_versions {
            text.push_str(&module_header(definitions, maya, platform, version, &root));
            text.push_str(&format!(
                "MAYA_PLUG_IN_PATH +:= _dev_deploy/plugins/{platform}-{maya}\n"
            ));
            text.push_str("PYTHONPATH +:= src/scripts\n");
            text.push('\n');
        }
    }
    text
}

/// Tells a developer where builds for `platform` must land for the
/// development module to find them.
///
/// Returns `None` when no Maya version is targeted.
///
/// # Examples
///
/// ```
/// use blueprint_installer::definitions::Definitions;
/// use blueprint_installer::module_file::dev_deploy_hint;
/// use blueprint_installer::platform::Platform;
///
/// let definitions = Definitions {
///     target_maya_versions: vec!["2025".to_owned()],
///     ..Definitions::default()
/// };
/// assert_eq!(
///     dev_deploy_hint(&definitions, Platform::Linux).as_deref(),
///     Some("Maya loads .so plugins from _dev_deploy/plugins/linux-2025")
/// );
/// ```
#[must_use]
pub fn dev_deploy_hint(definitions: &Definitions, platform: Platform) -> Option<String> {
    if definitions.target_maya_versions.is_empty() {
        return None;
    }
    let folders: Vec<String> = definitions
        .target_maya_versions
        .iter()
        .map(|maya| format!("_dev_deploy/plugins/{platform}-{maya}"))
        .collect();
    Some(format!(
        "Maya loads {} plugins from {}",
        platform.plugin_extension(),
        folders.join(", ")
    ))
}

/// Reads the project version from `<repo_root>/VERSION`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds only whitespace.
pub fn read_project_version(repo_root: &Utf8Path) -> Result<String> {
    let path = repo_root.join(VERSION_FILE);
    let text = std::fs::read_to_string(&path).map_err(|source| InstallerError::VersionFile {
        path: path.clone(),
        source,
    })?;
    let version = text.trim();
    if version.is_empty() {
        return Err(InstallerError::EmptyVersion { path });
    }
    Ok(version.to_owned())
}

/// Returns the release module location, `<repo_root>/release/modules/<slug>.mod`.
#[must_use]
pub fn release_module_path(repo_root: &Utf8Path, slug: &str) -> Utf8PathBuf {
    repo_root
        .join("release")
        .join("modules")
        .join(format!("{slug}.mod"))
}

/// Returns the per-user development module location,
/// `~/Documents/maya/modules/<slug>_dev.mod`.
///
/// # Errors
///
/// Returns an error if the home directory is unknown or not UTF-8.
pub fn default_dev_module_path(dirs: &dyn BaseDirs, slug: &str) -> Result<Utf8PathBuf> {
    let modules = dirs
        .maya_modules_dir()
        .ok_or(InstallerError::HomeDirectory)?;
    let modules = Utf8PathBuf::try_from(modules).map_err(|err| InstallerError::NonUtf8Path {
        path: err.into_path_buf().to_string_lossy().into_owned(),
    })?;
    Ok(modules.join(format!("{slug}_dev.mod")))
}

/// Writes `content` to `path`, creating parent directories first.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the write fails.
pub fn write_module(path: &Utf8Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Document::parse(content).write_atomic(path)?;
    Ok(())
}
