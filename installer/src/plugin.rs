//! Plugin registration.
//!
//! Adding a plugin copies the plugin template into `src/<name>`, stamps the
//! plugin name into the copied `CMakeLists.txt`, and registers the new
//! subdirectory in the root `CMakeLists.txt` after the
//! `# Plugin Subdirectories` marker.

use crate::error::{InstallerError, Result};
use blueprint_common::{Injector, MatchMode, Outcome};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Placeholder replaced by the plugin name in the template's build file.
pub const PLUGIN_NAME_PLACEHOLDER: &str = "--BLUEPRINT--PLUGIN_NAME--";

/// Marker line in the root build file after which plugins are registered.
pub const SUBDIRECTORY_MARKER: &str = "# Plugin Subdirectories";

const MAX_TEMPLATE_DEPTH: usize = 32;

/// A validated plugin name.
///
/// Plugin names become directory names and CMake target names, so only ASCII
/// letters, digits, `_` and `-` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginName(String);

impl PluginName {
    /// Validates `name` as a plugin name.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::InvalidPluginName`] when `name` is empty or
    /// contains other characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use blueprint_installer::plugin::PluginName;
    ///
    /// assert!(PluginName::parse("hello_node").is_ok());
    /// assert!(PluginName::parse("../escape").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(InstallerError::InvalidPluginName {
                name: name.to_owned(),
                reason: "the name is empty",
            });
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(InstallerError::InvalidPluginName {
                name: name.to_owned(),
                reason: "only ASCII letters, digits, `_` and `-` are allowed",
            });
        }
        Ok(Self(name.to_owned()))
    }

    /// Get the plugin name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the line registering this plugin in the root build file.
    #[must_use]
    pub fn subdirectory_line(&self) -> String {
        format!("add_subdirectory(src/{})\n", self.0)
    }
}

impl AsRef<str> for PluginName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What happened to the plugin folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderStatus {
    /// The template was copied into a new folder.
    Created,
    /// The folder already existed and was left untouched.
    Existing,
}

/// Result of [`add_plugin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRegistration {
    /// The registered plugin.
    pub name: PluginName,
    /// Location of the plugin sources.
    pub plugin_dir: Utf8PathBuf,
    /// Whether the plugin folder was created.
    pub folder: FolderStatus,
    /// Outcome of the root build file injection.
    pub registration: Outcome,
}

/// Adds `name` to the project.
///
/// An existing `src_dir/<name>` folder is left as it is. The registration line
/// is injected in `Contains` mode with `force` enabled, so a root build file
/// lacking the marker gets the line appended at the end.
///
/// # Errors
///
/// Returns an error if the template is missing, the copy fails, or a build
/// file cannot be read or written.
pub fn add_plugin(
    name: &PluginName,
    root_cmake: &Utf8Path,
    template_dir: &Utf8Path,
    src_dir: &Utf8Path,
) -> Result<PluginRegistration> {
    info!("Adding plugin {name} to the project...");
    let plugin_dir = src_dir.join(name.as_str());

    let folder = if plugin_dir.exists() {
        info!("{plugin_dir} already exists, keeping its contents.");
        FolderStatus::Existing
    } else {
        create_from_template(name, template_dir, &plugin_dir)?;
        FolderStatus::Created
    };

    let mut injector = Injector::open(root_cmake)?;
    injector.set_match_mode(MatchMode::Contains);
    let registration = injector.inject_after(vec![name.subdirectory_line()], SUBDIRECTORY_MARKER)?;
    debug!("registration of {name} in {root_cmake}: {registration:?}");

    Ok(PluginRegistration {
        name: name.clone(),
        plugin_dir,
        folder,
        registration,
    })
}

fn create_from_template(
    name: &PluginName,
    template_dir: &Utf8Path,
    plugin_dir: &Utf8Path,
) -> Result<()> {
    if !template_dir.is_dir() {
        return Err(InstallerError::TemplateNotFound {
            path: template_dir.to_owned(),
        });
    }

    copy_tree(
        template_dir.as_std_path(),
        plugin_dir.as_std_path(),
        MAX_TEMPLATE_DEPTH,
    )
    .map_err(|source| InstallerError::CopyTemplate {
        from: template_dir.to_owned(),
        to: plugin_dir.to_owned(),
        source,
    })?;
    info!("Created {plugin_dir} from the plugin template.");

    let plugin_cmake = plugin_dir.join("CMakeLists.txt");
    if !plugin_cmake.is_file() {
        info!("{plugin_cmake} does not exist, skipping plugin name replacement.");
        return Ok(());
    }

    let mut injector = Injector::open(plugin_cmake)?;
    // A template without the placeholder is valid; the injector warns on skip.
    let stamped = injector.replace_string(name.as_str(), PLUGIN_NAME_PLACEHOLDER)?;
    debug!("plugin name placeholder in {}: {stamped:?}", injector.path());
    Ok(())
}

fn copy_tree(source: &Path, destination: &Path, remaining_depth: usize) -> io::Result<()> {
    if remaining_depth == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "template nesting exceeds {MAX_TEMPLATE_DEPTH} levels at `{}`",
                source.display()
            ),
        ));
    }

    fs::create_dir_all(destination)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let entry_path = entry.path();
        let file_type = entry_path.symlink_metadata()?.file_type();
        if file_type.is_symlink() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "refusing to follow symlink `{}` in the plugin template",
                    entry_path.display()
                ),
            ));
        }

        let target = destination.join(entry.file_name());
        if file_type.is_dir() {
            copy_tree(&entry_path, &target, remaining_depth - 1)?;
        } else {
            fs::copy(&entry_path, target)?;
        }
    }
    Ok(())
}
