//! Post-generation project initialisation.
//!
//! Runs once after a project has been generated from the template: registers
//! the requested plugins, writes `package/definitions.json` for the requested
//! Maya versions, and fills the release workflow's devkit matrix.

use crate::definitions::{Definitions, ProjectInfo};
use crate::error::Result;
use crate::plugin::{PluginName, PluginRegistration, add_plugin};
use crate::release_ci::inject_release_ci;
use crate::workspace::ProjectLayout;
use log::{info, warn};

/// Inputs to [`initialise_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    /// Project identity.
    pub project: ProjectInfo,
    /// Plugins to register, in order.
    pub plugins: Vec<PluginName>,
    /// Requested Maya versions, in order.
    pub maya_versions: Vec<String>,
}

/// What [`initialise_project`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// One entry per registered plugin.
    pub registrations: Vec<PluginRegistration>,
    /// The definitions that were saved.
    pub definitions: Definitions,
    /// Requested versions missing from the devkit catalogue.
    pub skipped_versions: Vec<String>,
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
///
/// # Examples
///
/// ```
/// use blueprint_installer::init::split_list;
///
/// assert_eq!(split_list(" a, b ,,c "), ["a", "b", "c"]);
/// assert!(split_list("").is_empty());
/// ```
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parses a comma-separated plugin list into validated names.
///
/// # Errors
///
/// Returns an error for the first invalid name.
pub fn parse_plugin_list(raw: &str) -> Result<Vec<PluginName>> {
    split_list(raw)
        .iter()
        .map(|name| PluginName::parse(name))
        .collect()
}

/// Initialises the project at `layout`.
///
/// # Errors
///
/// Returns an error if a plugin cannot be registered, the definitions cannot
/// be saved, or the release workflow lacks its devkit markers.
pub fn initialise_project(layout: &ProjectLayout, request: &InitRequest) -> Result<InitReport> {
    let registrations = request
        .plugins
        .iter()
        .map(|name| {
            add_plugin(
                name,
                &layout.root_cmake(),
                &layout.template_dir(),
                &layout.src_dir(),
            )
        })
        .collect::<Result<Vec<_>>>()?;

    let selection = Definitions::from_catalogue(&request.project, &request.maya_versions);
    for version in &selection.skipped {
        warn!("Maya version {version} is not in the devkit catalogue and will be skipped.");
    }

    let definitions_file = layout.definitions_file();
    selection.definitions.save(&definitions_file)?;
    info!("Saved project definitions to {definitions_file}.");

    inject_release_ci(&layout.release_ci_file(), &selection.definitions)?;

    Ok(InitReport {
        registrations,
        definitions: selection.definitions,
        skipped_versions: selection.skipped,
    })
}
