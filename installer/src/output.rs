//! Output formatting for the `blueprint` CLI.
//!
//! Commands report what they changed with short, human-readable summaries.

use crate::init::InitReport;
use crate::plugin::{FolderStatus, PluginRegistration};
use blueprint_common::{Applied, Outcome};
use camino::Utf8Path;

/// Summarises one plugin registration.
#[must_use]
pub fn plugin_summary(registration: &PluginRegistration) -> String {
    let folder = match registration.folder {
        FolderStatus::Created => "created from the template",
        FolderStatus::Existing => "kept as it was",
    };
    let registered = match registration.registration {
        Outcome::Applied(Applied::Spliced) => "registered after the subdirectory marker",
        Outcome::Applied(Applied::Appended) => "registered at the end of CMakeLists.txt",
        Outcome::Applied(Applied::Created | Applied::Replaced) => {
            "registered in a new CMakeLists.txt"
        }
        Outcome::Skipped(_) => "not registered",
    };
    format!(
        "Plugin {}: {} ({folder}), {registered}",
        registration.name, registration.plugin_dir
    )
}

/// Format a success message after initialisation.
#[must_use]
pub fn success_message(report: &InitReport, root: &Utf8Path) -> String {
    let count = report.registrations.len();
    let plural = if count == 1 { "plugin" } else { "plugins" };
    let versions = report.definitions.target_maya_versions.join(", ");
    let versions = if versions.is_empty() {
        "no Maya versions".to_owned()
    } else {
        format!("Maya {versions}")
    };
    format!("Initialised {root} with {count} {plural} targeting {versions}")
}

/// Summarises the result of an `inject` command.
#[must_use]
pub fn inject_summary(path: &Utf8Path, outcome: Outcome) -> String {
    match outcome {
        Outcome::Applied(Applied::Spliced) => format!("Updated {path}"),
        Outcome::Applied(Applied::Appended) => {
            format!("Updated {path} (anchor missing, appended at end of file)")
        }
        Outcome::Applied(Applied::Created) => format!("Created {path}"),
        Outcome::Applied(Applied::Replaced) => format!("Rewrote {path}"),
        Outcome::Skipped(reason) => format!("{path} left unchanged: {reason}"),
    }
}
