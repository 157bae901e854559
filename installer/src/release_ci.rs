//! Devkit matrix templating for the release CI workflow.
//!
//! The release workflow carries marker comments such as
//! `# WINDOWS DEVKITS[START]` and `# WINDOWS DEVKITS[END]` around its build
//! matrix entries. Everything between a marker pair is regenerated from the
//! project definitions, so re-running the injection is safe.

use crate::definitions::{Definitions, DevkitMap};
use crate::error::{InstallerError, Result};
use crate::platform::Platform;
use blueprint_common::{Injector, MatchMode, Outcome, SkipReason};
use camino::Utf8Path;
use log::{info, warn};

/// A matrix section of the workflow fed by one platform's devkits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CiSection {
    /// Marker category, for example `LINUX GCC9`.
    pub category: &'static str,
    /// Platform whose devkits fill the section.
    pub platform: Platform,
}

impl CiSection {
    /// Returns the start marker anchor, matched with `Contains`.
    #[must_use]
    pub fn start_marker(&self) -> String {
        format!("{} DEVKITS[START]\n", self.category)
    }

    /// Returns the end marker anchor, matched with `Contains`.
    #[must_use]
    pub fn end_marker(&self) -> String {
        format!("{} DEVKITS[END]\n", self.category)
    }
}

/// Matrix sections of the release workflow, in injection order.
pub const CI_SECTIONS: [CiSection; 3] = [
    CiSection {
        category: "WINDOWS",
        platform: Platform::Windows,
    },
    CiSection {
        category: "LINUX",
        platform: Platform::Linux,
    },
    CiSection {
        category: "LINUX GCC9",
        platform: Platform::Linux,
    },
];

/// Renders the matrix entries for `devkits`, two lines per version in
/// definition order.
///
/// # Examples
///
/// ```
/// use blueprint_installer::definitions::DevkitMap;
/// use blueprint_installer::release_ci::devkit_block;
///
/// let devkits: DevkitMap = [("2024", "http://x")].into_iter().collect();
/// assert_eq!(
///     devkit_block(&devkits),
///     [
///         "          - maya: \"2024\"\n",
///         "            devkit: \"http://x\"\n",
///     ]
/// );
/// ```
#[must_use]
pub fn devkit_block(devkits: &DevkitMap) -> Vec<String> {
    devkits
        .iter()
        .flat_map(|(version, url)| {
            [
                format!("          - maya: \"{version}\"\n"),
                format!("            devkit: \"{url}\"\n"),
            ]
        })
        .collect()
}

fn section_injector(ci_file: &Utf8Path) -> Result<Injector> {
    let mut injector = Injector::open(ci_file)?;
    injector.set_match_mode(MatchMode::Contains);
    injector.set_force(false);
    Ok(injector)
}

fn markers_error(ci_file: &Utf8Path, section: CiSection, reason: SkipReason) -> InstallerError {
    InstallerError::CiMarkers {
        path: ci_file.to_owned(),
        category: section.category,
        reason,
    }
}

/// Checks that every section's marker pair is present and in order.
///
/// # Errors
///
/// Returns [`InstallerError::CiMarkers`] naming the first broken section.
pub fn check_markers(ci_file: &Utf8Path) -> Result<()> {
    let injector = section_injector(ci_file)?;
    for section in CI_SECTIONS {
        injector
            .locate_between(&section.start_marker(), &section.end_marker())
            .map_err(|reason| markers_error(ci_file, section, reason))?;
    }
    Ok(())
}

/// Regenerates every devkit matrix section of `ci_file`.
///
/// All marker pairs are checked before the first section is written, so a
/// broken workflow is left untouched. Each section then uses a fresh injector
/// in `Contains` mode with `force` disabled, so the workflow is never
/// appended to.
///
/// # Errors
///
/// Returns [`InstallerError::CiMarkers`] naming the first section whose
/// markers are missing or out of order, or an I/O error from the injector.
pub fn inject_release_ci(ci_file: &Utf8Path, definitions: &Definitions) -> Result<()> {
    check_markers(ci_file)?;
    for missing in definitions.missing_devkits() {
        warn!("{ci_file}: no devkit URL at {missing}; the matrix will omit it.");
    }

    info!("Injecting release CI devkits into {ci_file}...");
    for section in CI_SECTIONS {
        let mut injector = section_injector(ci_file)?;
        let block = devkit_block(definitions.devkits(section.platform));
        let outcome =
            injector.inject_between(block, &section.start_marker(), &section.end_marker())?;
        if let Outcome::Skipped(reason) = outcome {
            return Err(markers_error(ci_file, section, reason));
        }
    }
    Ok(())
}
