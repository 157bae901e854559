//! Project definitions persisted to `package/definitions.json`.
//!
//! The definitions record the project identity, the Maya versions the project
//! targets and the devkit download URL for each version on every platform.
//! They are built from a built-in catalogue when a project is initialised, then
//! loaded once per command and passed to whatever needs them.

use crate::error::{InstallerError, Result};
use crate::platform::Platform;
use blueprint_common::Document;
use camino::Utf8Path;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Devkit URLs keyed by Maya version, in insertion order.
///
/// The order is kept through JSON round trips, so a hand-edited
/// `definitions.json` keeps its layout and the release workflow lists
/// versions in the same order.
///
/// # Examples
///
/// ```
/// use blueprint_installer::definitions::DevkitMap;
///
/// let mut devkits = DevkitMap::new();
/// devkits.insert("2025", "https://b");
/// devkits.insert("2024", "https://a");
/// devkits.insert("2025", "https://c");
///
/// let versions: Vec<&str> = devkits.iter().map(|(version, _)| version).collect();
/// assert_eq!(versions, ["2025", "2024"]);
/// assert_eq!(devkits.get("2025"), Some("https://c"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevkitMap {
    entries: Vec<(String, String)>,
}

impl DevkitMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL for `version`, keeping the position of an existing entry.
    pub fn insert(&mut self, version: impl Into<String>, url: impl Into<String>) {
        let version = version.into();
        let url = url.into();
        match self.entries.iter_mut().find(|(known, _)| *known == version) {
            Some((_, existing)) => *existing = url,
            None => self.entries.push((version, url)),
        }
    }

    /// Returns the URL for `version`.
    #[must_use]
    pub fn get(&self, version: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(known, _)| known == version)
            .map(|(_, url)| url.as_str())
    }

    /// Returns `true` when `version` has a URL.
    #[must_use]
    pub fn contains_key(&self, version: &str) -> bool {
        self.get(version).is_some()
    }

    /// Iterates over `(version, url)` pairs in insertion order.
    pub fn iter(&self) -> <&Self as IntoIterator>::IntoIter {
        self.into_iter()
    }

    /// Returns the number of versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no version is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

type Entries<'a> = std::iter::Map<
    std::slice::Iter<'a, (String, String)>,
    fn(&'a (String, String)) -> (&'a str, &'a str),
>;

fn entry_refs((version, url): &(String, String)) -> (&str, &str) {
    (version.as_str(), url.as_str())
}

impl<'a> IntoIterator for &'a DevkitMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(entry_refs as fn(&'a (String, String)) -> _)
    }
}

impl<V, U> FromIterator<(V, U)> for DevkitMap
where
    V: Into<String>,
    U: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (V, U)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (version, url) in iter {
            map.insert(version, url);
        }
        map
    }
}

impl Serialize for DevkitMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for DevkitMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DevkitMapVisitor)
    }
}

struct DevkitMapVisitor;

impl<'de> Visitor<'de> for DevkitMapVisitor {
    type Value = DevkitMap;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of Maya versions to devkit URLs")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<DevkitMap, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = DevkitMap::new();
        while let Some((version, url)) = access.next_entry::<String, String>()? {
            map.insert(version, url);
        }
        Ok(map)
    }
}

/// One Maya release in the built-in devkit catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueEntry {
    /// Maya version, for example `"2025"`.
    pub version: &'static str,
    /// Windows devkit archive.
    pub windows: &'static str,
    /// Linux devkit archive.
    pub linux: &'static str,
    /// macOS devkit image.
    pub darwin: &'static str,
}

impl CatalogueEntry {
    /// Returns the devkit URL for `platform`.
    #[must_use]
    pub const fn url(&self, platform: Platform) -> &'static str {
        match platform {
            Platform::Windows => self.windows,
            Platform::Linux => self.linux,
            Platform::Darwin => self.darwin,
        }
    }
}

/// Devkits known to the scaffolder, in ascending version order.
pub const CATALOGUE: &[CatalogueEntry] = &[
    CatalogueEntry {
        version: "2022",
        windows: "https://autodesk-adn-transfer.s3-us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2022/Autodesk_Maya_2022_5_Update_DEVKIT_Windows.zip",
        linux: "https://autodesk-adn-transfer.s3-us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2022/Autodesk_Maya_2022_5_Update_DEVKIT_Linux.tgz",
        darwin: "https://autodesk-adn-transfer.s3-us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2022/Autodesk_Maya_2022_5_Update_DEVKIT_Mac.dmg",
    },
    CatalogueEntry {
        version: "2023",
        windows: "https://autodesk-adn-transfer.s3-us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2023/Autodesk_Maya_2023_3_Update_DEVKIT_Windows.zip",
        linux: "https://autodesk-adn-transfer.s3-us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2023/Autodesk_Maya_2023_3_Update_DEVKIT_Linux.tgz",
        darwin: "https://autodesk-adn-transfer.s3-us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2023/Autodesk_Maya_2023_3_Update_DEVKIT_Mac.dmg",
    },
    CatalogueEntry {
        version: "2024",
        windows: "https://autodesk-adn-transfer.s3-us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2024/Autodesk_Maya_2024_2_Update_DEVKIT_Windows.zip",
        linux: "https://autodesk-adn-transfer.s3-us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2024/Autodesk_Maya_2024_2_Update_DEVKIT_Linux.tgz",
        darwin: "https://autodesk-adn-transfer.s3-us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2024/Autodesk_Maya_2024_2_Update_DEVKIT_Mac.dmg",
    },
    CatalogueEntry {
        version: "2025",
        windows: "https://autodesk-adn-transfer.s3.us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2025/Autodesk_Maya_2025_3_Update_DEVKIT_Windows.zip",
        linux: "https://autodesk-adn-transfer.s3.us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2025/Autodesk_Maya_2025_3_Update_DEVKIT_Linux.tgz",
        darwin: "https://autodesk-adn-transfer.s3.us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2025/Autodesk_Maya_2025_3_Update_DEVKIT_Mac.dmg",
    },
    CatalogueEntry {
        version: "2026",
        windows: "https://autodesk-adn-transfer.s3.us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2026/Autodesk_Maya_2026_1_Update_DEVKIT_Windows.zip",
        linux: "https://autodesk-adn-transfer.s3.us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2026/Autodesk_Maya_2026_1_Update_DEVKIT_Linux.tgz",
        darwin: "https://autodesk-adn-transfer.s3.us-west-2.amazonaws.com/ADN+Extranet/M%26E/Maya/devkit+2026/Autodesk_Maya_2026_3_Update_DEVKIT_Mac.dmg",
    },
];

/// Looks up a Maya version in the built-in catalogue.
#[must_use]
pub fn catalogue_entry(version: &str) -> Option<&'static CatalogueEntry> {
    CATALOGUE.iter().find(|entry| entry.version == version)
}

/// Identity of a generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    /// Machine-friendly project name used for module and file names.
    pub slug: String,
    /// Human-readable project name.
    pub name: String,
    /// Devkit folder, relative to the repository root.
    pub devkit_dir: String,
}

/// Contents of `definitions.json`.
///
/// Field order matches the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Definitions {
    /// Machine-friendly project name.
    pub project_slug: String,
    /// Human-readable project name.
    pub project_name: String,
    /// Devkit folder, relative to the repository root.
    pub local_devkits_relative_path: String,
    /// Maya versions the project builds for, in the order requested.
    pub target_maya_versions: Vec<String>,
    /// Windows devkit URLs.
    #[serde(default)]
    pub windows_devkits: DevkitMap,
    /// Linux devkit URLs.
    #[serde(default)]
    pub linux_devkits: DevkitMap,
    /// macOS devkit URLs.
    #[serde(default)]
    pub darwin_devkits: DevkitMap,
}

/// Definitions built from the catalogue, plus the versions it did not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueSelection {
    /// The resulting definitions.
    pub definitions: Definitions,
    /// Requested versions absent from the catalogue, in request order.
    pub skipped: Vec<String>,
}

impl Definitions {
    /// Builds definitions for `project` targeting the requested Maya versions.
    ///
    /// Versions present in the catalogue are kept in request order; repeats
    /// are ignored. Unknown versions are reported in
    /// [`CatalogueSelection::skipped`].
    ///
    /// # Examples
    ///
    /// ```
    /// use blueprint_installer::definitions::{Definitions, ProjectInfo};
    ///
    /// let project = ProjectInfo {
    ///     slug: "hello".to_owned(),
    ///     name: "Hello".to_owned(),
    ///     devkit_dir: "devkits".to_owned(),
    /// };
    /// let versions = ["2025".to_owned(), "1999".to_owned()];
    /// let selection = Definitions::from_catalogue(&project, &versions);
    ///
    /// assert_eq!(selection.definitions.target_maya_versions, ["2025"]);
    /// assert_eq!(selection.skipped, ["1999"]);
    /// ```
    #[must_use]
    pub fn from_catalogue(project: &ProjectInfo, versions: &[String]) -> CatalogueSelection {
        let mut definitions = Self {
            project_slug: project.slug.clone(),
            project_name: project.name.clone(),
            local_devkits_relative_path: project.devkit_dir.clone(),
            ..Self::default()
        };
        let mut skipped = Vec::new();

        for version in versions {
            let Some(entry) = catalogue_entry(version) else {
                skipped.push(version.clone());
                continue;
            };
            if definitions.target_maya_versions.contains(version) {
                continue;
            }
            definitions.target_maya_versions.push(version.clone());
            for platform in Platform::ALL {
                definitions
                    .devkits_mut(platform)
                    .insert(version.as_str(), entry.url(platform));
            }
        }

        CatalogueSelection {
            definitions,
            skipped,
        }
    }

    /// Returns the devkit URLs for `platform`.
    #[must_use]
    pub fn devkits(&self, platform: Platform) -> &DevkitMap {
        match platform {
            Platform::Windows => &self.windows_devkits,
            Platform::Linux => &self.linux_devkits,
            Platform::Darwin => &self.darwin_devkits,
        }
    }

    /// Lists target versions that have no devkit URL, as
    /// `<definitions key>.<version>` paths such as `linux_devkits.2025`.
    #[must_use]
    pub fn missing_devkits(&self) -> Vec<String> {
        Platform::ALL
            .into_iter()
            .flat_map(|platform| {
                let devkits = self.devkits(platform);
                self.target_maya_versions
                    .iter()
                    .filter(move |version| !devkits.contains_key(version))
                    .map(move |version| format!("{}.{version}", platform.definitions_key()))
            })
            .collect()
    }

    fn devkits_mut(&mut self, platform: Platform) -> &mut DevkitMap {
        match platform {
            Platform::Windows => &mut self.windows_devkits,
            Platform::Linux => &mut self.linux_devkits,
            Platform::Darwin => &mut self.darwin_devkits,
        }
    }

    /// Loads definitions from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| InstallerError::ReadDefinitions {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| InstallerError::ParseDefinitions {
            path: path.to_owned(),
            source,
        })
    }

    /// Writes the definitions to `path` as JSON indented by four spaces.
    ///
    /// Missing parent directories are created and the file is replaced
    /// atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or the write fails.
    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        let text = self.to_json()?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Document::parse(&text).write_atomic(path)?;
        Ok(())
    }

    /// Renders the definitions as JSON indented by four spaces.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|source| InstallerError::SerializeDefinitions { source })?;
        // serde_json only emits valid UTF-8.
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
