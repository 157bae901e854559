//! Maya host platforms and their naming conventions.

use std::fmt;

/// A platform Maya plugins are built and shipped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Linux.
    Linux,
    /// macOS.
    Darwin,
}

impl Platform {
    /// Every supported platform, in module file order.
    pub const ALL: [Self; 3] = [Self::Windows, Self::Linux, Self::Darwin];

    /// Returns the lowercase platform name used in deploy folder names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Darwin => "darwin",
        }
    }

    /// Returns the key holding this platform's devkits in `definitions.json`.
    #[must_use]
    pub const fn definitions_key(self) -> &'static str {
        match self {
            Self::Windows => "windows_devkits",
            Self::Linux => "linux_devkits",
            Self::Darwin => "darwin_devkits",
        }
    }

    /// Returns the `PLATFORM:` code Maya expects in module files.
    #[must_use]
    pub const fn module_code(self) -> &'static str {
        match self {
            Self::Windows => "win64",
            Self::Linux => "linux",
            Self::Darwin => "mac",
        }
    }

    /// Returns the file extension of a compiled plugin, including the dot.
    #[must_use]
    pub const fn plugin_extension(self) -> &'static str {
        match self {
            Self::Windows => ".mll",
            Self::Linux => ".so",
            Self::Darwin => ".bundle",
        }
    }

    /// Returns the platform this binary was compiled for, if Maya supports it.
    #[must_use]
    pub const fn current() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Self::Windows)
        } else if cfg!(target_os = "linux") {
            Some(Self::Linux)
        } else if cfg!(target_os = "macos") {
            Some(Self::Darwin)
        } else {
            None
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
