//! Directory resolution abstraction for platform-specific paths.
//!
//! Maya reads user modules from `~/Documents/maya/modules` on every
//! platform. The [`BaseDirs`] trait lets tests substitute a fake home.

use std::path::PathBuf;

/// Source of user directories.
pub trait BaseDirs {
    /// Returns the current user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Returns the directory Maya scans for user module files.
    fn maya_modules_dir(&self) -> Option<PathBuf> {
        self.home_dir()
            .map(|home| home.join("Documents").join("maya").join("modules"))
    }
}

/// [`BaseDirs`] backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn home_dir(&self) -> Option<PathBuf> {
        directories_next::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}
