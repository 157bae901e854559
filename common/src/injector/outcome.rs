//! Results reported by injector operations.

use std::fmt;

/// What an applied operation did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Content was spliced relative to the located anchor(s).
    Spliced,
    /// The anchor was missing and `force` appended the content at end of file.
    Appended,
    /// The file was missing and `force` created it with the new content.
    Created,
    /// The file content was substituted or overwritten.
    Replaced,
}

/// Why an operation left the file untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The target file does not exist.
    FileNotFound,
    /// The single anchor line was not found.
    AnchorNotFound,
    /// The start anchor of a bracket was not found.
    StartAnchorNotFound,
    /// The end anchor of a bracket was not found.
    EndAnchorNotFound,
    /// The end anchor was found at or before the start anchor.
    EndBeforeStart,
    /// The substitution would not change any line.
    NoChange,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FileNotFound => "file not found",
            Self::AnchorNotFound => "line not found",
            Self::StartAnchorNotFound => "start line not found",
            Self::EndAnchorNotFound => "end line not found",
            Self::EndBeforeStart => "end line occurs before start line",
            Self::NoChange => "string not found",
        })
    }
}

/// Outcome of a single injector operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The file was rewritten.
    Applied(Applied),
    /// The file was left untouched.
    Skipped(SkipReason),
}

impl Outcome {
    /// Returns `true` when the file was rewritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use blueprint_common::{Applied, Outcome, SkipReason};
    ///
    /// assert!(Outcome::Applied(Applied::Spliced).is_applied());
    /// assert!(!Outcome::Skipped(SkipReason::NoChange).is_applied());
    /// ```
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Returns the skip reason, if the operation was skipped.
    #[must_use]
    pub fn skip_reason(self) -> Option<SkipReason> {
        match self {
            Self::Applied(_) => None,
            Self::Skipped(reason) => Some(reason),
        }
    }
}
