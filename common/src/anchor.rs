//! Anchor lookup over document lines.
//!
//! Searches always run over the document in its natural order and return
//! natural-order indices. Backward searches pick the last match instead of
//! scanning a reversed copy, so callers never translate coordinates.

use std::fmt;
use std::str::FromStr;

/// How an anchor is compared with a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// The line must equal the anchor, terminator included.
    #[default]
    Equal,
    /// The anchor must occur somewhere in the line.
    Contains,
}

impl MatchMode {
    /// Returns `true` if `line` matches `anchor` under this mode.
    ///
    /// A `\r\n` line terminator matches an anchor ending in a bare `\n`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blueprint_common::MatchMode;
    ///
    /// assert!(MatchMode::Equal.matches("end\r\n", "end\n"));
    /// assert!(MatchMode::Contains.matches("# END\r\n", "END\n"));
    /// ```
    #[must_use]
    pub fn matches(self, line: &str, anchor: &str) -> bool {
        let direct = match self {
            Self::Equal => line == anchor,
            Self::Contains => line.contains(anchor),
        };
        direct || self.matches_crlf(line, anchor)
    }

    fn matches_crlf(self, line: &str, anchor: &str) -> bool {
        let (Some(body), Some(anchor_body)) =
            (line.strip_suffix("\r\n"), anchor.strip_suffix('\n'))
        else {
            return false;
        };
        match self {
            Self::Equal => body == anchor_body,
            Self::Contains => body.ends_with(anchor_body),
        }
    }
}

/// Which occurrence of an anchor a search returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchDirection {
    /// First occurrence from the start of the document.
    #[default]
    Forward,
    /// Last occurrence, as if scanning from the end of the document.
    Backward,
}

/// Error returned when parsing an unknown mode or direction name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?}; expected one of {expected}")]
pub struct ParseSettingError {
    value: String,
    expected: &'static str,
}

impl FromStr for MatchMode {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" => Ok(Self::Equal),
            "contains" => Ok(Self::Contains),
            other => Err(ParseSettingError {
                value: other.to_owned(),
                expected: "equal, contains",
            }),
        }
    }
}

impl FromStr for SearchDirection {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            other => Err(ParseSettingError {
                value: other.to_owned(),
                expected: "forward, backward",
            }),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equal => "equal",
            Self::Contains => "contains",
        })
    }
}

impl fmt::Display for SearchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        })
    }
}

/// Finds the index of `anchor` in `lines`.
///
/// In [`MatchMode::Contains`] only indices at or after `begin_from` are
/// considered. [`MatchMode::Equal`] always considers the whole document and
/// ignores `begin_from`; callers that need ordering must check the returned
/// index themselves.
///
/// # Examples
///
/// ```
/// use blueprint_common::{MatchMode, SearchDirection, find_anchor};
///
/// let lines = ["x\n", "# marker\n", "y\n", "# marker\n"].map(String::from);
///
/// let first = find_anchor(&lines, "marker", MatchMode::Contains, SearchDirection::Forward, 0);
/// let last = find_anchor(&lines, "marker", MatchMode::Contains, SearchDirection::Backward, 0);
/// assert_eq!(first, Some(1));
/// assert_eq!(last, Some(3));
/// ```
#[must_use]
pub fn find_anchor(
    lines: &[String],
    anchor: &str,
    mode: MatchMode,
    direction: SearchDirection,
    begin_from: usize,
) -> Option<usize> {
    let begin = match mode {
        MatchMode::Equal => 0,
        MatchMode::Contains => begin_from,
    };
    let mut candidates = lines
        .iter()
        .enumerate()
        .skip(begin)
        .filter(|(_, line)| mode.matches(line, anchor))
        .map(|(idx, _)| idx);

    match direction {
        SearchDirection::Forward => candidates.next(),
        SearchDirection::Backward => candidates.last(),
    }
}
