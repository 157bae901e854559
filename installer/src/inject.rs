//! The `inject` command: one anchor-based edit applied to one file.

use crate::error::Result;
use blueprint_common::{Injector, MatchMode, Outcome, SearchDirection};
use camino::Utf8PathBuf;

/// Which injector operation to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectOperation {
    /// Replace the lines strictly between two anchors.
    Between {
        /// Start anchor.
        start: String,
        /// End anchor.
        end: String,
    },
    /// Insert after an anchor.
    After(String),
    /// Insert before an anchor.
    Before(String),
    /// Replace the anchor line.
    ReplaceLine(String),
    /// Replace every occurrence of a substring with the first content line.
    ReplaceString(String),
    /// Overwrite the file.
    ReplaceAll,
}

/// A fully specified `inject` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectRequest {
    /// Target file.
    pub file: Utf8PathBuf,
    /// Operation to run.
    pub operation: InjectOperation,
    /// Content lines, without line terminators.
    pub lines: Vec<String>,
    /// How anchors are compared.
    pub mode: MatchMode,
    /// Which anchor occurrence is used.
    pub direction: SearchDirection,
    /// Whether missing files and anchors fall back to create/append.
    pub force: bool,
    /// Whether soft-failure diagnostics are silenced.
    pub suppress_warnings: bool,
}

impl InjectRequest {
    /// Returns `anchor` as the injector expects it.
    ///
    /// Whole-line anchors gain the line terminator that command-line
    /// arguments cannot easily carry.
    fn anchor(&self, anchor: &str) -> String {
        match self.mode {
            MatchMode::Equal if !anchor.ends_with('\n') => format!("{anchor}\n"),
            _ => anchor.to_owned(),
        }
    }

    fn content(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| {
                if line.ends_with('\n') {
                    line.clone()
                } else {
                    format!("{line}\n")
                }
            })
            .collect()
    }
}

/// Runs `request` and returns the injector outcome.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn run_inject(request: &InjectRequest) -> Result<Outcome> {
    let mut injector = Injector::open(request.file.clone())?;
    injector.set_match_mode(request.mode);
    injector.set_search_direction(request.direction);
    injector.set_force(request.force);
    injector.set_suppress_warnings(request.suppress_warnings);

    let outcome = match &request.operation {
        InjectOperation::Between { start, end } => injector.inject_between(
            request.content(),
            &request.anchor(start),
            &request.anchor(end),
        )?,
        InjectOperation::After(anchor) => {
            injector.inject_after(request.content(), &request.anchor(anchor))?
        }
        InjectOperation::Before(anchor) => {
            injector.inject_before(request.content(), &request.anchor(anchor))?
        }
        InjectOperation::ReplaceLine(anchor) => {
            injector.replace_single_line(request.content(), &request.anchor(anchor))?
        }
        InjectOperation::ReplaceString(old) => {
            let new = request.lines.first().map_or("", String::as_str);
            injector.replace_string(new, old)?
        }
        InjectOperation::ReplaceAll => injector.replace_all(request.content())?,
    };
    Ok(outcome)
}
