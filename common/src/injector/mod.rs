//! Anchor-based line injection into text files.
//!
//! An [`Injector`] is bound to one file. It loads the file once, then each
//! operation locates its anchor line(s), computes a new [`Document`], writes it
//! atomically and keeps the in-memory copy in step with the disk.
//!
//! Missing files and missing anchors follow the `force` policy: with `force`
//! set (the default) the content is created or appended at end of file; without
//! it the operation is skipped and a warning is logged. An end anchor located
//! at or before its start anchor is always skipped.

mod content;
mod outcome;

pub use content::NewContent;
pub use outcome::{Applied, Outcome, SkipReason};

use crate::anchor::{MatchMode, SearchDirection, find_anchor};
use crate::document::Document;
use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use log::{info, warn};

/// Stateful line editor bound to a single file.
///
/// # Examples
///
/// ```no_run
/// use blueprint_common::{Injector, MatchMode};
///
/// let mut injector = Injector::open("CMakeLists.txt")?;
/// injector.set_match_mode(MatchMode::Contains);
/// let outcome = injector.inject_after(
///     "add_subdirectory(src/hello)\n",
///     "# Plugin Subdirectories",
/// )?;
/// assert!(outcome.is_applied());
/// # Ok::<(), blueprint_common::InjectError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Injector {
    path: Utf8PathBuf,
    document: Document,
    direction: SearchDirection,
    mode: MatchMode,
    force: bool,
    suppress_warnings: bool,
}

impl Injector {
    /// Binds an injector to `path` and loads its content.
    ///
    /// A missing file loads as an empty document and is not created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = Document::read(&path)?;
        Ok(Self {
            path,
            document,
            direction: SearchDirection::default(),
            mode: MatchMode::default(),
            force: true,
            suppress_warnings: false,
        })
    }

    /// Rebinds the injector to another file and reloads the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the new file exists but cannot be read.
    pub fn set_file_path(&mut self, path: impl Into<Utf8PathBuf>) -> Result<()> {
        let path = path.into();
        self.document = Document::read(&path)?;
        self.path = path;
        Ok(())
    }

    /// Returns the bound file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the current in-memory document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the active search direction.
    #[must_use]
    pub fn search_direction(&self) -> SearchDirection {
        self.direction
    }

    /// Sets which anchor occurrence subsequent operations target.
    pub fn set_search_direction(&mut self, direction: SearchDirection) {
        self.direction = direction;
    }

    /// Returns the active match mode.
    #[must_use]
    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }

    /// Sets how anchors are compared with lines.
    pub fn set_match_mode(&mut self, mode: MatchMode) {
        self.mode = mode;
    }

    /// Returns whether missing files and anchors fall back to writing anyway.
    #[must_use]
    pub fn force(&self) -> bool {
        self.force
    }

    /// Enables or disables the create/append fallback.
    pub fn set_force(&mut self, force: bool) {
        self.force = force;
    }

    /// Returns whether diagnostics for soft failures are silenced.
    #[must_use]
    pub fn suppress_warnings(&self) -> bool {
        self.suppress_warnings
    }

    /// Silences or restores diagnostics for soft failures and fallbacks.
    pub fn set_suppress_warnings(&mut self, suppress: bool) {
        self.suppress_warnings = suppress;
    }

    /// Replaces everything strictly between `start` and `end` with `content`.
    ///
    /// Both anchor lines are kept. The end anchor is searched from the start
    /// anchor onwards; if it lands at or before the start anchor the
    /// operation is skipped regardless of `force`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn inject_between(
        &mut self,
        content: impl Into<NewContent>,
        start: &str,
        end: &str,
    ) -> Result<Outcome> {
        let content = content.into();
        if let Some(outcome) = self.when_file_missing(&content)? {
            return Ok(outcome);
        }

        match self.locate_between(start, end) {
            Ok((start_idx, end_idx)) => {
                let updated = self
                    .document
                    .spliced(start_idx + 1, end_idx, content.lines());
                self.commit(updated, Applied::Spliced)
            }
            Err(SkipReason::EndBeforeStart) => Ok(self.skip(SkipReason::EndBeforeStart)),
            Err(reason) => self.fall_back(&content, reason),
        }
    }

    /// Locates the `start` and `end` anchor lines without touching the file.
    ///
    /// Uses the same lookup as [`Injector::inject_between`], so a caller can
    /// check several anchor pairs before editing any of them.
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] `inject_between` would report without
    /// `force`.
    pub fn locate_between(
        &self,
        start: &str,
        end: &str,
    ) -> std::result::Result<(usize, usize), SkipReason> {
        if !self.path.is_file() {
            return Err(SkipReason::FileNotFound);
        }
        let start_idx = self
            .find(start, 0)
            .ok_or(SkipReason::StartAnchorNotFound)?;
        let end_idx = self
            .find(end, start_idx)
            .ok_or(SkipReason::EndAnchorNotFound)?;
        if end_idx <= start_idx {
            return Err(SkipReason::EndBeforeStart);
        }
        Ok((start_idx, end_idx))
    }

    /// Inserts `content` immediately after the `anchor` line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn inject_after(
        &mut self,
        content: impl Into<NewContent>,
        anchor: &str,
    ) -> Result<Outcome> {
        let content = content.into();
        self.splice_at_anchor(&content, anchor, |idx| (idx + 1, idx + 1))
    }

    /// Inserts `content` immediately before the `anchor` line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn inject_before(
        &mut self,
        content: impl Into<NewContent>,
        anchor: &str,
    ) -> Result<Outcome> {
        let content = content.into();
        self.splice_at_anchor(&content, anchor, |idx| (idx, idx))
    }

    /// Replaces the `anchor` line with `content`.
    ///
    /// A bare string gains a trailing newline when it lacks one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn replace_single_line(
        &mut self,
        content: impl Into<NewContent>,
        anchor: &str,
    ) -> Result<Outcome> {
        let content = content.into().terminated();
        self.splice_at_anchor(&content, anchor, |idx| (idx, idx + 1))
    }

    /// Replaces every occurrence of `old` with `new` on every line.
    ///
    /// Match mode and search direction do not apply. A missing file or a
    /// substitution that changes nothing is skipped regardless of `force`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn replace_string(&mut self, new: &str, old: &str) -> Result<Outcome> {
        if !self.path.is_file() {
            return Ok(self.skip(SkipReason::FileNotFound));
        }
        if old.is_empty() {
            return Ok(self.skip(SkipReason::NoChange));
        }

        let lines: Vec<String> = self
            .document
            .lines()
            .iter()
            .map(|line| {
                if line.contains(old) {
                    line.replace(old, new)
                } else {
                    line.clone()
                }
            })
            .collect();
        let updated = Document::from_lines(lines);

        if updated == self.document {
            return Ok(self.skip(SkipReason::NoChange));
        }
        self.commit(updated, Applied::Replaced)
    }

    /// Overwrites the whole file with `content`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn replace_all(&mut self, content: impl Into<NewContent>) -> Result<Outcome> {
        let content = content.into();
        let document = Document::from_lines(content.lines().iter().cloned());
        self.commit(document, Applied::Replaced)
    }

    fn splice_at_anchor(
        &mut self,
        content: &NewContent,
        anchor: &str,
        bounds: impl FnOnce(usize) -> (usize, usize),
    ) -> Result<Outcome> {
        if let Some(outcome) = self.when_file_missing(content)? {
            return Ok(outcome);
        }

        let Some(idx) = self.find(anchor, 0) else {
            return self.fall_back(content, SkipReason::AnchorNotFound);
        };

        let (head_end, tail_start) = bounds(idx);
        let updated = self.document.spliced(head_end, tail_start, content.lines());
        self.commit(updated, Applied::Spliced)
    }

    fn find(&self, anchor: &str, begin_from: usize) -> Option<usize> {
        find_anchor(
            self.document.lines(),
            anchor,
            self.mode,
            self.direction,
            begin_from,
        )
    }

    /// Handles a missing target file; `None` means the file is present.
    fn when_file_missing(&mut self, content: &NewContent) -> Result<Option<Outcome>> {
        if self.path.is_file() {
            return Ok(None);
        }
        if !self.force {
            return Ok(Some(self.skip(SkipReason::FileNotFound)));
        }

        let created = Document::from_lines(content.lines().iter().cloned());
        let outcome = self.commit(created, Applied::Created)?;
        info!("File {} created with new content.", self.path);
        Ok(Some(outcome))
    }

    fn fall_back(&mut self, content: &NewContent, reason: SkipReason) -> Result<Outcome> {
        if !self.force {
            return Ok(self.skip(reason));
        }

        if !self.suppress_warnings {
            info!("{}: {reason}. Injecting at the end of the file.", self.path);
        }
        let updated = self.document.appended(content.lines());
        self.commit(updated, Applied::Appended)
    }

    fn skip(&self, reason: SkipReason) -> Outcome {
        if !self.suppress_warnings {
            warn!("{}: {reason}. Aborting.", self.path);
        }
        Outcome::Skipped(reason)
    }

    fn commit(&mut self, document: Document, applied: Applied) -> Result<Outcome> {
        document.write_atomic(&self.path)?;
        self.document = Document::parse(&document.to_text());
        Ok(Outcome::Applied(applied))
    }
}

#[cfg(test)]
mod tests;
