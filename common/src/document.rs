//! Line-oriented document model and atomic persistence.
//!
//! A [`Document`] holds every line of a text file with its terminator
//! attached, so joining the lines reproduces the file byte for byte. Writes go
//! through a sibling temporary file that is renamed over the target, which
//! means readers never observe a half-written file.

use crate::error::{InjectError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::Write;

/// Marker appended to the file stem of the temporary sibling used for writes.
pub const TEMP_FILE_MARKER: &str = "_TMP";

/// Ordered lines of a text file, each including its line terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Builds a document from already-split lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use blueprint_common::Document;
    ///
    /// let doc = Document::from_lines(["a\n", "b\n"]);
    /// assert_eq!(doc.len(), 2);
    /// assert_eq!(doc.to_text(), "a\nb\n");
    /// ```
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits text into lines, keeping each `\n` on the line it ends.
    ///
    /// A final line without a terminator is kept as-is.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.split_inclusive('\n'))
    }

    /// Reads the file at `path`.
    ///
    /// A missing file yields an empty document; nothing is created on disk.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::Read`] if the file exists but cannot be read as
    /// UTF-8 text.
    pub fn read(path: &Utf8Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| InjectError::Read {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Writes the document to `path` through a temporary sibling file.
    ///
    /// The content is written and synced to `<stem>_TMP<.ext>` in the same
    /// directory, then renamed over `path`. The temporary file is removed
    /// again if any step fails.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::Write`] or [`InjectError::Replace`] when the
    /// temporary file cannot be written or moved into place.
    pub fn write_atomic(&self, path: &Utf8Path) -> Result<()> {
        let temp_path = temp_sibling(path);

        if let Err(source) = self.write_to(&temp_path) {
            discard(&temp_path);
            return Err(InjectError::Write {
                path: temp_path,
                source,
            });
        }

        fs::rename(&temp_path, path).map_err(|source| {
            discard(&temp_path);
            InjectError::Replace {
                from: temp_path.clone(),
                to: path.to_owned(),
                source,
            }
        })
    }

    fn write_to(&self, path: &Utf8Path) -> std::io::Result<()> {
        let mut file = fs::File::create(path)?;
        for line in &self.lines {
            file.write_all(line.as_bytes())?;
        }
        file.sync_all()
    }

    /// Returns the lines as a slice.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` when the document has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the terminator of the first terminated line, `\n` by default.
    #[must_use]
    pub fn line_ending(&self) -> &'static str {
        match self.lines.iter().find(|line| line.ends_with('\n')) {
            Some(line) if line.ends_with("\r\n") => "\r\n",
            _ => "\n",
        }
    }

    /// Joins the lines back into the file text.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    /// Returns a new document where `lines[head_end..tail_start]` is replaced
    /// by `insert`.
    ///
    /// `head_end` is the exclusive end of the kept head and `tail_start` the
    /// first kept tail line. Passing equal values inserts without removing.
    /// Both bounds are clamped to the document length, and a `tail_start`
    /// before `head_end` is treated as `head_end`.
    ///
    /// Inserted lines ending in `\n` adopt the document's [`line_ending`].
    /// An unterminated head line is terminated before anything is inserted
    /// after it.
    ///
    /// [`line_ending`]: Self::line_ending
    ///
    /// # Examples
    ///
    /// ```
    /// use blueprint_common::Document;
    ///
    /// let doc = Document::parse("project(demo)");
    /// let updated = doc.appended(&["add_subdirectory(src/hello)\n".to_owned()]);
    /// assert_eq!(updated.to_text(), "project(demo)\nadd_subdirectory(src/hello)\n");
    /// ```
    #[must_use]
    pub fn spliced(&self, head_end: usize, tail_start: usize, insert: &[String]) -> Self {
        let head_end = head_end.min(self.lines.len());
        let tail_start = tail_start.clamp(head_end, self.lines.len());
        let ending = self.line_ending();

        let mut lines = Vec::with_capacity(head_end + insert.len() + self.lines.len() - tail_start);
        lines.extend(self.lines.iter().take(head_end).cloned());
        if let Some(last) = lines
            .last_mut()
            .filter(|line| !insert.is_empty() && !line.ends_with('\n'))
        {
            last.push_str(ending);
        }
        lines.extend(insert.iter().map(|line| with_ending(line, ending)));
        lines.extend(self.lines.iter().skip(tail_start).cloned());
        Self { lines }
    }

    /// Returns a new document with `insert` appended after the last line.
    #[must_use]
    pub fn appended(&self, insert: &[String]) -> Self {
        self.spliced(self.lines.len(), self.lines.len(), insert)
    }
}

/// Returns the temporary sibling path used by [`Document::write_atomic`].
///
/// # Examples
///
/// ```
/// use blueprint_common::document::temp_sibling;
/// use camino::Utf8Path;
///
/// let temp = temp_sibling(Utf8Path::new("ci/release.yml"));
/// assert_eq!(temp, Utf8Path::new("ci/release_TMP.yml"));
/// ```
#[must_use]
pub fn temp_sibling(path: &Utf8Path) -> Utf8PathBuf {
    let stem = path.file_stem().unwrap_or_default();
    let name = match path.extension() {
        Some(extension) => format!("{stem}{TEMP_FILE_MARKER}.{extension}"),
        None => format!("{stem}{TEMP_FILE_MARKER}"),
    };
    path.with_file_name(name)
}

fn with_ending(line: &str, ending: &str) -> String {
    match line.strip_suffix('\n') {
        Some(body) if !body.ends_with('\r') => format!("{body}{ending}"),
        _ => line.to_owned(),
    }
}

fn discard(path: &Utf8Path) {
    if fs::remove_file(path).is_err() {
        // Best-effort cleanup; the original error is what gets reported.
    }
}
