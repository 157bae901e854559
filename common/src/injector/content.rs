//! New content handed to the injector.

/// Lines to splice into a document.
///
/// A bare string becomes a one-element sequence. Sequences are kept exactly as
/// given; no terminators are added.
///
/// # Examples
///
/// ```
/// use blueprint_common::NewContent;
///
/// let single = NewContent::from("add_subdirectory(src/foo)\n");
/// assert_eq!(single.lines(), ["add_subdirectory(src/foo)\n"]);
///
/// let many = NewContent::from(["a\n", "b\n"]);
/// assert_eq!(many.lines().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContent {
    lines: Vec<String>,
    bare: bool,
}

impl NewContent {
    /// Returns the lines to splice.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Ensures a bare string ends with a line terminator.
    ///
    /// Sequences are returned unchanged.
    #[must_use]
    pub fn terminated(mut self) -> Self {
        if self.bare {
            for line in &mut self.lines {
                if !line.ends_with('\n') {
                    line.push('\n');
                }
            }
        }
        self
    }

    fn sequence<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            bare: false,
        }
    }
}

impl From<String> for NewContent {
    fn from(line: String) -> Self {
        Self {
            lines: vec![line],
            bare: true,
        }
    }
}

impl From<&str> for NewContent {
    fn from(line: &str) -> Self {
        Self::from(line.to_owned())
    }
}

impl From<&String> for NewContent {
    fn from(line: &String) -> Self {
        Self::from(line.clone())
    }
}

impl From<Vec<String>> for NewContent {
    fn from(lines: Vec<String>) -> Self {
        Self::sequence(lines)
    }
}

impl From<Vec<&str>> for NewContent {
    fn from(lines: Vec<&str>) -> Self {
        Self::sequence(lines)
    }
}

impl From<&[String]> for NewContent {
    fn from(lines: &[String]) -> Self {
        Self::sequence(lines.iter().cloned())
    }
}

impl From<&[&str]> for NewContent {
    fn from(lines: &[&str]) -> Self {
        Self::sequence(lines.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for NewContent {
    fn from(lines: [&str; N]) -> Self {
        Self::sequence(lines)
    }
}
