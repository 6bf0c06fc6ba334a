// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error produced when a run or slice range does not fit the text it is applied to.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the offending range, the text length at the
/// time of failure and, for boundary failures, the UTF-8 character enclosing the bad index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    start: usize,
    end: usize,
    len: usize,
    boundary: Option<BoundaryInfo>,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports source text length context; an `is_empty` method would be misleading and unused."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The start byte index of the rejected range.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end byte index (exclusive) of the rejected range.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length in bytes of the text the range was checked against.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Details about the offending index for [`ErrorKind::NotOnCharBoundary`].
    pub fn boundary(&self) -> Option<BoundaryInfo> {
        self.boundary
    }

    pub(crate) fn invalid_bounds(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidBounds,
            start,
            end,
            len,
            boundary: None,
        }
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            start,
            end,
            len,
            boundary: None,
        }
    }

    pub(crate) fn not_on_char_boundary(
        text: &str,
        start: usize,
        end: usize,
        which: Endpoint,
        index: usize,
    ) -> Self {
        let (char_start, char_end) = enclosing_char(text, index);
        Self {
            kind: ErrorKind::NotOnCharBoundary,
            start,
            end,
            len: text.len(),
            boundary: Some(BoundaryInfo {
                which,
                index,
                char_start,
                char_end,
            }),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.kind, self.boundary) {
            (ErrorKind::InvalidBounds, _) => write!(
                f,
                "range {}..{} out of bounds for len {}",
                self.start, self.end, self.len
            ),
            (ErrorKind::InvalidRange, _) => {
                write!(f, "invalid range {}..{}: start > end", self.start, self.end)
            }
            (ErrorKind::NotOnCharBoundary, Some(b)) => write!(
                f,
                "range {}..{}: {} index {} not on UTF-8 boundary (char {}..{})",
                self.start, self.end, b.which, b.index, b.char_start, b.char_end
            ),
            (ErrorKind::NotOnCharBoundary, None) => write!(
                f,
                "range {}..{} not on UTF-8 boundary",
                self.start, self.end
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The range reaches past the end of the text.
    InvalidBounds,

    /// The range has `start > end`.
    InvalidRange,

    /// Either endpoint splits a UTF-8 encoded character.
    NotOnCharBoundary,
}

/// Identifies which endpoint of a range failed boundary validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The `start` endpoint of the range.
    Start,

    /// The `end` endpoint of the range.
    End,
}

impl core::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// The offending index of a range that split a UTF-8 character.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundaryInfo {
    /// Which endpoint (`start` or `end`) was invalid.
    pub which: Endpoint,

    /// The offending byte index.
    pub index: usize,

    /// The start byte index of the enclosing character.
    pub char_start: usize,

    /// The end byte index (exclusive) of the enclosing character.
    pub char_end: usize,
}

fn enclosing_char(text: &str, index: usize) -> (usize, usize) {
    if index >= text.len() || text.is_char_boundary(index) {
        return (index, index);
    }
    // A UTF-8 sequence is at most 4 bytes, so both boundaries are within 3 bytes.
    let start = (index.saturating_sub(3)..index)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    let end = (index + 1..=text.len())
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(text.len());
    (start, end)
}
