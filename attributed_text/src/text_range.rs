// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::{Endpoint, Error};

/// A validated half-open byte range into a UTF-8 text buffer.
///
/// The invariants checked at construction are:
///
/// - `start <= end`
/// - `end` is within the text bounds
/// - `start` and `end` lie on UTF-8 codepoint boundaries
///
/// `TextRange` does not remember which text it was validated against; it is the caller's
/// responsibility to only reuse it with that text.
///
/// ```
/// use attributed_text::TextRange;
///
/// let range = TextRange::new("Hello!", 0..5).unwrap();
/// assert_eq!(range.len(), 5);
/// assert!(TextRange::new("Hello!", 2..9).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    /// Returns a validated `TextRange` for the provided text.
    #[inline]
    pub fn new(text: &str, range: Range<usize>) -> Result<Self, Error> {
        validate_range(text, &range)?;
        Ok(Self {
            start: range.start,
            end: range.end,
        })
    }

    /// The start byte offset.
    #[must_use]
    #[inline]
    pub const fn start(self) -> usize {
        self.start
    }

    /// The end byte offset (exclusive).
    #[must_use]
    #[inline]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Number of bytes covered by the range.
    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the range covers no bytes.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns this range as a `Range<usize>`.
    #[must_use]
    #[inline]
    pub fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<TextRange> for Range<usize> {
    #[inline]
    fn from(value: TextRange) -> Self {
        value.as_range()
    }
}

#[inline]
pub(crate) fn validate_range(text: &str, range: &Range<usize>) -> Result<(), Error> {
    let len = text.len();
    if range.start > range.end {
        return Err(Error::invalid_range(range.start, range.end, len));
    }
    if range.end > len {
        return Err(Error::invalid_bounds(range.start, range.end, len));
    }
    for (which, index) in [(Endpoint::Start, range.start), (Endpoint::End, range.end)] {
        if !text.is_char_boundary(index) {
            return Err(Error::not_on_char_boundary(
                text,
                range.start,
                range.end,
                which,
                index,
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::TextRange;
    use crate::{Endpoint, ErrorKind};
    use alloc::format;

    #[test]
    fn accepts_valid_ranges() {
        let t = "Hello!";
        assert!(TextRange::new(t, 0..0).is_ok());
        assert!(TextRange::new(t, 0..6).is_ok());
        assert_eq!(TextRange::new(t, 1..3).unwrap().as_range(), 1..3);
    }

    #[test]
    #[expect(
        clippy::reversed_empty_ranges,
        reason = "We want an invalid range for testing."
    )]
    fn rejects_start_greater_than_end() {
        let err = TextRange::new("Hello!", 4..3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!((err.start(), err.end(), err.len()), (4, 3, 6));
        assert!(format!("{err}").contains("start > end"));
    }

    #[test]
    fn rejects_out_of_bounds() {
        let err = TextRange::new("Hello!", 0..7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert!(format!("{err}").contains("len 6"));
    }

    #[test]
    fn rejects_split_characters() {
        // "é" is 2 bytes in UTF-8; index 1 is not a boundary.
        let err = TextRange::new("éclair", 1..2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotOnCharBoundary);
        let b = err.boundary().expect("boundary info");
        assert_eq!(b.which, Endpoint::Start);
        assert_eq!((b.index, b.char_start, b.char_end), (1, 0, 2));

        let err = TextRange::new("éclair", 0..1).unwrap_err();
        let b = err.boundary().expect("boundary info");
        assert_eq!(b.which, Endpoint::End);
    }
}
