// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use super::LineFragment;
use crate::analysis::{Capabilities, GraphemeOracle};
use crate::glyph::GlyphString;
use crate::style::TruncationMode;
use crate::util::EPSILON;

/// Character marking removed content.
pub const ELLIPSIS: char = '\u{2026}';

/// Replaces content that does not fit a line with an ellipsis.
#[derive(Copy, Clone)]
pub struct TruncationEngine<'a> {
    graphemes: &'a dyn GraphemeOracle,
}

impl core::fmt::Debug for TruncationEngine<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TruncationEngine").finish_non_exhaustive()
    }
}

impl<'a> TruncationEngine<'a> {
    /// Creates an engine removing whole grapheme clusters as found by `graphemes`.
    pub fn new(graphemes: &'a dyn GraphemeOracle) -> Self {
        Self { graphemes }
    }

    /// Creates an engine using the grapheme oracle of `capabilities`.
    pub fn from_capabilities(capabilities: &'a Capabilities) -> Self {
        Self::new(&*capabilities.graphemes)
    }

    /// Shrinks the line to the width of its rectangle.
    ///
    /// An ellipsis is placed at the start, the middle or the end of the line depending
    /// on `mode`, then grapheme clusters next to it are removed until the line fits:
    /// before it for [`TruncationMode::Right`], after it otherwise, switching sides
    /// when one runs out. Whitespace touching the ellipsis is removed last.
    pub fn truncate(&self, line: &mut LineFragment, mode: TruncationMode) {
        let width = line.rect.width();
        let glyphs = &mut line.glyphs;
        if glyphs.is_empty() {
            return;
        }
        let len = glyphs.len();
        let anchor = match mode {
            TruncationMode::Left => 0,
            TruncationMode::Right => len,
            TruncationMode::Center => {
                let middle = glyphs.glyph_index_at_offset(glyphs.advance_width() * 0.5);
                glyphs.glyph_index_for_string_index(glyphs.string_index_for_glyph_index(middle))
            }
        };
        if glyphs.insert_glyph(anchor, ELLIPSIS).is_err() {
            return;
        }
        let mut ellipsis = anchor;
        let prefer_before = mode == TruncationMode::Right;

        while glyphs.advance_width() > width + EPSILON {
            let before = self.cluster_before(glyphs, ellipsis);
            let after = self.cluster_after(glyphs, ellipsis);
            let (range, is_before) = match (before, after) {
                (Some(range), _) if prefer_before => (range, true),
                (_, Some(range)) => (range, false),
                (Some(range), None) => (range, true),
                (None, None) => break,
            };
            let removed = range.len();
            if glyphs.delete_glyphs(range).is_err() {
                break;
            }
            if is_before {
                ellipsis -= removed;
            }
        }

        while ellipsis > 0 && glyphs.glyph(ellipsis - 1).is_some_and(|g| g.is_whitespace()) {
            if glyphs.delete_glyph(ellipsis - 1).is_err() {
                break;
            }
            ellipsis -= 1;
        }
        while glyphs.glyph(ellipsis + 1).is_some_and(|g| g.is_whitespace()) {
            if glyphs.delete_glyph(ellipsis + 1).is_err() {
                break;
            }
        }
        log::debug!("Truncated line to {} glyphs", glyphs.len());
        line.truncated = true;
    }

    /// Glyphs of the grapheme cluster ending at the glyph `ellipsis`.
    fn cluster_before(&self, glyphs: &GlyphString, ellipsis: usize) -> Option<Range<usize>> {
        if ellipsis == 0 {
            return None;
        }
        let end = glyphs.string_index_for_glyph_index(ellipsis);
        let start = self.graphemes.previous_break(glyphs.text(), end);
        let first = glyphs.glyph_index_for_string_index(start).min(ellipsis - 1);
        Some(first..ellipsis)
    }

    /// Glyphs of the grapheme cluster following the glyph `ellipsis`.
    fn cluster_after(&self, glyphs: &GlyphString, ellipsis: usize) -> Option<Range<usize>> {
        let first = ellipsis + 1;
        if first >= glyphs.len() {
            return None;
        }
        let start = glyphs.string_index_for_glyph_index(first);
        let end = self.graphemes.next_break(glyphs.text(), start);
        let last = glyphs.glyph_index_for_string_index(end).max(first + 1);
        Some(first..last)
    }
}
