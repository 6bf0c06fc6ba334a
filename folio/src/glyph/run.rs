// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::font::{FontHandle, Glyph, GlyphPosition, ShapedText};
use crate::style::Style;

/// The object replacement character, stands in for attachments.
pub(crate) const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// A sequence of glyphs sharing one style and font.
///
/// The glyph, position and string index vectors are parallel. Positions are in pixels.
/// String indices are byte offsets into the text of the owning [`GlyphString`], pointing
/// at the first character of each glyph's cluster.
///
/// [`GlyphString`]: super::GlyphString
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRun {
    pub(crate) range: Range<usize>,
    pub(crate) text_range: Range<usize>,
    pub(crate) style: Style,
    pub(crate) font: FontHandle,
    pub(crate) font_size: f32,
    pub(crate) glyphs: Vec<Glyph>,
    pub(crate) positions: Vec<GlyphPosition>,
    pub(crate) string_indices: Vec<usize>,
}

impl GlyphRun {
    /// Builds a run from shaper output for the text at `text_range`.
    pub(crate) fn from_shaped(
        text_range: Range<usize>,
        style: Style,
        font: FontHandle,
        shaped: ShapedText,
    ) -> Self {
        let font_size = style.resolved_font_size();
        let mut run = Self {
            range: 0..0,
            text_range: text_range.clone(),
            style,
            font,
            font_size,
            glyphs: Vec::with_capacity(shaped.glyphs.len()),
            positions: Vec::with_capacity(shaped.glyphs.len()),
            string_indices: shaped
                .string_indices
                .iter()
                .map(|index| index + text_range.start)
                .collect(),
        };
        let scale = run.scale();
        for (glyph, position) in shaped.glyphs.into_iter().zip(shaped.positions) {
            let mut position = GlyphPosition {
                x_advance: position.x_advance * scale,
                y_advance: position.y_advance * scale,
                x_offset: position.x_offset * scale,
                y_offset: position.y_offset * scale,
            };
            run.apply_spacing(&glyph, &mut position);
            run.glyphs.push(glyph);
            run.positions.push(position);
        }
        run
    }

    /// Nominal glyph and position for `ch` in this run's font and style.
    pub(crate) fn synthesize(&self, ch: char) -> (Glyph, GlyphPosition) {
        let glyph = self.font.glyph_for_code_point(ch);
        let mut position = GlyphPosition::advance(glyph.advance_width * self.scale());
        self.apply_spacing(&glyph, &mut position);
        (glyph, position)
    }

    fn apply_spacing(&self, glyph: &Glyph, position: &mut GlyphPosition) {
        if glyph.is_char(OBJECT_REPLACEMENT) {
            if let Some(attachment) = self.style.attachment {
                position.x_advance = attachment.width;
            }
        }
        position.x_advance += self.style.character_spacing.unwrap_or(0.0);
        if glyph.is_whitespace() {
            position.x_advance += self.style.word_spacing.unwrap_or(0.0);
        }
        position.y_offset += self.style.y_offset.unwrap_or(0.0);
    }

    /// Glyph indices covered by this run within its glyph string.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Byte range of the glyph string's text covered by this run.
    pub fn text_range(&self) -> Range<usize> {
        self.text_range.clone()
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns `true` if the run has no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The resolved style of the run.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// The font the run was shaped with.
    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    /// Font size in pixels.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Factor converting font units to pixels.
    pub fn scale(&self) -> f32 {
        self.font.scale(self.font_size)
    }

    /// Bidi embedding level.
    pub fn level(&self) -> u8 {
        self.style.bidi_level.unwrap_or(0)
    }

    /// The glyphs of the run.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Pixel positions of the glyphs.
    pub fn positions(&self) -> &[GlyphPosition] {
        &self.positions
    }

    /// Cluster start offset of each glyph.
    pub fn string_indices(&self) -> &[usize] {
        &self.string_indices
    }

    /// Maps every byte of [`text_range`](Self::text_range) to a glyph index local to the run.
    ///
    /// Bytes inside a cluster map to the cluster's first glyph; bytes before the first
    /// glyph map to `0`.
    pub fn glyph_indices(&self) -> Vec<usize> {
        let mut indices: Vec<Option<usize>> = vec![None; self.text_range.len()];
        for (glyph, &index) in self.string_indices.iter().enumerate() {
            if let Some(slot) = index
                .checked_sub(self.text_range.start)
                .and_then(|offset| indices.get_mut(offset))
            {
                slot.get_or_insert(glyph);
            }
        }
        let mut previous = 0;
        indices
            .into_iter()
            .map(|slot| {
                if let Some(glyph) = slot {
                    previous = glyph;
                }
                previous
            })
            .collect()
    }

    /// Sum of the glyph advances in pixels.
    pub fn advance_width(&self) -> f64 {
        self.positions
            .iter()
            .map(|position| f64::from(position.x_advance))
            .sum()
    }

    /// Distance from the baseline to the top of the run, in pixels.
    pub fn ascent(&self) -> f64 {
        let ascent = f64::from(self.font.metrics().ascent * self.scale());
        match self.style.attachment {
            Some(attachment) => ascent.max(f64::from(attachment.height)),
            None => ascent,
        }
    }

    /// Distance from the baseline to the bottom of the run, negative below the baseline.
    pub fn descent(&self) -> f64 {
        f64::from(self.font.metrics().descent * self.scale())
    }

    /// Recommended line gap in pixels.
    pub fn line_gap(&self) -> f64 {
        f64::from(self.font.metrics().line_gap * self.scale())
    }

    /// Line height of the run in pixels.
    pub fn height(&self) -> f64 {
        self.ascent() - self.descent() + self.line_gap()
    }

    /// Reverses the glyphs into right-to-left visual order.
    pub(crate) fn reverse(&mut self) {
        self.glyphs.reverse();
        self.positions.reverse();
        self.string_indices.reverse();
    }
}
