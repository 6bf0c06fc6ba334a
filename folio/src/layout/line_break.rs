// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking with hyphenation.

use core::ops::Range;

use crate::analysis::{
    BreakOpportunity, Capabilities, GraphemeOracle, Hyphenator, LineBreakOracle,
};
use crate::glyph::GlyphString;
use crate::util::EPSILON;

/// Character inserted at hyphenation points.
pub const HYPHEN: char = '-';

/// How far a hyphenated line may exceed the available width, as a fraction of it.
///
/// Lines within the tolerance are shrunk by justification.
pub const HYPHENATION_TOLERANCE: f64 = 0.04;

/// Where a line ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineBreak {
    /// Index of the first glyph of the next line.
    pub glyph_index: usize,
    /// Whether the break is mandatory.
    pub required: bool,
    /// Whether a hyphen glyph was inserted before the break.
    pub hyphenated: bool,
}

/// Chooses line breaks in a glyph string.
#[derive(Copy, Clone)]
pub struct LineBreaker<'a> {
    line_breaks: &'a dyn LineBreakOracle,
    graphemes: &'a dyn GraphemeOracle,
    hyphenator: &'a dyn Hyphenator,
}

impl core::fmt::Debug for LineBreaker<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LineBreaker").finish_non_exhaustive()
    }
}

impl<'a> LineBreaker<'a> {
    /// Creates a line breaker from its oracles.
    pub fn new(
        line_breaks: &'a dyn LineBreakOracle,
        graphemes: &'a dyn GraphemeOracle,
        hyphenator: &'a dyn Hyphenator,
    ) -> Self {
        Self {
            line_breaks,
            graphemes,
            hyphenator,
        }
    }

    /// Creates a line breaker using the oracles of `capabilities`.
    pub fn from_capabilities(capabilities: &'a Capabilities) -> Self {
        Self::new(
            &*capabilities.line_breaks,
            &*capabilities.graphemes,
            &*capabilities.hyphenator,
        )
    }

    /// Finds the end of the line starting at glyph `start` that fits into `width`.
    ///
    /// Trailing whitespace never causes an overflow. Returns `None` when not even the
    /// first glyph fits. If every remaining glyph fits, the break is the first mandatory
    /// one. Otherwise the last break opportunity before the overflowing glyph is used, and
    /// a line filling less than `hyphenation_factor` of `width` tries to hyphenate the next
    /// word. Without any opportunity the line is broken at the last grapheme boundary that
    /// fits.
    ///
    /// Hyphenation inserts a hyphen glyph into `glyphs`.
    pub fn suggest_line_break(
        &self,
        glyphs: &mut GlyphString,
        start: usize,
        width: f64,
        hyphenation_factor: f32,
    ) -> Option<LineBreak> {
        if start >= glyphs.len() {
            return None;
        }
        let overflow = overflow_index(glyphs, start, width);
        if overflow == Some(start) {
            log::trace!("Glyph {start} does not fit into {width}");
            return None;
        }
        let start_si = glyphs.string_index_for_glyph_index(start);
        let opportunities: Vec<BreakOpportunity> = self
            .line_breaks
            .break_opportunities(&glyphs.text()[start_si..])
            .into_iter()
            .map(|opportunity| BreakOpportunity {
                position: opportunity.position + start_si,
                ..opportunity
            })
            .collect();

        let Some(overflow) = overflow else {
            let position = opportunities
                .iter()
                .find(|opportunity| opportunity.required)
                .map_or(glyphs.text().len(), |opportunity| opportunity.position);
            return Some(LineBreak {
                glyph_index: glyphs.glyph_index_for_string_index(position).max(start + 1),
                required: true,
                hyphenated: false,
            });
        };

        let overflow_si = glyphs.string_index_for_glyph_index(overflow);
        let mut candidate = None;
        for opportunity in &opportunities {
            if opportunity.position > overflow_si {
                break;
            }
            let glyph_index = glyphs.glyph_index_for_string_index(opportunity.position);
            if glyph_index <= start {
                continue;
            }
            if opportunity.required {
                return Some(LineBreak {
                    glyph_index,
                    required: true,
                    hyphenated: false,
                });
            }
            candidate = Some((opportunity.position, glyph_index));
        }

        let (word_start, line_width) = match candidate {
            Some((position, glyph_index)) => (position, trimmed_width(glyphs, start..glyph_index)),
            None => (start_si, 0.0),
        };
        if hyphenation_factor > 0.0 && line_width < f64::from(hyphenation_factor) * width {
            let word_end = opportunities
                .iter()
                .map(|opportunity| opportunity.position)
                .find(|&position| position > word_start)
                .unwrap_or(glyphs.text().len());
            if let Some(glyph_index) = self.hyphenate(glyphs, start, word_start..word_end, width)
            {
                return Some(LineBreak {
                    glyph_index,
                    required: false,
                    hyphenated: true,
                });
            }
        }

        match candidate {
            Some((_, glyph_index)) => Some(LineBreak {
                glyph_index,
                required: false,
                hyphenated: false,
            }),
            None => Some(self.emergency_break(glyphs, start, overflow)),
        }
    }

    /// Breaks after the first grapheme cluster at `start`, regardless of width.
    pub fn force_break(&self, glyphs: &GlyphString, start: usize) -> Option<LineBreak> {
        if start >= glyphs.len() {
            return None;
        }
        let start_si = glyphs.string_index_for_glyph_index(start);
        let position = self.graphemes.next_break(glyphs.text(), start_si);
        Some(LineBreak {
            glyph_index: glyphs.glyph_index_for_string_index(position).max(start + 1),
            required: false,
            hyphenated: false,
        })
    }

    /// Breaks at the last grapheme boundary before the overflowing glyph.
    fn emergency_break(&self, glyphs: &GlyphString, start: usize, overflow: usize) -> LineBreak {
        let text = glyphs.text();
        let start_si = glyphs.string_index_for_glyph_index(start);
        let overflow_si = glyphs.string_index_for_glyph_index(overflow);
        let mut position = self.graphemes.previous_break(text, overflow_si + 1);
        if position <= start_si {
            position = self.graphemes.next_break(text, start_si);
        }
        log::trace!("Emergency break at byte {position}");
        LineBreak {
            glyph_index: glyphs.glyph_index_for_string_index(position).max(start + 1),
            required: false,
            hyphenated: false,
        }
    }

    /// Inserts a hyphen at the last syllable boundary of `word` that still fits and
    /// returns the index of the glyph following it.
    fn hyphenate(
        &self,
        glyphs: &mut GlyphString,
        start: usize,
        word: Range<usize>,
        width: f64,
    ) -> Option<usize> {
        let text = &glyphs.text()[word.clone()];
        let lead = text.len() - text.trim_start_matches(|ch: char| !ch.is_alphabetic()).len();
        let body = text[lead..].trim_end_matches(|ch: char| !ch.is_alphabetic());
        let syllables = self.hyphenator.hyphenate(body);
        if syllables.len() < 2 {
            return None;
        }
        let mut boundary = word.start + lead;
        let boundaries: Vec<usize> = syllables[..syllables.len() - 1]
            .iter()
            .map(|syllable| {
                boundary += syllable.len();
                boundary
            })
            .collect();

        let first = glyphs.glyph_index_for_string_index(word.start + lead);
        let run = glyphs.run_index_at_glyph_index(first.max(start))?;
        let hyphen_width = f64::from(glyphs.runs()[run].synthesize(HYPHEN).1.x_advance);
        let budget = width * (1.0 + HYPHENATION_TOLERANCE);

        let mut best = None;
        for boundary in boundaries {
            let glyph_index = glyphs.glyph_index_for_string_index(boundary);
            if glyph_index <= start {
                continue;
            }
            if glyphs.advance_width_of(start..glyph_index) + hyphen_width > budget + EPSILON {
                break;
            }
            best = Some(glyph_index);
        }
        let glyph_index = best?;
        glyphs.insert_glyph(glyph_index, HYPHEN).ok()?;
        log::trace!("Hyphenated before glyph {glyph_index}");
        Some(glyph_index + 1)
    }
}

/// Index of the first glyph at or after `start` whose right edge exceeds `width`.
///
/// Whitespace glyphs may hang past the edge.
fn overflow_index(glyphs: &GlyphString, start: usize, width: f64) -> Option<usize> {
    let mut x = 0.0;
    for (index, (glyph, position)) in glyphs
        .glyphs()
        .zip(glyphs.positions())
        .enumerate()
        .skip(start)
    {
        x += f64::from(position.x_advance);
        if !glyph.is_whitespace() && x > width + EPSILON {
            return Some(index);
        }
    }
    None
}

/// Advance of the glyphs in `range` without trailing whitespace.
pub(crate) fn trimmed_width(glyphs: &GlyphString, range: Range<usize>) -> f64 {
    let mut end = range.end;
    while end > range.start && glyphs.glyph(end - 1).is_some_and(|glyph| glyph.is_whitespace()) {
        end -= 1;
    }
    glyphs.advance_width_of(range.start..end)
}
