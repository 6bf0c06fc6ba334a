// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::{BezPath, Rect, Shape};
use smallvec::SmallVec;

use crate::font::{Font, FontMetrics, Glyph, GlyphId, GlyphPosition, ShapedText};
use crate::style::{FontFeature, ScriptTag};

const UNITS_PER_EM: f32 = 1024.0;
const ADVANCE: f32 = 512.0;
const ASCENT: f32 = 768.0;
const DESCENT: f32 = -256.0;
const CAP_HEIGHT: f64 = 640.0;
const NOTDEF: GlyphId = 0;
const FI_LIGATURE: GlyphId = 0xFB01;

/// A monospace font with box outlines.
///
/// Every character advances half an em except combining marks, which have no advance
/// and join the cluster of the preceding glyph. Letters with descenders reach down to
/// the descent line.
#[derive(Clone, Debug, Default)]
pub(crate) struct TestFont {
    missing: Vec<char>,
    ligatures: bool,
}

impl TestFont {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Characters the font has no glyph for.
    pub(crate) fn with_missing(mut self, chars: &str) -> Self {
        self.missing.extend(chars.chars());
        self
    }

    /// Shapes "fi" into a single ligature glyph.
    pub(crate) fn with_ligatures(mut self) -> Self {
        self.ligatures = true;
        self
    }

    fn glyph_id(&self, ch: char) -> GlyphId {
        if self.missing.contains(&ch) {
            NOTDEF
        } else {
            u32::from(ch)
        }
    }
}

fn is_mark(ch: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&ch)
}

impl Font for TestFont {
    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: ASCENT,
            descent: DESCENT,
            line_gap: 0.0,
            units_per_em: UNITS_PER_EM,
        }
    }

    fn layout(
        &self,
        text: &str,
        _features: &[FontFeature],
        _script: Option<ScriptTag>,
    ) -> ShapedText {
        let mut shaped = ShapedText::default();
        let mut chars = text.char_indices().peekable();
        while let Some((index, ch)) = chars.next() {
            if self.ligatures && ch == 'f' && chars.peek().is_some_and(|&(_, next)| next == 'i') {
                chars.next();
                shaped.glyphs.push(Glyph {
                    id: FI_LIGATURE,
                    code_points: SmallVec::from_slice(&['f', 'i']),
                    advance_width: ADVANCE,
                });
                shaped.positions.push(GlyphPosition::advance(ADVANCE));
                shaped.string_indices.push(index);
                continue;
            }
            let glyph = self.glyph_for_code_point(ch);
            let cluster = match shaped.string_indices.last() {
                Some(&previous) if is_mark(ch) => previous,
                _ => index,
            };
            shaped.positions.push(GlyphPosition::advance(glyph.advance_width));
            shaped.glyphs.push(glyph);
            shaped.string_indices.push(cluster);
        }
        shaped
    }

    fn glyph_for_code_point(&self, ch: char) -> Glyph {
        let advance = if is_mark(ch) { 0.0 } else { ADVANCE };
        Glyph::new(self.glyph_id(ch), ch, advance)
    }

    fn has_glyph_for_code_point(&self, ch: char) -> bool {
        !self.missing.contains(&ch)
    }

    fn glyph_outline(&self, id: GlyphId) -> Option<BezPath> {
        let bottom = match char::from_u32(id) {
            _ if id == NOTDEF => return None,
            Some(ch) if ch.is_whitespace() || is_mark(ch) => return None,
            Some('g' | 'j' | 'p' | 'q' | 'y') => f64::from(DESCENT),
            _ => 0.0,
        };
        Some(Rect::new(64.0, bottom, 448.0, CAP_HEIGHT).to_path(0.1))
    }
}
