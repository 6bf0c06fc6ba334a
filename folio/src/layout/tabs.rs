// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Container, LineFragment, TabStop};
use crate::glyph::GlyphString;
use crate::style::TabAlignment;

/// Resolves the advances of tab characters.
#[derive(Copy, Clone, Debug, Default)]
pub struct TabEngine;

impl TabEngine {
    /// Sets the advance of every tab glyph of `line` so that the following text aligns
    /// with the next tab stop of `container`.
    ///
    /// Past the last explicit stop, left aligned stops repeat every
    /// [`tab_interval`](Container::tab_interval).
    pub fn process_line_fragment(line: &mut LineFragment, container: &Container) {
        let glyphs = &mut line.glyphs;
        for index in 0..glyphs.len() {
            if !glyphs.glyph(index).is_some_and(|glyph| glyph.is_char('\t')) {
                continue;
            }
            let pen = glyphs.offset_at_glyph_index(index);
            let Some(stop) = next_stop(container, pen) else {
                continue;
            };
            let mut advance = stop.x - pen;
            let factor = match stop.align {
                TabAlignment::Left => 0.0,
                TabAlignment::Center => 0.5,
                TabAlignment::Right | TabAlignment::Decimal => 1.0,
            };
            if factor > 0.0 {
                advance -= aligned_width(glyphs, index + 1, stop.align) * factor;
            }
            if let Some(position) = glyphs.position_mut(index) {
                position.x_advance = advance.max(0.0) as f32;
            }
        }
    }
}

/// The first explicit stop at or after `pen`, or the next implicit one.
fn next_stop(container: &Container, pen: f64) -> Option<TabStop> {
    let stops = container.tab_stops();
    let index = stops.partition_point(|stop| stop.x < pen);
    if let Some(stop) = stops.get(index) {
        return Some(*stop);
    }
    let interval = container.tab_interval();
    if interval <= 0.0 {
        return None;
    }
    let x = ((pen / interval).floor() + 1.0) * interval;
    Some(TabStop::new(x, TabAlignment::Left))
}

/// Width of the text following a tab up to its terminator.
///
/// Decimal stops end at a full stop and include half of it.
fn aligned_width(glyphs: &GlyphString, start: usize, align: TabAlignment) -> f64 {
    let mut width = 0.0;
    for (glyph, position) in glyphs.glyphs().zip(glyphs.positions()).skip(start) {
        let advance = f64::from(position.x_advance);
        if glyph.is_char('\t') {
            break;
        }
        if align == TabAlignment::Decimal && glyph.is_char('.') {
            width += advance * 0.5;
            break;
        }
        width += advance;
    }
    width
}
