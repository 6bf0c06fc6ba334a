// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Underline and strikethrough geometry.

use peniko::color::palette::css;
use peniko::kurbo::{Affine, BezPath, PathEl, Point, Rect, Vec2};

use super::{DecorationLine, LineFragment};
use crate::glyph::GlyphRun;
use crate::util::EPSILON;

/// Computes decoration lines for line fragments.
#[derive(Copy, Clone, Debug, Default)]
pub struct DecorationEngine;

impl DecorationEngine {
    /// Replaces the decoration lines of `line` with those requested by its runs.
    ///
    /// Underlines sit below the baseline and are interrupted wherever a glyph outline
    /// crosses them. Strikethroughs run through a third of the run ascent.
    pub fn create_decoration_lines(line: &mut LineFragment) {
        let ascent = line.glyphs.ascent();
        let mut underlines: Vec<DecorationLine> = Vec::new();
        let mut strikes: Vec<DecorationLine> = Vec::new();
        let mut x = 0.0;
        for run in line.glyphs.runs() {
            let width = run.advance_width();
            let style = run.style();
            let thickness = thickness(run.font_size());
            if style.underline == Some(true) {
                let decoration = DecorationLine::new(
                    Rect::new(x, ascent, x + width, ascent + thickness),
                    style.underline_color.or(style.color).unwrap_or(css::BLACK),
                    style.underline_style.unwrap_or_default(),
                );
                push_merged(&mut underlines, decoration);
            }
            if style.strike == Some(true) {
                let y = ascent - run.ascent() / 3.0;
                let decoration = DecorationLine::new(
                    Rect::new(x, y, x + width, y + thickness),
                    style.strike_color.or(style.color).unwrap_or(css::BLACK),
                    style.strike_style.unwrap_or_default(),
                );
                push_merged(&mut strikes, decoration);
            }
            x += width;
        }

        let mut lines = Vec::with_capacity(underlines.len() + strikes.len());
        for mut underline in underlines {
            let thickness = underline.rect.height();
            underline.rect = underline.rect + Vec2::new(0.0, 2.0 * thickness);
            let ink = ink_ranges(line, ascent, &underline.rect);
            for (x0, x1) in gaps(underline.rect.x0, underline.rect.x1, &ink, thickness.ceil()) {
                let mut segment = underline.clone();
                segment.rect.x0 = x0;
                segment.rect.x1 = x1;
                lines.push(segment);
            }
        }
        lines.extend(strikes);
        line.decoration_lines = lines;
    }
}

/// Stroke thickness for a font size.
fn thickness(font_size: f32) -> f64 {
    (f64::from(font_size) / 16.0).floor().max(0.5)
}

fn push_merged(lines: &mut Vec<DecorationLine>, line: DecorationLine) {
    if let Some(last) = lines.last_mut() {
        if last.merge(&line) {
            return;
        }
    }
    lines.push(line);
}

/// Merged horizontal extents of the glyph outlines that cross `band`.
fn ink_ranges(line: &LineFragment, baseline: f64, band: &Rect) -> Vec<(f64, f64)> {
    let mut ranges = Vec::new();
    let mut x = 0.0;
    for run in line.glyphs.runs() {
        for (glyph, position) in run.glyphs().iter().zip(run.positions()) {
            let advance = f64::from(position.x_advance);
            let overlaps = x < band.x1 && x + advance > band.x0;
            if overlaps {
                if let Some(outline) = run.font().glyph_outline(glyph.id) {
                    let origin = Point::new(
                        x + f64::from(position.x_offset),
                        baseline - f64::from(position.y_offset),
                    );
                    if let Some(range) = crossing_range(&to_line_space(run, &outline, origin), band)
                    {
                        ranges.push(range);
                    }
                }
            }
            x += advance;
        }
    }
    ranges.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Scales a font unit outline to pixels and flips it to y-down at `origin`.
fn to_line_space(run: &GlyphRun, outline: &BezPath, origin: Point) -> BezPath {
    let scale = f64::from(run.scale());
    Affine::translate(origin.to_vec2()) * Affine::scale_non_uniform(scale, -scale) * outline.clone()
}

/// Horizontal extent of the part of the outline's control polyline inside the band.
fn crossing_range(path: &BezPath, band: &Rect) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    let mut include = |x: f64| {
        range = Some(range.map_or((x, x), |(lo, hi)| (lo.min(x), hi.max(x))));
    };
    let mut start = Point::ZERO;
    let mut current = Point::ZERO;
    for el in path.elements() {
        let (from, to) = match *el {
            PathEl::MoveTo(p) => {
                start = p;
                current = p;
                continue;
            }
            PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => (current, p),
            PathEl::ClosePath => (current, start),
        };
        current = to;
        for point in [from, to] {
            if point.y >= band.y0 && point.y <= band.y1 {
                include(point.x);
            }
        }
        let dy = to.y - from.y;
        if dy.abs() > EPSILON {
            for y in [band.y0, band.y1] {
                let t = (y - from.y) / dy;
                if (0.0..=1.0).contains(&t) {
                    include(from.x + (to.x - from.x) * t);
                }
            }
        }
    }
    range
}

/// Spans of `x0..x1` not covered by `ink` dilated by `dilation`, wider than `dilation`.
fn gaps(x0: f64, x1: f64, ink: &[(f64, f64)], dilation: f64) -> Vec<(f64, f64)> {
    let mut gaps = Vec::new();
    let mut cursor = x0;
    for &(start, end) in ink {
        let start = (start - dilation).max(x0);
        let end = (end + dilation).min(x1);
        if start > cursor {
            gaps.push((cursor, start));
        }
        cursor = cursor.max(end);
    }
    if x1 > cursor {
        gaps.push((cursor, x1));
    }
    gaps.retain(|(start, end)| end - start > dilation);
    gaps
}

#[cfg(test)]
mod tests {
    use super::{crossing_range, gaps, thickness};
    use peniko::kurbo::{BezPath, Rect};

    #[test]
    fn thickness_scales_with_font_size() {
        assert_eq!(thickness(12.0), 0.5);
        assert_eq!(thickness(16.0), 1.0);
        assert_eq!(thickness(40.0), 2.0);
    }

    #[test]
    fn polyline_crossing() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 20.0));
        path.line_to((20.0, 0.0));
        path.close_path();
        let range = crossing_range(&path, &Rect::new(0.0, 5.0, 100.0, 10.0));
        assert_eq!(range, Some((2.5, 17.5)));
        assert_eq!(crossing_range(&path, &Rect::new(0.0, 30.0, 100.0, 40.0)), None);
    }

    #[test]
    fn gaps_skip_dilated_ink_and_slivers() {
        let spans = gaps(0.0, 100.0, &[(20.0, 30.0), (33.0, 40.0)], 2.0);
        assert_eq!(spans, vec![(0.0, 18.0), (42.0, 100.0)]);
    }
}
