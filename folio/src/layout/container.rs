// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use peniko::kurbo::{BezPath, Point, Rect};
use peniko::Color;

use crate::geometry::Polygon;
use crate::glyph::GlyphString;
use crate::style::{DecorationStyle, TabAlignment};
use crate::util::nearly_eq;

/// Default distance between columns.
pub const DEFAULT_COLUMN_GAP: f64 = 18.0;

/// Default distance between implicit tab stops.
pub const DEFAULT_TAB_INTERVAL: f64 = 80.0;

/// A region that text flows into.
///
/// Text fills the container polygon minus the optional exclusion, column by column.
/// Laid out paragraphs are appended to [`blocks`](Self::blocks).
#[derive(Clone, Debug)]
pub struct Container {
    polygon: Polygon,
    exclusion: Option<Polygon>,
    columns: usize,
    column_gap: f64,
    tab_stops: Vec<TabStop>,
    tab_interval: f64,
    pub(crate) blocks: Vec<Block>,
}

impl Container {
    /// A rectangular container.
    pub fn new(rect: Rect) -> Self {
        Self::from_polygon(Polygon::from_rect(rect))
    }

    /// A container shaped like `path`.
    pub fn from_path(path: &BezPath) -> Self {
        Self::from_polygon(Polygon::from_path(
            path,
            crate::geometry::DEFAULT_TOLERANCE,
        ))
    }

    /// A container shaped like `polygon`.
    pub fn from_polygon(polygon: Polygon) -> Self {
        Self {
            polygon,
            exclusion: None,
            columns: 1,
            column_gap: DEFAULT_COLUMN_GAP,
            tab_stops: Vec::new(),
            tab_interval: DEFAULT_TAB_INTERVAL,
            blocks: Vec::new(),
        }
    }

    /// Sets a region that text flows around.
    pub fn with_exclusion(mut self, exclusion: Polygon) -> Self {
        self.exclusion = (!exclusion.is_empty()).then_some(exclusion);
        self
    }

    /// Splits the container into `count` columns separated by `gap`.
    pub fn with_columns(mut self, count: usize, gap: f64) -> Self {
        self.columns = count.max(1);
        self.column_gap = gap.max(0.0);
        self
    }

    /// Sets the explicit tab stops.
    pub fn with_tab_stops(mut self, stops: impl IntoIterator<Item = TabStop>) -> Self {
        self.tab_stops = stops.into_iter().collect();
        self.tab_stops.sort_by(|a, b| a.x.total_cmp(&b.x));
        self
    }

    /// Sets the distance between implicit tab stops past the last explicit one.
    pub fn with_tab_interval(mut self, interval: f64) -> Self {
        self.tab_interval = interval;
        self
    }

    /// The container outline.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// The region text flows around.
    pub fn exclusion(&self) -> Option<&Polygon> {
        self.exclusion.as_ref()
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Gap between columns.
    pub fn column_gap(&self) -> f64 {
        self.column_gap
    }

    /// Explicit tab stops, sorted by position.
    pub fn tab_stops(&self) -> &[TabStop] {
        &self.tab_stops
    }

    /// Distance between implicit tab stops.
    pub fn tab_interval(&self) -> f64 {
        self.tab_interval
    }

    /// Bounds of the container polygon.
    pub fn bounding_box(&self) -> Rect {
        self.polygon.bounding_box()
    }

    /// Splits the bounding box into equally wide columns.
    pub fn column_rects(&self) -> Vec<Rect> {
        let bbox = self.bounding_box();
        let count = self.columns as f64;
        let width = ((bbox.width() - self.column_gap * (count - 1.0)) / count).max(0.0);
        (0..self.columns)
            .map(|column| {
                let x0 = bbox.x0 + column as f64 * (width + self.column_gap);
                Rect::new(x0, bbox.y0, x0 + width, bbox.y1)
            })
            .collect()
    }

    /// Paragraphs laid out into this container.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Removes the result of previous layouts.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}

/// A tab stop, measured from the left edge of a line fragment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TabStop {
    /// Position of the stop.
    pub x: f64,
    /// How text following the tab aligns to the stop.
    pub align: TabAlignment,
}

impl TabStop {
    /// Creates a tab stop.
    pub fn new(x: f64, align: TabAlignment) -> Self {
        Self { x, align }
    }
}

/// The lines of one paragraph that landed in a container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub(crate) text_range: Range<usize>,
    pub(crate) lines: Vec<LineFragment>,
    pub(crate) truncated: bool,
}

impl Block {
    /// Byte range of the paragraph in the laid out text.
    pub fn text_range(&self) -> Range<usize> {
        self.text_range.clone()
    }

    /// The line fragments, in layout order.
    pub fn lines(&self) -> &[LineFragment] {
        &self.lines
    }

    /// Whether text following this block did not fit and was left out.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// One contiguous piece of a line.
///
/// A line crossing an exclusion or a concave part of the container produces one
/// fragment per available span.
#[derive(Clone, Debug, PartialEq)]
pub struct LineFragment {
    pub(crate) rect: Rect,
    pub(crate) glyphs: GlyphString,
    pub(crate) text_range: Range<usize>,
    pub(crate) offset_x: f64,
    pub(crate) overflow_left: f64,
    pub(crate) overflow_right: f64,
    pub(crate) decoration_lines: Vec<DecorationLine>,
    pub(crate) truncated: bool,
}

impl LineFragment {
    /// Creates a fragment placing `glyphs` into `rect`.
    pub fn new(rect: Rect, glyphs: GlyphString) -> Self {
        let text_range = 0..glyphs.text().len();
        Self {
            rect,
            glyphs,
            text_range,
            offset_x: 0.0,
            overflow_left: 0.0,
            overflow_right: 0.0,
            decoration_lines: Vec::new(),
            truncated: false,
        }
    }

    /// The box the fragment occupies, widened by its overflow.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The glyphs of the fragment.
    pub fn glyphs(&self) -> &GlyphString {
        &self.glyphs
    }

    /// Mutable access to the glyphs.
    pub fn glyphs_mut(&mut self) -> &mut GlyphString {
        &mut self.glyphs
    }

    /// Byte range of the source text that produced the fragment.
    ///
    /// Covers the text before any hyphen or ellipsis insertion.
    pub fn text_range(&self) -> Range<usize> {
        self.text_range.clone()
    }

    /// Horizontal offset of the first glyph from the left edge of [`rect`](Self::rect).
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Width hanging into the left edge.
    pub fn overflow_left(&self) -> f64 {
        self.overflow_left
    }

    /// Width hanging past the right edge.
    pub fn overflow_right(&self) -> f64 {
        self.overflow_right
    }

    /// Underlines and strikethroughs, relative to the glyph origin.
    pub fn decoration_lines(&self) -> &[DecorationLine] {
        &self.decoration_lines
    }

    /// Whether content was replaced with an ellipsis, or text after this line was left
    /// out.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Total advance of the glyphs.
    pub fn advance_width(&self) -> f64 {
        self.glyphs.advance_width()
    }

    /// Y coordinate of the baseline.
    pub fn baseline(&self) -> f64 {
        self.rect.y0 + self.glyphs.ascent()
    }

    /// Position of the pen at the first glyph.
    pub fn origin(&self) -> Point {
        Point::new(self.rect.x0 + self.offset_x, self.baseline())
    }
}

/// A rectangle drawn under or through text.
///
/// Rectangles are relative to the left edge of the first glyph and the top of the line
/// fragment they belong to.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorationLine {
    /// Area of the stroke.
    pub rect: Rect,
    /// Stroke color.
    pub color: Color,
    /// Stroke style.
    pub style: DecorationStyle,
}

impl DecorationLine {
    /// Creates a decoration line.
    pub fn new(rect: Rect, color: Color, style: DecorationStyle) -> Self {
        Self { rect, color, style }
    }

    /// Extends this line by `other` if it starts where this one ends with the same
    /// vertical extent, color and style.
    pub fn merge(&mut self, other: &Self) -> bool {
        let joinable = nearly_eq(self.rect.x1, other.rect.x0)
            && nearly_eq(self.rect.y0, other.rect.y0)
            && nearly_eq(self.rect.height(), other.rect.height())
            && self.color == other.color
            && self.style == other.style;
        if joinable {
            self.rect.x1 = other.rect.x1;
        }
        joinable
    }
}

#[cfg(test)]
mod tests {
    use super::{Container, DecorationLine, TabStop};
    use crate::style::{DecorationStyle, TabAlignment};
    use peniko::color::palette::css;
    use peniko::kurbo::Rect;

    #[test]
    fn columns_split_the_bounding_box() {
        let container = Container::new(Rect::new(0.0, 0.0, 220.0, 100.0)).with_columns(2, 20.0);
        let columns = container.column_rects();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(columns[1], Rect::new(120.0, 0.0, 220.0, 100.0));
    }

    #[test]
    fn tab_stops_are_sorted() {
        let container = Container::new(Rect::new(0.0, 0.0, 100.0, 100.0)).with_tab_stops([
            TabStop::new(60.0, TabAlignment::Right),
            TabStop::new(20.0, TabAlignment::Left),
        ]);
        assert_eq!(container.tab_stops()[0].x, 20.0);
    }

    #[test]
    fn touching_lines_merge() {
        let mut line = DecorationLine::new(
            Rect::new(0.0, 10.0, 5.0, 11.0),
            css::BLACK,
            DecorationStyle::Solid,
        );
        let next = DecorationLine::new(
            Rect::new(5.0, 10.0, 9.0, 11.0),
            css::BLACK,
            DecorationStyle::Solid,
        );
        assert!(line.merge(&next));
        assert_eq!(line.rect.x1, 9.0);

        let red = DecorationLine::new(
            Rect::new(9.0, 10.0, 12.0, 11.0),
            css::RED,
            DecorationStyle::Solid,
        );
        assert!(!line.merge(&red));
    }
}
