// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slab decomposition of container polygons into line fragment rectangles.

use peniko::kurbo::{Point, Rect};

use super::Polygon;
use crate::layout::Container;
use crate::util::EPSILON;

/// Which side of a slab decomposition to keep.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pass {
    /// Keep the spans where the band lies entirely inside the polygon.
    Interior,
    /// Keep the spans where the band does not touch the polygon.
    Exterior,
}

/// Position of a vertex relative to a horizontal band.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    /// At or above the top edge of the band (smaller y).
    Below,
    Inside,
    /// At or below the bottom edge of the band (larger y).
    Above,
}

impl Side {
    fn classify(y: f64, band: &Rect) -> Self {
        if y <= band.y0 {
            Self::Below
        } else if y >= band.y1 {
            Self::Above
        } else {
            Self::Inside
        }
    }
}

/// A boundary of a span where some contour edge passes through the band.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Marker {
    Left(f64),
    Right(f64),
}

impl Marker {
    fn x(self) -> f64 {
        match self {
            Self::Left(x) | Self::Right(x) => x,
        }
    }
}

/// Computes the horizontal spans of a container available to a line.
#[derive(Copy, Clone, Debug, Default)]
pub struct LineFragmentGenerator;

impl LineFragmentGenerator {
    /// Returns the rectangles of `band` that lie inside the container polygon and
    /// outside its exclusion, from left to right.
    pub fn generate(band: Rect, container: &Container) -> Vec<Rect> {
        let interior = Self::split_band(band, container.polygon(), Pass::Interior);
        match container.exclusion() {
            Some(exclusion) => interior
                .into_iter()
                .flat_map(|rect| Self::split_band(rect, exclusion, Pass::Exterior))
                .collect(),
            None => interior,
        }
    }

    /// Splits `band` along the edges of `polygon` that cross it, keeping the spans
    /// selected by `pass`.
    pub fn split_band(band: Rect, polygon: &Polygon, pass: Pass) -> Vec<Rect> {
        let band = band.abs();
        if band.width() <= EPSILON || band.height() <= EPSILON {
            return Vec::new();
        }
        // Contours lying entirely inside the band do not bound it.
        let contours: Vec<&[Point]> = polygon
            .contours()
            .iter()
            .map(|contour| contour.as_slice())
            .filter(|contour| !within_band(contour, &band))
            .collect();
        let mut markers = Vec::new();
        for contour in &contours {
            contour_markers(contour, &band, &mut markers);
        }
        let blocked = sweep(markers);

        let mut rects = Vec::new();
        let mut cursor = band.x0;
        let mid_y = (band.y0 + band.y1) * 0.5;
        let mut push_gap = |x0: f64, x1: f64| {
            let (x0, x1) = (x0.max(band.x0), x1.min(band.x1));
            if x1 - x0 <= EPSILON {
                return;
            }
            let inside = winding_number(&contours, Point::new((x0 + x1) * 0.5, mid_y)) != 0;
            let keep = match pass {
                Pass::Interior => inside,
                Pass::Exterior => !inside,
            };
            if keep {
                rects.push(Rect::new(x0, band.y0, x1, band.y1));
            }
        };
        for (start, end) in blocked {
            if end < band.x0 {
                continue;
            }
            if start > band.x1 {
                break;
            }
            push_gap(cursor, start);
            cursor = cursor.max(end);
        }
        push_gap(cursor, band.x1);
        rects
    }
}

/// Whether every vertex of the contour lies strictly between the band edges.
fn within_band(contour: &[Point], band: &Rect) -> bool {
    contour
        .iter()
        .all(|point| Side::classify(point.y, band) == Side::Inside)
}

/// Emits a marker pair for every part of the contour that lies within the band.
fn contour_markers(contour: &[Point], band: &Rect, markers: &mut Vec<Marker>) {
    for (i, &from) in contour.iter().enumerate() {
        let to = contour[(i + 1) % contour.len()];
        let span = match (Side::classify(from.y, band), Side::classify(to.y, band)) {
            // The edge stays on one side of the band.
            (Side::Below, Side::Below) | (Side::Above, Side::Above) => continue,
            (Side::Inside, Side::Inside) => (from.x, to.x),
            (Side::Below, Side::Inside) => (x_intersection(from, to, band.y0), to.x),
            (Side::Inside, Side::Above) => (from.x, x_intersection(from, to, band.y1)),
            (Side::Above, Side::Inside) => (x_intersection(from, to, band.y1), to.x),
            (Side::Inside, Side::Below) => (from.x, x_intersection(from, to, band.y0)),
            (Side::Below, Side::Above) => (
                x_intersection(from, to, band.y0),
                x_intersection(from, to, band.y1),
            ),
            (Side::Above, Side::Below) => (
                x_intersection(from, to, band.y1),
                x_intersection(from, to, band.y0),
            ),
        };
        let (left, right) = if span.0 <= span.1 {
            span
        } else {
            (span.1, span.0)
        };
        markers.push(Marker::Left(left));
        markers.push(Marker::Right(right));
    }
}

/// X coordinate where the segment crosses the horizontal line at `y`.
fn x_intersection(from: Point, to: Point, y: f64) -> f64 {
    let dy = to.y - from.y;
    if dy.abs() <= f64::EPSILON {
        return from.x;
    }
    let t = ((y - from.y) / dy).clamp(0.0, 1.0);
    from.x + (to.x - from.x) * t
}

/// Merges markers into disjoint blocked spans, ordered by x.
fn sweep(mut markers: Vec<Marker>) -> Vec<(f64, f64)> {
    // Left markers sort first at equal x so touching spans merge.
    markers.sort_by(|a, b| {
        a.x().total_cmp(&b.x()).then_with(|| match (a, b) {
            (Marker::Left(_), Marker::Right(_)) => core::cmp::Ordering::Less,
            (Marker::Right(_), Marker::Left(_)) => core::cmp::Ordering::Greater,
            _ => core::cmp::Ordering::Equal,
        })
    });
    let mut spans = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0.0;
    for marker in markers {
        match marker {
            Marker::Left(x) => {
                if depth == 0 {
                    start = x;
                }
                depth += 1;
            }
            Marker::Right(x) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    spans.push((start, x));
                }
            }
        }
    }
    spans
}

/// Nonzero winding number of `point` with respect to `contours`.
fn winding_number(contours: &[&[Point]], point: Point) -> i32 {
    let mut winding = 0;
    for contour in contours {
        for (i, &a) in contour.iter().enumerate() {
            let b = contour[(i + 1) % contour.len()];
            let cross = (b.x - a.x) * (point.y - a.y) - (point.x - a.x) * (b.y - a.y);
            if a.y <= point.y {
                if b.y > point.y && cross > 0.0 {
                    winding += 1;
                }
            } else if b.y <= point.y && cross < 0.0 {
                winding -= 1;
            }
        }
    }
    winding
}
