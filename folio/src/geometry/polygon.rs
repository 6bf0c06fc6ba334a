// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::{self, BezPath, PathEl, Point, Rect, Shape};

/// Flattening tolerance used for paths converted to polygons.
pub(crate) const DEFAULT_TOLERANCE: f64 = 0.1;

/// A set of closed polylines.
///
/// Every contour is canonicalized to clockwise orientation, which in the y-down
/// coordinate system used for layout means a positive signed area. Contours with fewer
/// than three distinct points are dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    contours: Vec<Vec<Point>>,
}

impl Polygon {
    /// Creates a polygon from contours, canonicalizing their orientation.
    pub fn new(contours: impl IntoIterator<Item = Vec<Point>>) -> Self {
        let contours = contours
            .into_iter()
            .filter_map(|mut contour| {
                if contour.len() > 1 && contour.first() == contour.last() {
                    contour.pop();
                }
                if contour.len() < 3 {
                    return None;
                }
                if signed_area(&contour) < 0.0 {
                    contour.reverse();
                }
                Some(contour)
            })
            .collect();
        Self { contours }
    }

    /// A single rectangular contour.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new([vec![
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ]])
    }

    /// Flattens the curves of `path` into polylines within `tolerance`.
    ///
    /// Each subpath becomes a contour; open subpaths are closed implicitly.
    pub fn from_path(path: &BezPath, tolerance: f64) -> Self {
        let mut contours = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        kurbo::flatten(path.iter(), tolerance, |el| match el {
            PathEl::MoveTo(p) => {
                if !current.is_empty() {
                    contours.push(core::mem::take(&mut current));
                }
                current.push(p);
            }
            PathEl::LineTo(p) => current.push(p),
            PathEl::ClosePath => {
                if !current.is_empty() {
                    contours.push(core::mem::take(&mut current));
                }
            }
            // Flattening only emits lines.
            PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => current.push(p),
        });
        if !current.is_empty() {
            contours.push(current);
        }
        Self::new(contours)
    }

    /// Flattens any kurbo shape, such as a circle or rounded rectangle.
    pub fn from_shape(shape: &impl Shape, tolerance: f64) -> Self {
        Self::from_path(&shape.to_path(tolerance), tolerance)
    }

    /// The contours of the polygon.
    pub fn contours(&self) -> &[Vec<Point>] {
        &self.contours
    }

    /// Returns `true` if the polygon has no contours.
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Smallest rectangle containing every contour.
    pub fn bounding_box(&self) -> Rect {
        let mut points = self.contours.iter().flatten();
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        points.fold(Rect::from_points(*first, *first), |rect, point| {
            rect.union_pt(*point)
        })
    }
}

/// Shoelace area, positive for clockwise contours in y-down coordinates.
pub(crate) fn signed_area(contour: &[Point]) -> f64 {
    let mut area = 0.0;
    for (i, a) in contour.iter().enumerate() {
        let b = contour[(i + 1) % contour.len()];
        area += a.x * b.y - b.x * a.y;
    }
    area * 0.5
}

#[cfg(test)]
mod tests {
    use super::{signed_area, Polygon};
    use peniko::kurbo::{BezPath, Circle, Point, Rect};

    #[test]
    fn contours_are_made_clockwise() {
        let counter_clockwise = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        assert!(signed_area(&counter_clockwise) < 0.0);
        let polygon = Polygon::new([counter_clockwise]);
        assert!(signed_area(&polygon.contours()[0]) > 0.0);
    }

    #[test]
    fn rect_polygon() {
        let polygon = Polygon::from_rect(Rect::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(polygon.contours().len(), 1);
        assert_eq!(signed_area(&polygon.contours()[0]), 5000.0);
        assert_eq!(polygon.bounding_box(), Rect::new(10.0, 20.0, 110.0, 70.0));
    }

    #[test]
    fn paths_are_flattened() {
        let polygon = Polygon::from_shape(&Circle::new((50.0, 50.0), 20.0), 0.1);
        assert_eq!(polygon.contours().len(), 1);
        assert!(polygon.contours()[0].len() > 8);
        let bbox = polygon.bounding_box();
        assert!((bbox.width() - 40.0).abs() < 0.5);

        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((5.0, 0.0));
        assert!(Polygon::from_path(&path, 0.1).is_empty());
    }
}
