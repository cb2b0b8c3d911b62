use labelkit_core::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use super::{scale_points, Color, ElementKind, LabelShape, PenStyle, ShapeGeometry};

/// Closed polygon with freely editable vertices (local coordinates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPolygon {
    pub points: Vec<Point>,
    pub pen: PenStyle,
    pub fill: Option<Color>,
}

impl LabelPolygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            pen: PenStyle::default(),
            fill: None,
        }
    }

    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Move one vertex. Out-of-range indices are ignored.
    pub fn set_vertex(&mut self, index: usize, p: Point) -> bool {
        match self.points.get_mut(index) {
            Some(v) => {
                *v = p;
                true
            }
            None => false,
        }
    }

    pub fn append_point(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn set_last_point(&mut self, p: Point) {
        if let Some(last) = self.points.last_mut() {
            *last = p;
        }
    }

    pub fn pop_point(&mut self) -> Option<Point> {
        self.points.pop()
    }

    /// Shift the points so their bounding box starts at the local origin.
    /// Returns the shift; the caller moves the item by it.
    pub fn normalize(&mut self) -> Point {
        let Some(bounds) = Rect::bounding(&self.points) else {
            return Point::ZERO;
        };
        let offset = bounds.top_left();
        if !offset.is_zero() {
            for p in self.points.iter_mut() {
                *p -= offset;
            }
        }
        offset
    }

    /// Index of the vertex within `radius` of a local point, nearest first.
    pub fn vertex_at(&self, local: Point, radius: f64) -> Option<usize> {
        let r2 = radius * radius;
        self.points
            .iter()
            .enumerate()
            .map(|(i, v)| (i, (*v - local).length_squared()))
            .filter(|(_, d2)| *d2 <= r2)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

impl LabelShape for LabelPolygon {
    fn kind(&self) -> ElementKind {
        ElementKind::Polygon
    }

    fn content_rect(&self) -> Rect {
        Rect::bounding(&self.points).unwrap_or_default()
    }

    fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::Path(self.points.clone())
    }

    fn set_geometry(&mut self, geometry: &ShapeGeometry) -> bool {
        match geometry {
            ShapeGeometry::Path(points) => {
                self.points = points.clone();
                true
            }
            _ => false,
        }
    }

    fn resize(&mut self, size: Size) {
        scale_points(&mut self.points, size);
    }

    fn pen(&self) -> Option<&PenStyle> {
        Some(&self.pen)
    }

    fn pen_mut(&mut self) -> Option<&mut PenStyle> {
        Some(&mut self.pen)
    }
}
