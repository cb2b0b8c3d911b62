use labelkit_core::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use super::{
    scale_points, segment_content_rect, ElementKind, HandleLayout, LabelShape, PenStyle,
    ShapeGeometry,
};

/// Straight segment between two local points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLine {
    pub start: Point,
    pub end: Point,
    pub pen: PenStyle,
}

impl LabelLine {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            pen: PenStyle::default(),
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

impl LabelShape for LabelLine {
    fn kind(&self) -> ElementKind {
        ElementKind::Line
    }

    fn content_rect(&self) -> Rect {
        segment_content_rect(self.start, self.end, &self.pen)
    }

    fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::Segment {
            start: self.start,
            end: self.end,
        }
    }

    fn set_geometry(&mut self, geometry: &ShapeGeometry) -> bool {
        match geometry {
            ShapeGeometry::Segment { start, end } => {
                self.start = *start;
                self.end = *end;
                true
            }
            _ => false,
        }
    }

    fn resize(&mut self, size: Size) {
        let mut points = [self.start, self.end];
        scale_points(&mut points, size);
        [self.start, self.end] = points;
    }

    fn handle_layout(&self) -> HandleLayout {
        HandleLayout::Endpoints
    }

    fn pen(&self) -> Option<&PenStyle> {
        Some(&self.pen)
    }

    fn pen_mut(&mut self) -> Option<&mut PenStyle> {
        Some(&mut self.pen)
    }
}
