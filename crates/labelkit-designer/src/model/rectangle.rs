use labelkit_core::{Rect, Size};
use serde::{Deserialize, Serialize};

use super::{Color, ElementKind, LabelShape, PenStyle, ShapeGeometry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRectangle {
    pub size: Size,
    pub corner_radius: f64,
    pub pen: PenStyle,
    pub fill: Option<Color>,
}

impl LabelRectangle {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            corner_radius: 0.0,
            pen: PenStyle::default(),
            fill: None,
        }
    }

    /// Corner radius as drawn: never more than half the shorter side.
    pub fn effective_corner_radius(&self) -> f64 {
        let limit = self.size.width.min(self.size.height) / 2.0;
        self.corner_radius.clamp(0.0, limit.max(0.0))
    }
}

impl LabelShape for LabelRectangle {
    fn kind(&self) -> ElementKind {
        ElementKind::Rectangle
    }

    fn content_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.width, self.size.height)
    }

    fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::Box(self.size)
    }

    fn set_geometry(&mut self, geometry: &ShapeGeometry) -> bool {
        match geometry {
            ShapeGeometry::Box(size) => {
                self.size = *size;
                true
            }
            _ => false,
        }
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn pen(&self) -> Option<&PenStyle> {
        Some(&self.pen)
    }

    fn pen_mut(&mut self) -> Option<&mut PenStyle> {
        Some(&mut self.pen)
    }
}
