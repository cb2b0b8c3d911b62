use labelkit_core::{Rect, Size};
use serde::{Deserialize, Serialize};

use super::{Color, ElementKind, LabelShape, PenStyle, ShapeGeometry};

/// Ellipse inscribed in its box; a circle when the box is square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEllipse {
    pub size: Size,
    pub pen: PenStyle,
    pub fill: Option<Color>,
}

impl LabelEllipse {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pen: PenStyle::default(),
            fill: None,
        }
    }
}

impl LabelShape for LabelEllipse {
    fn kind(&self) -> ElementKind {
        ElementKind::Ellipse
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
