use labelkit_core::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use super::{Color, ElementKind, LabelShape, PenStyle, ShapeGeometry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStar {
    pub size: Size,
    pub points: u32,
    /// Inner radius as a fraction of the outer radius.
    pub inner_ratio: f64,
    pub pen: PenStyle,
    pub fill: Option<Color>,
}

impl LabelStar {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            points: 5,
            inner_ratio: 0.5,
            pen: PenStyle::default(),
            fill: None,
        }
    }

    /// Outline vertices in local coordinates, starting at the top tip.
    pub fn outline(&self) -> Vec<Point> {
        let count = self.points.max(2) as usize * 2;
        let (rx, ry) = (self.size.width / 2.0, self.size.height / 2.0);
        let step = std::f64::consts::PI / self.points.max(2) as f64;
        (0..count)
            .map(|i| {
                let ratio = if i % 2 == 0 { 1.0 } else { self.inner_ratio };
                let angle = -std::f64::consts::FRAC_PI_2 + step * i as f64;
                Point::new(rx + rx * ratio * angle.cos(), ry + ry * ratio * angle.sin())
            })
            .collect()
    }
}

impl LabelShape for LabelStar {
    fn kind(&self) -> ElementKind {
        ElementKind::Star
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
