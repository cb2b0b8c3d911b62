use labelkit_core::{Rect, Size};
use serde::{Deserialize, Serialize};

use super::{ElementKind, LabelShape, ShapeGeometry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelText {
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    pub word_wrap: bool,
    pub size: Size,
}

impl LabelText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_family: "Sans".to_string(),
            font_size: 12.0,
            word_wrap: true,
            size: Size::new(120.0, 30.0),
        }
    }
}

impl LabelShape for LabelText {
    fn kind(&self) -> ElementKind {
        ElementKind::Text
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
}
