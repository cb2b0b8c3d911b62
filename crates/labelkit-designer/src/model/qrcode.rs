use labelkit_core::{Rect, Size};
use serde::{Deserialize, Serialize};

use super::{ElementKind, LabelShape, ShapeGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    Low,
    #[default]
    Medium,
    Quartile,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelQrCode {
    pub data: String,
    pub error_correction: ErrorCorrection,
    pub size: Size,
}

impl LabelQrCode {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            error_correction: ErrorCorrection::default(),
            size: Size::new(80.0, 80.0),
        }
    }
}

impl LabelShape for LabelQrCode {
    fn kind(&self) -> ElementKind {
        ElementKind::QrCode
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
