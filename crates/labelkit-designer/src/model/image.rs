use labelkit_core::{Rect, Size};
use serde::{Deserialize, Serialize};

use super::{ElementKind, LabelShape, ShapeGeometry};

/// Raster image placed on the label. `source` is whatever the host uses to
/// find the pixels again (a path or an asset key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelImage {
    pub source: Option<String>,
    pub keep_aspect_ratio: bool,
    pub size: Size,
}

impl LabelImage {
    pub fn new(size: Size) -> Self {
        Self {
            source: None,
            keep_aspect_ratio: true,
            size,
        }
    }
}

impl LabelShape for LabelImage {
    fn kind(&self) -> ElementKind {
        ElementKind::Image
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
