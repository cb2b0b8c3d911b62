use labelkit_core::{Rect, Size};
use serde::{Deserialize, Serialize};

use super::{ElementKind, LabelShape, ShapeGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BarcodeSymbology {
    #[default]
    Code128,
    Code39,
    Ean13,
    Ean8,
    UpcA,
    Itf,
}

/// One-dimensional barcode. Encoding and drawing happen in the renderer;
/// the editor only tracks the payload and the box it is drawn into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelBarcode {
    pub data: String,
    pub symbology: BarcodeSymbology,
    pub show_text: bool,
    pub size: Size,
}

impl LabelBarcode {
    pub fn new(data: impl Into<String>, symbology: BarcodeSymbology) -> Self {
        Self {
            data: data.into(),
            symbology,
            show_text: true,
            size: Size::new(160.0, 60.0),
        }
    }
}

impl LabelShape for LabelBarcode {
    fn kind(&self) -> ElementKind {
        ElementKind::Barcode
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
