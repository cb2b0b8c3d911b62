use labelkit_core::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

mod arrow;
mod barcode;
mod ellipse;
mod image;
mod line;
mod polygon;
mod qrcode;
mod rectangle;
mod star;
mod table;
mod text;

pub use arrow::LabelArrow;
pub use barcode::{BarcodeSymbology, LabelBarcode};
pub use ellipse::LabelEllipse;
pub use image::LabelImage;
pub use line::LabelLine;
pub use polygon::LabelPolygon;
pub use qrcode::{ErrorCorrection, LabelQrCode};
pub use rectangle::LabelRectangle;
pub use star::LabelStar;
pub use table::{LabelTable, TableCell, TableStructure};
pub use text::LabelText;

/// RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DashStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
}

/// Outline style shared by the drawn shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenStyle {
    pub width: f64,
    pub color: Color,
    pub dash: DashStyle,
}

impl Default for PenStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: Color::BLACK,
            dash: DashStyle::Solid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Text,
    Barcode,
    QrCode,
    Image,
    Line,
    Rectangle,
    Ellipse,
    Star,
    Arrow,
    Polygon,
    Table,
}

impl ElementKind {
    /// Lower-case name used in command labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Barcode => "barcode",
            ElementKind::QrCode => "QR code",
            ElementKind::Image => "image",
            ElementKind::Line => "line",
            ElementKind::Rectangle => "rectangle",
            ElementKind::Ellipse => "ellipse",
            ElementKind::Star => "star",
            ElementKind::Arrow => "arrow",
            ElementKind::Polygon => "polygon",
            ElementKind::Table => "table",
        }
    }

    /// Shapes edited point by point keep every resize as its own undo step.
    pub fn is_vertex_adjustable(&self) -> bool {
        matches!(self, ElementKind::Line | ElementKind::Polygon)
    }
}

/// How the resize handles of an element are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleLayout {
    /// Eight handles on the corners and edge midpoints of the content rect.
    Box,
    /// One handle on each end point of a segment.
    Endpoints,
}

/// Shape-defining geometry of an element, without its position.
///
/// This is what a resize or vertex edit changes and what a command needs to
/// restore it exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeGeometry {
    Box(Size),
    Segment { start: Point, end: Point },
    Path(Vec<Point>),
    Grid {
        size: Size,
        columns: Vec<f64>,
        rows: Vec<f64>,
    },
}

/// Geometry access every element type provides.
pub trait LabelShape {
    fn kind(&self) -> ElementKind;

    /// Alignment-relevant rectangle in item-local coordinates.
    fn content_rect(&self) -> Rect;

    fn geometry(&self) -> ShapeGeometry;

    /// Apply a snapshot taken from the same element type. Returns `false` and
    /// leaves the element untouched when the snapshot has the wrong shape.
    fn set_geometry(&mut self, geometry: &ShapeGeometry) -> bool;

    /// Stretch to `size`. Box shapes take it as their size; point based
    /// shapes scale their points so the point bounding box gets `size`.
    fn resize(&mut self, size: Size);

    fn size(&self) -> Size {
        self.content_rect().size()
    }

    fn handle_layout(&self) -> HandleLayout {
        HandleLayout::Box
    }

    fn pen(&self) -> Option<&PenStyle> {
        None
    }

    fn pen_mut(&mut self) -> Option<&mut PenStyle> {
        None
    }
}

/// Tagged union over every element a label can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Text(LabelText),
    Barcode(LabelBarcode),
    QrCode(LabelQrCode),
    Image(LabelImage),
    Line(LabelLine),
    Rectangle(LabelRectangle),
    Ellipse(LabelEllipse),
    Star(LabelStar),
    Arrow(LabelArrow),
    Polygon(LabelPolygon),
    Table(LabelTable),
}

impl Element {
    fn shape(&self) -> &dyn LabelShape {
        match self {
            Element::Text(s) => s,
            Element::Barcode(s) => s,
            Element::QrCode(s) => s,
            Element::Image(s) => s,
            Element::Line(s) => s,
            Element::Rectangle(s) => s,
            Element::Ellipse(s) => s,
            Element::Star(s) => s,
            Element::Arrow(s) => s,
            Element::Polygon(s) => s,
            Element::Table(s) => s,
        }
    }

    fn shape_mut(&mut self) -> &mut dyn LabelShape {
        match self {
            Element::Text(s) => s,
            Element::Barcode(s) => s,
            Element::QrCode(s) => s,
            Element::Image(s) => s,
            Element::Line(s) => s,
            Element::Rectangle(s) => s,
            Element::Ellipse(s) => s,
            Element::Star(s) => s,
            Element::Arrow(s) => s,
            Element::Polygon(s) => s,
            Element::Table(s) => s,
        }
    }

    /// Default element for a kind, as placed by the drawing tools.
    pub fn default_for(kind: ElementKind) -> Element {
        match kind {
            ElementKind::Text => Element::Text(LabelText::new("Double-click to edit")),
            ElementKind::Barcode => {
                Element::Barcode(LabelBarcode::new("12345678", BarcodeSymbology::Code128))
            }
            ElementKind::QrCode => Element::QrCode(LabelQrCode::new("https://example.com")),
            ElementKind::Image => Element::Image(LabelImage::new(Size::new(100.0, 100.0))),
            ElementKind::Line => Element::Line(LabelLine::new(Point::ZERO, Point::ZERO)),
            ElementKind::Rectangle => Element::Rectangle(LabelRectangle::new(Size::new(1.0, 1.0))),
            ElementKind::Ellipse => Element::Ellipse(LabelEllipse::new(Size::new(1.0, 1.0))),
            ElementKind::Star => Element::Star(LabelStar::new(Size::new(1.0, 1.0))),
            ElementKind::Arrow => Element::Arrow(LabelArrow::new(Point::ZERO, Point::ZERO)),
            ElementKind::Polygon => Element::Polygon(LabelPolygon::new(Vec::new())),
            ElementKind::Table => Element::Table(LabelTable::new(3, 3, Size::new(150.0, 90.0))),
        }
    }

    pub fn as_polygon(&self) -> Option<&LabelPolygon> {
        match self {
            Element::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut LabelPolygon> {
        match self {
            Element::Polygon(p) => Some(p),
            _ => None,
        }
    }
}

impl LabelShape for Element {
    fn kind(&self) -> ElementKind {
        self.shape().kind()
    }

    fn content_rect(&self) -> Rect {
        self.shape().content_rect()
    }

    fn geometry(&self) -> ShapeGeometry {
        self.shape().geometry()
    }

    fn set_geometry(&mut self, geometry: &ShapeGeometry) -> bool {
        self.shape_mut().set_geometry(geometry)
    }

    fn resize(&mut self, size: Size) {
        self.shape_mut().resize(size)
    }

    fn size(&self) -> Size {
        self.shape().size()
    }

    fn handle_layout(&self) -> HandleLayout {
        self.shape().handle_layout()
    }

    fn pen(&self) -> Option<&PenStyle> {
        self.shape().pen()
    }

    fn pen_mut(&mut self) -> Option<&mut PenStyle> {
        self.shape_mut().pen_mut()
    }
}

/// Content rect of a segment: the normalised end-point rectangle grown by
/// half the pen width (at least half a unit) so horizontal and vertical
/// segments still have an extent.
pub(crate) fn segment_content_rect(start: Point, end: Point, pen: &PenStyle) -> Rect {
    let pad = (pen.width / 2.0).max(0.5);
    Rect::from_points(start, end).inflated(pad)
}

/// Scale a point set so its bounding box gets `size`, anchored at the box's
/// top-left corner. Degenerate axes are left alone.
pub(crate) fn scale_points(points: &mut [Point], size: Size) {
    let Some(bounds) = Rect::bounding(points) else {
        return;
    };
    let sx = if bounds.width > 0.0 {
        size.width / bounds.width
    } else {
        1.0
    };
    let sy = if bounds.height > 0.0 {
        size.height / bounds.height
    } else {
        1.0
    };
    for p in points.iter_mut() {
        p.x = bounds.x + (p.x - bounds.x) * sx;
        p.y = bounds.y + (p.y - bounds.y) * sy;
    }
}
