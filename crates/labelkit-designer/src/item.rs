//! Label items: an element plus its placement on the label.

use std::fmt;

use labelkit_core::{ItemTransform, Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::alignment::{AlignState, Alignable};
use crate::model::{Element, ElementKind, HandleLayout, LabelShape, ShapeGeometry};

/// Stable identity of an item within one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position plus shape geometry: everything a move, resize or vertex edit
/// can change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    pub pos: Point,
    pub shape: ShapeGeometry,
}

impl GeometrySnapshot {
    /// Same shape, possibly a different position.
    pub fn same_shape(&self, other: &GeometrySnapshot) -> bool {
        self.shape == other.shape
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelItem {
    pub id: ItemId,
    pub element: Element,
    pub pos: Point,
    pub transform: ItemTransform,
    pub z: f64,
    pub selected: bool,
    pub visible: bool,
    pub align: AlignState,
}

impl LabelItem {
    pub fn new(id: ItemId, element: Element, pos: Point) -> Self {
        Self {
            id,
            element,
            pos,
            transform: ItemTransform::identity(),
            z: 0.0,
            selected: false,
            visible: true,
            align: AlignState::default(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.element.kind()
    }

    pub fn size(&self) -> Size {
        self.element.size()
    }

    pub fn handle_layout(&self) -> HandleLayout {
        self.element.handle_layout()
    }

    pub fn capture_geometry(&self) -> GeometrySnapshot {
        GeometrySnapshot {
            pos: self.pos,
            shape: self.element.geometry(),
        }
    }

    /// Restore a snapshot taken from this item. A snapshot of another
    /// shape type leaves the shape alone but still restores the position.
    pub fn restore_geometry(&mut self, snapshot: &GeometrySnapshot) {
        if !self.element.set_geometry(&snapshot.shape) {
            tracing::debug!("Geometry snapshot does not fit item {}", self.id);
        }
        self.pos = snapshot.pos;
    }

    /// Scene rectangle used for hit testing: the content rect, or a small
    /// box around the origin for degenerate shapes.
    pub fn hit_rect(&self) -> Rect {
        let rect = self.content_rect_scene();
        if rect.is_valid() {
            rect
        } else {
            Rect::new(self.pos.x - 0.5, self.pos.y - 0.5, 1.0, 1.0)
        }
    }

    /// Scene position of a local point.
    pub fn map_to_scene(&self, local: Point) -> Point {
        self.transform.map_point(self.pos, local)
    }

    /// Local position of a scene point.
    pub fn map_from_scene(&self, scene: Point) -> Point {
        self.transform.unmap_point(self.pos, scene)
    }
}

impl Alignable for LabelItem {
    fn alignment_id(&self) -> Option<ItemId> {
        Some(self.id)
    }

    fn content_rect_local(&self) -> Rect {
        self.element.content_rect()
    }

    fn pos(&self) -> Point {
        self.pos
    }

    fn set_pos(&mut self, pos: Point) {
        self.pos = pos;
    }

    fn align_state(&self) -> &AlignState {
        &self.align
    }

    fn align_state_mut(&mut self) -> &mut AlignState {
        &mut self.align
    }

    fn item_transform(&self) -> ItemTransform {
        self.transform
    }
}
