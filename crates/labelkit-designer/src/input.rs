//! Pointer input model: tools, modifier keys and timestamped pointer events.

use std::time::Instant;

use labelkit_core::Point;

use crate::model::ElementKind;

/// Which tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    /// Pointer / selection tool.
    #[default]
    Select,
    /// Place an element of this kind. Box and segment kinds are drawn by
    /// dragging, text/barcode/QR/image/table are placed with a click and
    /// polygons take one click per vertex.
    Insert(ElementKind),
}

impl ToolMode {
    /// Whether the element for this tool is created by a press-drag-release.
    pub fn is_drawn(self) -> bool {
        matches!(
            self,
            ToolMode::Insert(
                ElementKind::Line
                    | ElementKind::Rectangle
                    | ElementKind::Ellipse
                    | ElementKind::Star
                    | ElementKind::Arrow
            )
        )
    }
}

/// Keyboard modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Temporarily suppresses snapping.
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Modifier that adds to or toggles the selection instead of replacing it.
    pub fn extends_selection(&self) -> bool {
        self.ctrl || self.shift || self.meta
    }
}

/// A pointer event in scene coordinates.
///
/// `at` drives the undo merge window, so replaying recorded events gives
/// the same history as the live session did.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub pos: Point,
    pub modifiers: Modifiers,
    pub at: Instant,
}

impl PointerEvent {
    pub fn new(pos: Point, at: Instant) -> Self {
        Self {
            pos,
            modifiers: Modifiers::NONE,
            at,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
