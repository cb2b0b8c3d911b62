//! # LabelKit Designer
//!
//! Interactive editing core of the label layout editor: everything between
//! pointer events and the item data, without any drawing.
//!
//! ## Core Components
//!
//! - **Elements**: text, barcode, QR code, image, line, rectangle, ellipse,
//!   star, arrow, polygon and table, as one tagged union
//! - **History**: undo/redo stack with merging of rapid edits, macros and
//!   saved-state tracking
//! - **Alignment**: snapping to the label and to sibling items, with guides
//! - **Selection Frame**: the box around a multi-selection, dragged as one
//! - **Drag Coordinator**: press/drag/release state machine emitting commands
//!
//! ## Architecture
//!
//! ```text
//! DesignerState
//!   ├── Document
//!   │     ├── LabelScene (items, background, selection, frame)
//!   │     └── Clipboard
//!   ├── UndoStack (DesignerCommand history)
//!   └── DragCoordinator (gestures, tool modes)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use labelkit_designer::{DesignerState, ElementKind};
//! use labelkit_core::Point;
//!
//! let mut state = DesignerState::default();
//! let id = state.add_element(ElementKind::Rectangle, Point::new(10.0, 10.0));
//! state.undo();
//! assert!(state.item(id).is_none());
//! ```

pub mod alignment;
pub mod clipboard;
pub mod commands;
pub mod designer_state;
pub mod document;
pub mod error;
pub mod history;
pub mod input;
pub mod interaction;
pub mod item;
pub mod model;
pub mod scene;
pub mod selection_frame;

pub use alignment::{
    find_snap, Alignable, AlignState, AxisSnap, GuideLine, Guides, SnapContext, SnapOutcome,
    SnapTarget,
};
pub use clipboard::{Clipboard, ClipboardEntry};
pub use commands::{ChangeProperty, CommandKind, DesignerCommand, MergePolicy};
pub use designer_state::DesignerState;
pub use document::Document;
pub use error::{DesignerError, DesignerResult};
pub use history::{ListenerHandle, StackListener, UndoStack};
pub use input::{Modifiers, PointerEvent, ToolMode};
pub use interaction::{handle_positions, DragCoordinator, DragState, Gesture, Handle};
pub use item::{GeometrySnapshot, ItemId, LabelItem};
pub use model::{Element, ElementKind, LabelShape, PenStyle, ShapeGeometry};
pub use scene::{LabelScene, SceneSnapshot};
pub use selection_frame::SelectionFrame;
