//! Designer session: one open label document with its history and the
//! gesture coordinator, wired together.
//!
//! Submodules:
//! - `shapes`: adding, removing, clipboard and stacking
//! - `properties`: undoable property edits

mod properties;
mod shapes;

use std::path::Path;

use labelkit_core::Rect;
use labelkit_settings::EditorConfig;

use crate::document::Document;
use crate::error::{DesignerError, DesignerResult};
use crate::history::UndoStack;
use crate::input::{PointerEvent, ToolMode};
use crate::interaction::DragCoordinator;
use crate::item::{ItemId, LabelItem};
use crate::scene::SceneSnapshot;

#[derive(Debug)]
pub struct DesignerState {
    pub document: Document,
    pub history: UndoStack,
    pub coordinator: DragCoordinator,
    pub config: EditorConfig,
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl DesignerState {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            document: Document::new(&config),
            history: UndoStack::new(&config.history),
            coordinator: DragCoordinator::new(&config),
            config,
        }
    }

    /// Session configured from a settings file; a missing file means
    /// defaults.
    pub fn from_config_file(path: &Path) -> DesignerResult<Self> {
        let config = EditorConfig::load_or_default(path)?;
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn item(&self, id: ItemId) -> Option<&LabelItem> {
        self.document.scene.item(id)
    }

    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.document.scene.selected_ids()
    }

    pub fn set_label_rect(&mut self, rect: Option<Rect>) {
        self.document.scene.set_background(rect);
    }

    // Pointer input

    pub fn set_tool(&mut self, tool: ToolMode) {
        self.coordinator.set_tool(tool, &mut self.document);
    }

    pub fn tool(&self) -> ToolMode {
        self.coordinator.tool()
    }

    pub fn pointer_press(&mut self, ev: &PointerEvent) {
        self.coordinator
            .press(&mut self.document, &mut self.history, ev);
    }

    pub fn pointer_drag(&mut self, ev: &PointerEvent) {
        self.coordinator.drag(&mut self.document, ev);
    }

    pub fn pointer_release(&mut self, ev: &PointerEvent) {
        self.coordinator
            .release(&mut self.document, &mut self.history, ev);
    }

    /// Close the polygon being placed (double click).
    pub fn finish_polygon(&mut self, ev: &PointerEvent) -> bool {
        self.coordinator
            .finish_polygon(&mut self.document, &mut self.history, ev)
    }

    // History

    pub fn undo(&mut self) -> bool {
        let done = self.history.undo(&mut self.document);
        if done {
            self.document.scene.refresh_selection_frame();
        }
        done
    }

    pub fn redo(&mut self) -> bool {
        let done = self.history.redo(&mut self.document);
        if done {
            self.document.scene.refresh_selection_frame();
        }
        done
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // Document lifecycle

    /// Start over with an empty label. History goes first so no command
    /// outlives the items it refers to.
    pub fn new_document(&mut self) {
        self.history.clear();
        self.coordinator.set_tool(ToolMode::Select, &mut self.document);
        self.document.scene.clear();
        self.document.clipboard.clear();
        tracing::info!("New label document");
    }

    /// Replace the document with a stored one.
    pub fn open_document(&mut self, snapshot: SceneSnapshot) {
        self.history.clear();
        self.coordinator.set_tool(ToolMode::Select, &mut self.document);
        self.document.scene.load_snapshot(snapshot);
        tracing::info!(
            "Opened label document with {} item(s)",
            self.document.scene.len()
        );
    }

    /// Remember the current state as saved.
    pub fn mark_saved(&mut self) -> DesignerResult<()> {
        if self.history.is_macro_open() {
            return Err(DesignerError::MacroOpen);
        }
        self.history.set_clean();
        Ok(())
    }

    pub fn is_modified(&self) -> bool {
        !self.history.is_clean()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        self.document.scene.snapshot()
    }

    fn require_item(&self, id: ItemId) -> DesignerResult<&LabelItem> {
        self.document
            .scene
            .item(id)
            .ok_or(DesignerError::ItemNotFound(id))
    }
}
