use labelkit_core::Point;

use super::DesignerState;
use crate::commands::{add_label, paste_label, DesignerCommand};
use crate::error::{DesignerError, DesignerResult};
use crate::item::{ItemId, LabelItem};
use crate::model::{Element, ElementKind};

impl DesignerState {
    /// Add a default element of `kind` at `pos` and select it.
    pub fn add_element(&mut self, kind: ElementKind, pos: Point) -> ItemId {
        self.add_item(Element::default_for(kind), pos)
    }

    /// Add a prepared element at `pos` and select it.
    pub fn add_item(&mut self, element: Element, pos: Point) -> ItemId {
        let id = self.document.scene.allocate_id();
        let mut item = LabelItem::new(id, element, pos);
        let label = add_label(item.kind());
        item.selected = true;
        self.document.scene.clear_selection();
        self.history
            .push(DesignerCommand::add(item, label), &mut self.document);
        id
    }

    pub fn delete_item(&mut self, id: ItemId) -> DesignerResult<()> {
        let kind = self.require_item(id)?.kind();
        self.history
            .push(DesignerCommand::remove(id, kind), &mut self.document);
        Ok(())
    }

    /// Remove every selected item as one undo step. Returns how many went.
    pub fn delete_selected(&mut self) -> usize {
        let targets: Vec<(ItemId, ElementKind)> = self
            .document
            .scene
            .selected_ids()
            .into_iter()
            .filter_map(|id| self.document.scene.item(id).map(|i| (id, i.kind())))
            .collect();

        match targets.as_slice() {
            [] => {}
            [(id, kind)] => {
                self.history
                    .push(DesignerCommand::remove(*id, *kind), &mut self.document);
            }
            many => {
                self.history.begin_macro(format!("Remove {} items", many.len()));
                for (id, kind) in many {
                    self.history
                        .push(DesignerCommand::remove(*id, *kind), &mut self.document);
                }
                self.history.end_macro();
            }
        }
        targets.len()
    }

    /// Copy the topmost selected item.
    pub fn copy_selected(&mut self) -> Option<ItemId> {
        let id = self.document.scene.selected_ids().last().copied()?;
        let item = self.document.scene.item(id)?;
        self.document.clipboard.copy(item);
        Some(id)
    }

    /// Cut the topmost selected item. Undo brings the item back and restores
    /// the clipboard to what it held before.
    pub fn cut_selected(&mut self) -> Option<ItemId> {
        let id = self.document.scene.selected_ids().last().copied()?;
        let kind = self.document.scene.item(id)?.kind();
        self.history
            .push(DesignerCommand::cut(id, kind), &mut self.document);
        Some(id)
    }

    /// Paste the clipboard near `pos`, offset by `paste_offset` on both
    /// axes so the copy does not land under the pointer.
    pub fn paste_at(&mut self, pos: Point) -> DesignerResult<ItemId> {
        let offset = self.config.editing.paste_offset;
        let target = pos + Point::new(offset, offset);
        let id = self.document.scene.allocate_id();
        let mut item = self
            .document
            .clipboard
            .instantiate(id, target)
            .ok_or(DesignerError::ClipboardEmpty)?;
        let label = paste_label(item.kind());
        item.selected = true;
        self.document.scene.clear_selection();
        self.history
            .push(DesignerCommand::add(item, label), &mut self.document);
        Ok(id)
    }

    pub fn bring_to_front(&mut self, id: ItemId) -> DesignerResult<()> {
        if self.document.scene.bring_to_front(id) {
            Ok(())
        } else {
            Err(DesignerError::ItemNotFound(id))
        }
    }

    pub fn send_to_back(&mut self, id: ItemId) -> DesignerResult<()> {
        if self.document.scene.send_to_back(id) {
            Ok(())
        } else {
            Err(DesignerError::ItemNotFound(id))
        }
    }
}
