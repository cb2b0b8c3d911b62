//! Label scene
//!
//! Owns the attached items, the label background rectangle, the selection
//! and the selection frame. Commands and the drag coordinator mutate the
//! scene; it never pushes history itself.

use labelkit_core::{Point, Rect};
use labelkit_settings::{AlignmentSettings, EditorConfig};
use serde::{Deserialize, Serialize};

use crate::alignment::{Alignable, SnapContext, SnapTarget};
use crate::item::{ItemId, LabelItem};
use crate::selection_frame::SelectionFrame;

/// Serializable state of a scene: what an external serializer needs to
/// store and restore a document. History is not part of it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub background: Option<Rect>,
    pub items: Vec<LabelItem>,
}

#[derive(Debug, Clone)]
pub struct LabelScene {
    items: Vec<LabelItem>,
    next_id: u64,
    background: Option<Rect>,
    frame: SelectionFrame,
    alignment: AlignmentSettings,
    text_edit: Option<ItemId>,
}

impl LabelScene {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            background: None,
            frame: SelectionFrame::new(&config.selection),
            alignment: config.alignment.clone(),
            text_edit: None,
        }
    }

    pub fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Put an item (back) into the scene. An item with the same id replaces
    /// the existing one.
    pub fn attach(&mut self, item: LabelItem) {
        self.next_id = self.next_id.max(item.id.0 + 1);
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        self.sync_selection_frame();
    }

    /// Insert an item at a slot of the insertion order, clamped to the end.
    /// An item with the same id is taken out first.
    pub fn attach_at(&mut self, index: usize, item: LabelItem) {
        self.next_id = self.next_id.max(item.id.0 + 1);
        self.items.retain(|i| i.id != item.id);
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.sync_selection_frame();
    }

    /// Take an item out of the scene, handing its ownership to the caller.
    pub fn detach(&mut self, id: ItemId) -> Option<LabelItem> {
        self.detach_indexed(id).map(|(_, item)| item)
    }

    /// Like [`LabelScene::detach`], also returning the slot the item held so
    /// [`LabelScene::attach_at`] can put it back.
    pub fn detach_indexed(&mut self, id: ItemId) -> Option<(usize, LabelItem)> {
        let index = self.items.iter().position(|i| i.id == id)?;
        let item = self.items.remove(index);
        if self.text_edit == Some(id) {
            self.text_edit = None;
        }
        self.sync_selection_frame();
        Some((index, item))
    }

    pub fn item(&self, id: ItemId) -> Option<&LabelItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut LabelItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.item(id).is_some()
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LabelItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items bottom to top. Equal z keeps insertion order.
    pub fn draw_order(&self) -> Vec<&LabelItem> {
        let mut ordered: Vec<&LabelItem> = self.items.iter().collect();
        ordered.sort_by(|a, b| a.z.total_cmp(&b.z));
        ordered
    }

    /// Topmost visible item whose hit rectangle contains `p`.
    pub fn item_at(&self, p: Point) -> Option<ItemId> {
        self.draw_order()
            .into_iter()
            .rev()
            .find(|item| item.visible && item.hit_rect().contains(p))
            .map(|item| item.id)
    }

    pub fn background(&self) -> Option<Rect> {
        self.background
    }

    /// Label area items align to. Not an item: it is never selected, moved
    /// or tracked by the frame.
    pub fn set_background(&mut self, rect: Option<Rect>) {
        self.background = rect;
    }

    // Selection

    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.draw_order()
            .into_iter()
            .filter(|item| item.selected)
            .map(|item| item.id)
            .collect()
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.item(id).is_some_and(|item| item.selected)
    }

    /// Add an item to the selection.
    pub fn select(&mut self, id: ItemId) {
        self.set_selected(id, true);
    }

    pub fn set_selected(&mut self, id: ItemId, selected: bool) {
        if let Some(item) = self.item_mut(id) {
            item.selected = selected;
        }
        self.sync_selection_frame();
    }

    pub fn toggle_selected(&mut self, id: ItemId) {
        if let Some(item) = self.item_mut(id) {
            item.selected = !item.selected;
        }
        self.sync_selection_frame();
    }

    pub fn select_only(&mut self, id: ItemId) {
        for item in &mut self.items {
            item.selected = item.id == id;
        }
        self.sync_selection_frame();
    }

    pub fn select_all(&mut self) {
        for item in &mut self.items {
            item.selected = true;
        }
        self.sync_selection_frame();
    }

    pub fn clear_selection(&mut self) {
        for item in &mut self.items {
            item.selected = false;
        }
        self.sync_selection_frame();
    }

    /// Selected items a drag may move: not locked and not being edited
    /// inline.
    pub fn movable_selection(&self) -> Vec<ItemId> {
        self.draw_order()
            .into_iter()
            .filter(|item| item.selected && self.is_movable(item.id))
            .map(|item| item.id)
            .collect()
    }

    pub fn is_movable(&self, id: ItemId) -> bool {
        self.text_edit != Some(id) && self.item(id).is_some_and(|item| !item.is_locked())
    }

    // Selection frame

    pub fn frame(&self) -> &SelectionFrame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut SelectionFrame {
        &mut self.frame
    }

    /// Re-derive the tracked set from the current selection.
    pub fn sync_selection_frame(&mut self) {
        let selected = self.selected_ids();
        self.frame.set_items(selected, &self.items);
    }

    /// Recompute the frame geometry when it is showing.
    pub fn refresh_selection_frame(&mut self) {
        if self.frame.is_visible() {
            self.frame.refresh_geometry(&self.items);
        }
    }

    // Stacking

    pub fn bring_to_front(&mut self, id: ItemId) -> bool {
        let max_z = self
            .items
            .iter()
            .filter(|i| i.id != id)
            .map(|i| i.z)
            .fold(0.0, f64::max);
        match self.item_mut(id) {
            Some(item) => {
                item.z = max_z + 1.0;
                true
            }
            None => false,
        }
    }

    pub fn send_to_back(&mut self, id: ItemId) -> bool {
        let min_z = self
            .items
            .iter()
            .filter(|i| i.id != id)
            .map(|i| i.z)
            .fold(0.0, f64::min);
        match self.item_mut(id) {
            Some(item) => {
                item.z = min_z - 1.0;
                true
            }
            None => false,
        }
    }

    // Alignment

    pub fn set_locked(&mut self, id: ItemId, locked: bool) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.set_locked(locked);
                true
            }
            None => false,
        }
    }

    pub fn alignment_enabled(&self) -> bool {
        self.alignment.enabled
    }

    /// Global alignment switch. Turning it off drops every guide.
    pub fn set_alignment_enabled(&mut self, enabled: bool) {
        self.alignment.enabled = enabled;
        if !enabled {
            self.clear_guides();
        }
    }

    pub fn clear_guides(&mut self) {
        for item in &mut self.items {
            item.clear_guides();
        }
        self.frame.clear_guides();
    }

    /// Snap context with every visible item as a target, topmost first.
    pub fn snap_context(&self) -> SnapContext {
        SnapContext {
            background: self.background,
            targets: self
                .draw_order()
                .into_iter()
                .rev()
                .filter(|item| item.visible)
                .map(|item| SnapTarget {
                    id: item.id,
                    rect: item.content_rect_scene(),
                })
                .collect(),
            threshold: self.alignment.threshold,
            enabled: self.alignment.enabled,
        }
    }

    // Inline text editing

    /// Mark an item as being edited inline; it is excluded from drags.
    pub fn begin_text_edit(&mut self, id: ItemId) -> bool {
        if self.contains(id) {
            self.text_edit = Some(id);
            true
        } else {
            false
        }
    }

    pub fn end_text_edit(&mut self) -> Option<ItemId> {
        self.text_edit.take()
    }

    pub fn text_edit_item(&self) -> Option<ItemId> {
        self.text_edit
    }

    // Whole-document operations

    pub fn clear(&mut self) {
        self.items.clear();
        self.text_edit = None;
        self.next_id = 1;
        self.sync_selection_frame();
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            background: self.background,
            items: self.items.clone(),
        }
    }

    pub fn load_snapshot(&mut self, snapshot: SceneSnapshot) {
        self.clear();
        self.background = snapshot.background;
        for item in snapshot.items {
            self.next_id = self.next_id.max(item.id.0 + 1);
            self.items.push(item);
        }
        self.sync_selection_frame();
    }
}
