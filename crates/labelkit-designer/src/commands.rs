//! Undoable edits.
//!
//! Every edit of a label document is a [`DesignerCommand`]. Commands are built
//! after the change is known (a finished gesture or a property dialog), pushed
//! once, and from then on only replayed through [`DesignerCommand::redo`] and
//! [`DesignerCommand::undo`] against the [`Document`] they belong to.
//!
//! A command whose item has left the scene does nothing; that is logged at
//! debug level and never reported as an error.

use labelkit_core::Point;
use labelkit_settings::HistorySettings;

use crate::alignment::Alignable;
use crate::clipboard::ClipboardEntry;
use crate::document::Document;
use crate::item::{GeometrySnapshot, ItemId, LabelItem};
use crate::model::{Element, ElementKind, LabelShape, PenStyle, TableStructure};

/// Merge compatibility tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    AddItem,
    RemoveItem,
    CutItem,
    MoveItem,
    ResizeItem,
    MovePolygonVertex,
    ChangeText,
    ChangeBarcodeData,
    ChangeQrCodeData,
    ChangeCornerRadius,
    ChangePenStyle,
    ChangeTableStructure,
    SetLocked,
    Macro,
}

/// Limits on command merging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergePolicy {
    /// Squared distance a merged move may cover, measured from the start of
    /// the first move to the end of the latest.
    pub distance_sq: f64,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self { distance_sq: 100.0 }
    }
}

impl From<&HistorySettings> for MergePolicy {
    fn from(settings: &HistorySettings) -> Self {
        Self {
            distance_sq: settings.merge_distance_sq,
        }
    }
}

/// Item added to the scene. Used for drawing, placing and pasting.
///
/// Exactly one side owns the item: the scene while the command is done, the
/// command while it is undone.
#[derive(Debug, Clone)]
pub struct AddItem {
    pub id: ItemId,
    pub item: Option<LabelItem>,
    pub label: String,
}

/// Item removed from the scene. `index` is its draw-list slot, recorded on
/// redo so undo puts it back under the same neighbours.
#[derive(Debug, Clone)]
pub struct RemoveItem {
    pub id: ItemId,
    pub item: Option<LabelItem>,
    pub index: Option<usize>,
    pub label: String,
}

/// Remove an item and put a copy on the clipboard.
#[derive(Debug, Clone)]
pub struct CutItem {
    pub id: ItemId,
    pub item: Option<LabelItem>,
    pub index: Option<usize>,
    pub previous_clipboard: Option<ClipboardEntry>,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct MoveItem {
    pub id: ItemId,
    pub old: Point,
    pub new: Point,
    /// Interactive single-item drags merge; moves that are part of a group
    /// never do.
    pub allow_merge: bool,
}

/// Geometry change. Both snapshots carry the position so handle resizes that
/// shift the origin undo in one step.
#[derive(Debug, Clone)]
pub struct ResizeItem {
    pub id: ItemId,
    pub kind: ElementKind,
    pub before: GeometrySnapshot,
    pub after: GeometrySnapshot,
}

/// Polygon vertex edit. The snapshots hold every point and the position,
/// since releasing a vertex outside the old bounds re-anchors the polygon.
#[derive(Debug, Clone)]
pub struct MovePolygonVertex {
    pub id: ItemId,
    pub index: usize,
    pub before: GeometrySnapshot,
    pub after: GeometrySnapshot,
}

/// Before/after value of a single item property.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeProperty<T> {
    pub id: ItemId,
    pub old: T,
    pub new: T,
}

impl<T> ChangeProperty<T> {
    pub fn new(id: ItemId, old: T, new: T) -> Self {
        Self { id, old, new }
    }
}

/// Several commands that undo and redo as one step.
#[derive(Debug, Clone)]
pub struct MacroCommand {
    pub label: String,
    pub children: Vec<DesignerCommand>,
}

#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum DesignerCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    CutItem(CutItem),
    MoveItem(MoveItem),
    ResizeItem(ResizeItem),
    MovePolygonVertex(MovePolygonVertex),
    ChangeText(ChangeProperty<String>),
    ChangeBarcodeData(ChangeProperty<String>),
    ChangeQrCodeData(ChangeProperty<String>),
    ChangeCornerRadius(ChangeProperty<f64>),
    ChangePenStyle(ChangeProperty<PenStyle>),
    ChangeTableStructure(ChangeProperty<TableStructure>),
    SetLocked(ChangeProperty<bool>),
    Macro(MacroCommand),
}

pub fn add_label(kind: ElementKind) -> String {
    format!("Add {}", kind.display_name())
}

pub fn remove_label(kind: ElementKind) -> String {
    format!("Remove {}", kind.display_name())
}

pub fn cut_label(kind: ElementKind) -> String {
    format!("Cut {}", kind.display_name())
}

pub fn paste_label(kind: ElementKind) -> String {
    format!("Paste {}", kind.display_name())
}

pub const MOVE_MULTIPLE_LABEL: &str = "Move multiple items";

impl DesignerCommand {
    /// Add command for an item that is not in the scene yet.
    pub fn add(item: LabelItem, label: impl Into<String>) -> Self {
        DesignerCommand::AddItem(AddItem {
            id: item.id,
            item: Some(item),
            label: label.into(),
        })
    }

    pub fn remove(id: ItemId, kind: ElementKind) -> Self {
        DesignerCommand::RemoveItem(RemoveItem {
            id,
            item: None,
            index: None,
            label: remove_label(kind),
        })
    }

    pub fn cut(id: ItemId, kind: ElementKind) -> Self {
        DesignerCommand::CutItem(CutItem {
            id,
            item: None,
            index: None,
            previous_clipboard: None,
            label: cut_label(kind),
        })
    }

    pub fn move_item(id: ItemId, old: Point, new: Point, allow_merge: bool) -> Self {
        DesignerCommand::MoveItem(MoveItem {
            id,
            old,
            new,
            allow_merge,
        })
    }

    pub fn resize(
        id: ItemId,
        kind: ElementKind,
        before: GeometrySnapshot,
        after: GeometrySnapshot,
    ) -> Self {
        DesignerCommand::ResizeItem(ResizeItem {
            id,
            kind,
            before,
            after,
        })
    }

    pub fn move_vertex(
        id: ItemId,
        index: usize,
        before: GeometrySnapshot,
        after: GeometrySnapshot,
    ) -> Self {
        DesignerCommand::MovePolygonVertex(MovePolygonVertex {
            id,
            index,
            before,
            after,
        })
    }

    pub fn macro_of(label: impl Into<String>, children: Vec<DesignerCommand>) -> Self {
        DesignerCommand::Macro(MacroCommand {
            label: label.into(),
            children,
        })
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            DesignerCommand::AddItem(_) => CommandKind::AddItem,
            DesignerCommand::RemoveItem(_) => CommandKind::RemoveItem,
            DesignerCommand::CutItem(_) => CommandKind::CutItem,
            DesignerCommand::MoveItem(_) => CommandKind::MoveItem,
            DesignerCommand::ResizeItem(_) => CommandKind::ResizeItem,
            DesignerCommand::MovePolygonVertex(_) => CommandKind::MovePolygonVertex,
            DesignerCommand::ChangeText(_) => CommandKind::ChangeText,
            DesignerCommand::ChangeBarcodeData(_) => CommandKind::ChangeBarcodeData,
            DesignerCommand::ChangeQrCodeData(_) => CommandKind::ChangeQrCodeData,
            DesignerCommand::ChangeCornerRadius(_) => CommandKind::ChangeCornerRadius,
            DesignerCommand::ChangePenStyle(_) => CommandKind::ChangePenStyle,
            DesignerCommand::ChangeTableStructure(_) => CommandKind::ChangeTableStructure,
            DesignerCommand::SetLocked(_) => CommandKind::SetLocked,
            DesignerCommand::Macro(_) => CommandKind::Macro,
        }
    }

    /// Text shown in undo/redo menus.
    pub fn label(&self) -> &str {
        match self {
            DesignerCommand::AddItem(cmd) => &cmd.label,
            DesignerCommand::RemoveItem(cmd) => &cmd.label,
            DesignerCommand::CutItem(cmd) => &cmd.label,
            DesignerCommand::MoveItem(_) => "Move item",
            DesignerCommand::ResizeItem(_) => "Resize item",
            DesignerCommand::MovePolygonVertex(_) => "Move polygon point",
            DesignerCommand::ChangeText(_) => "Change text",
            DesignerCommand::ChangeBarcodeData(_) => "Change barcode data",
            DesignerCommand::ChangeQrCodeData(_) => "Change QR code data",
            DesignerCommand::ChangeCornerRadius(_) => "Change corner radius",
            DesignerCommand::ChangePenStyle(_) => "Change pen style",
            DesignerCommand::ChangeTableStructure(_) => "Change table structure",
            DesignerCommand::SetLocked(cmd) if cmd.new => "Lock item",
            DesignerCommand::SetLocked(_) => "Unlock item",
            DesignerCommand::Macro(cmd) => &cmd.label,
        }
    }

    /// Ids of the items the command touches.
    pub fn affected_items(&self) -> Vec<ItemId> {
        match self {
            DesignerCommand::AddItem(cmd) => vec![cmd.id],
            DesignerCommand::RemoveItem(cmd) => vec![cmd.id],
            DesignerCommand::CutItem(cmd) => vec![cmd.id],
            DesignerCommand::MoveItem(cmd) => vec![cmd.id],
            DesignerCommand::ResizeItem(cmd) => vec![cmd.id],
            DesignerCommand::MovePolygonVertex(cmd) => vec![cmd.id],
            DesignerCommand::ChangeText(cmd)
            | DesignerCommand::ChangeBarcodeData(cmd)
            | DesignerCommand::ChangeQrCodeData(cmd) => vec![cmd.id],
            DesignerCommand::ChangeCornerRadius(cmd) => vec![cmd.id],
            DesignerCommand::ChangePenStyle(cmd) => vec![cmd.id],
            DesignerCommand::ChangeTableStructure(cmd) => vec![cmd.id],
            DesignerCommand::SetLocked(cmd) => vec![cmd.id],
            DesignerCommand::Macro(cmd) => {
                let mut ids: Vec<ItemId> = Vec::new();
                for id in cmd.children.iter().flat_map(|c| c.affected_items()) {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
                ids
            }
        }
    }

    /// Turn off merging for a command that became part of a group edit.
    pub fn disallow_merge(&mut self) {
        if let DesignerCommand::MoveItem(cmd) = self {
            cmd.allow_merge = false;
        }
    }

    /// Apply the change. Called once when pushed and again on every redo.
    pub fn redo(&mut self, doc: &mut Document) {
        tracing::debug!("Redo: {}", self.label());
        match self {
            DesignerCommand::AddItem(cmd) => match cmd.item.take() {
                Some(item) => doc.scene.attach(item),
                None if doc.scene.contains(cmd.id) => {}
                None => tracing::debug!("Add: nothing to attach for {}", cmd.id),
            },
            DesignerCommand::RemoveItem(cmd) => match doc.scene.detach_indexed(cmd.id) {
                Some((index, item)) => {
                    cmd.index = Some(index);
                    cmd.item = Some(item);
                }
                None => missing(cmd.id),
            },
            DesignerCommand::CutItem(cmd) => match doc.scene.detach_indexed(cmd.id) {
                Some((index, item)) => {
                    cmd.previous_clipboard = doc.clipboard.snapshot();
                    doc.clipboard.copy(&item);
                    cmd.index = Some(index);
                    cmd.item = Some(item);
                }
                None => missing(cmd.id),
            },
            DesignerCommand::MoveItem(cmd) => set_pos(doc, cmd.id, cmd.new),
            DesignerCommand::ResizeItem(cmd) => restore_geometry(doc, cmd.id, &cmd.after),
            DesignerCommand::MovePolygonVertex(cmd) => restore_geometry(doc, cmd.id, &cmd.after),
            DesignerCommand::ChangeText(cmd) => set_text(doc, cmd.id, &cmd.new),
            DesignerCommand::ChangeBarcodeData(cmd) => set_barcode_data(doc, cmd.id, &cmd.new),
            DesignerCommand::ChangeQrCodeData(cmd) => set_qr_data(doc, cmd.id, &cmd.new),
            DesignerCommand::ChangeCornerRadius(cmd) => set_corner_radius(doc, cmd.id, cmd.new),
            DesignerCommand::ChangePenStyle(cmd) => set_pen(doc, cmd.id, &cmd.new),
            DesignerCommand::ChangeTableStructure(cmd) => {
                set_table_structure(doc, cmd.id, &cmd.new)
            }
            DesignerCommand::SetLocked(cmd) => set_locked(doc, cmd.id, cmd.new),
            DesignerCommand::Macro(cmd) => {
                for child in &mut cmd.children {
                    child.redo(doc);
                }
            }
        }
    }

    /// Revert the change.
    pub fn undo(&mut self, doc: &mut Document) {
        tracing::debug!("Undo: {}", self.label());
        match self {
            DesignerCommand::AddItem(cmd) => match doc.scene.detach(cmd.id) {
                Some(item) => cmd.item = Some(item),
                None => missing(cmd.id),
            },
            DesignerCommand::RemoveItem(cmd) => match cmd.item.take() {
                Some(item) => reattach(doc, cmd.index, item),
                None => missing(cmd.id),
            },
            DesignerCommand::CutItem(cmd) => {
                match cmd.item.take() {
                    Some(item) => reattach(doc, cmd.index, item),
                    None => missing(cmd.id),
                }
                doc.clipboard.restore(cmd.previous_clipboard.take());
            }
            DesignerCommand::MoveItem(cmd) => set_pos(doc, cmd.id, cmd.old),
            DesignerCommand::ResizeItem(cmd) => restore_geometry(doc, cmd.id, &cmd.before),
            DesignerCommand::MovePolygonVertex(cmd) => restore_geometry(doc, cmd.id, &cmd.before),
            DesignerCommand::ChangeText(cmd) => set_text(doc, cmd.id, &cmd.old),
            DesignerCommand::ChangeBarcodeData(cmd) => set_barcode_data(doc, cmd.id, &cmd.old),
            DesignerCommand::ChangeQrCodeData(cmd) => set_qr_data(doc, cmd.id, &cmd.old),
            DesignerCommand::ChangeCornerRadius(cmd) => set_corner_radius(doc, cmd.id, cmd.old),
            DesignerCommand::ChangePenStyle(cmd) => set_pen(doc, cmd.id, &cmd.old),
            DesignerCommand::ChangeTableStructure(cmd) => {
                set_table_structure(doc, cmd.id, &cmd.old)
            }
            DesignerCommand::SetLocked(cmd) => set_locked(doc, cmd.id, cmd.old),
            DesignerCommand::Macro(cmd) => {
                for child in cmd.children.iter_mut().rev() {
                    child.undo(doc);
                }
            }
        }
    }

    /// Fold `next` into `self`. Returns `false` (and changes nothing) when
    /// the two do not merge.
    ///
    /// The caller has already checked that both have the same kind and that
    /// they were pushed close enough together in time.
    pub fn merge_with(&mut self, next: &DesignerCommand, policy: &MergePolicy) -> bool {
        match (self, next) {
            (DesignerCommand::MoveItem(cur), DesignerCommand::MoveItem(next)) => {
                if !cur.allow_merge || !next.allow_merge || cur.id != next.id {
                    return false;
                }
                if (next.new - cur.old).length_squared() > policy.distance_sq {
                    return false;
                }
                cur.new = next.new;
                true
            }
            (DesignerCommand::ResizeItem(cur), DesignerCommand::ResizeItem(next)) => {
                if cur.id != next.id || cur.kind.is_vertex_adjustable() {
                    return false;
                }
                cur.after = next.after.clone();
                true
            }
            (DesignerCommand::MovePolygonVertex(cur), DesignerCommand::MovePolygonVertex(next)) => {
                if cur.id != next.id || cur.index != next.index {
                    return false;
                }
                cur.after = next.after.clone();
                true
            }
            (DesignerCommand::ChangeCornerRadius(cur), DesignerCommand::ChangeCornerRadius(next)) => {
                if cur.id != next.id {
                    return false;
                }
                cur.new = next.new;
                true
            }
            _ => false,
        }
    }
}

fn missing(id: ItemId) {
    tracing::debug!("Item {} is no longer in the scene, skipping", id);
}

/// Run `edit` on a live item. `edit` returns `false` when the item is of the
/// wrong kind.
fn edit_item(doc: &mut Document, id: ItemId, edit: impl FnOnce(&mut LabelItem) -> bool) {
    match doc.scene.item_mut(id) {
        Some(item) => {
            if !edit(item) {
                tracing::debug!("Item {} has the wrong kind for this change", id);
            }
        }
        None => missing(id),
    }
}

fn set_pos(doc: &mut Document, id: ItemId, pos: Point) {
    edit_item(doc, id, |item| {
        item.set_pos(pos);
        true
    });
}

fn restore_geometry(doc: &mut Document, id: ItemId, snapshot: &GeometrySnapshot) {
    edit_item(doc, id, |item| {
        item.restore_geometry(snapshot);
        true
    });
}

fn reattach(doc: &mut Document, index: Option<usize>, item: LabelItem) {
    match index {
        Some(index) => doc.scene.attach_at(index, item),
        None => doc.scene.attach(item),
    }
}

fn set_text(doc: &mut Document, id: ItemId, text: &str) {
    edit_item(doc, id, |item| match &mut item.element {
        Element::Text(t) => {
            t.text = text.to_string();
            true
        }
        _ => false,
    });
}

fn set_barcode_data(doc: &mut Document, id: ItemId, data: &str) {
    edit_item(doc, id, |item| match &mut item.element {
        Element::Barcode(b) => {
            b.data = data.to_string();
            true
        }
        _ => false,
    });
}

fn set_qr_data(doc: &mut Document, id: ItemId, data: &str) {
    edit_item(doc, id, |item| match &mut item.element {
        Element::QrCode(q) => {
            q.data = data.to_string();
            true
        }
        _ => false,
    });
}

fn set_corner_radius(doc: &mut Document, id: ItemId, radius: f64) {
    edit_item(doc, id, |item| match &mut item.element {
        Element::Rectangle(r) => {
            r.corner_radius = radius;
            true
        }
        _ => false,
    });
}

fn set_pen(doc: &mut Document, id: ItemId, pen: &PenStyle) {
    edit_item(doc, id, |item| match item.element.pen_mut() {
        Some(current) => {
            *current = pen.clone();
            true
        }
        None => false,
    });
}

fn set_table_structure(doc: &mut Document, id: ItemId, structure: &TableStructure) {
    edit_item(doc, id, |item| match &mut item.element {
        Element::Table(t) => {
            t.set_structure(structure.columns.clone(), structure.rows.clone());
            true
        }
        _ => false,
    });
}

fn set_locked(doc: &mut Document, id: ItemId, locked: bool) {
    edit_item(doc, id, |item| {
        item.set_locked(locked);
        true
    });
}
