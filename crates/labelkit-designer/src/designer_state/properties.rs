use super::DesignerState;
use crate::alignment::Alignable;
use crate::commands::{ChangeProperty, DesignerCommand};
use crate::error::{DesignerError, DesignerResult};
use crate::item::ItemId;
use crate::model::{Element, ElementKind, LabelShape, PenStyle, TableStructure};

impl DesignerState {
    pub fn change_text(&mut self, id: ItemId, text: impl Into<String>) -> DesignerResult<()> {
        let old = match &self.require_item(id)?.element {
            Element::Text(t) => t.text.clone(),
            _ => return Err(mismatch(id, ElementKind::Text)),
        };
        let new = text.into();
        if old != new {
            self.push_change(DesignerCommand::ChangeText(ChangeProperty::new(id, old, new)));
        }
        Ok(())
    }

    pub fn change_barcode_data(&mut self, id: ItemId, data: impl Into<String>) -> DesignerResult<()> {
        let old = match &self.require_item(id)?.element {
            Element::Barcode(b) => b.data.clone(),
            _ => return Err(mismatch(id, ElementKind::Barcode)),
        };
        let new = data.into();
        if old != new {
            self.push_change(DesignerCommand::ChangeBarcodeData(ChangeProperty::new(
                id, old, new,
            )));
        }
        Ok(())
    }

    pub fn change_qr_data(&mut self, id: ItemId, data: impl Into<String>) -> DesignerResult<()> {
        let old = match &self.require_item(id)?.element {
            Element::QrCode(q) => q.data.clone(),
            _ => return Err(mismatch(id, ElementKind::QrCode)),
        };
        let new = data.into();
        if old != new {
            self.push_change(DesignerCommand::ChangeQrCodeData(ChangeProperty::new(
                id, old, new,
            )));
        }
        Ok(())
    }

    /// Negative radii are clamped to zero.
    pub fn change_corner_radius(&mut self, id: ItemId, radius: f64) -> DesignerResult<()> {
        let old = match &self.require_item(id)?.element {
            Element::Rectangle(r) => r.corner_radius,
            _ => return Err(mismatch(id, ElementKind::Rectangle)),
        };
        let new = radius.max(0.0);
        if old != new {
            self.push_change(DesignerCommand::ChangeCornerRadius(ChangeProperty::new(
                id, old, new,
            )));
        }
        Ok(())
    }

    pub fn change_pen_style(&mut self, id: ItemId, pen: PenStyle) -> DesignerResult<()> {
        let old = self
            .require_item(id)?
            .element
            .pen()
            .cloned()
            .ok_or(DesignerError::NoPen(id))?;
        if old != pen {
            self.push_change(DesignerCommand::ChangePenStyle(ChangeProperty::new(
                id, old, pen,
            )));
        }
        Ok(())
    }

    /// Replace column widths and row heights. Tracks are clamped to the
    /// minimum item size; an empty list becomes one minimum-size track.
    pub fn change_table_structure(
        &mut self,
        id: ItemId,
        columns: Vec<f64>,
        rows: Vec<f64>,
    ) -> DesignerResult<()> {
        let old = match &self.require_item(id)?.element {
            Element::Table(t) => t.structure(),
            _ => return Err(mismatch(id, ElementKind::Table)),
        };
        let min = self.config.editing.min_item_size;
        let new = TableStructure {
            columns: normalize_tracks(columns, min),
            rows: normalize_tracks(rows, min),
        };
        if old != new {
            self.push_change(DesignerCommand::ChangeTableStructure(ChangeProperty::new(
                id, old, new,
            )));
        }
        Ok(())
    }

    pub fn set_locked(&mut self, id: ItemId, locked: bool) -> DesignerResult<()> {
        let old = self.require_item(id)?.is_locked();
        if old != locked {
            self.push_change(DesignerCommand::SetLocked(ChangeProperty::new(
                id, old, locked,
            )));
        }
        Ok(())
    }

    /// Per-item alignment switch. Not recorded in history.
    pub fn set_item_alignment_enabled(&mut self, id: ItemId, enabled: bool) -> DesignerResult<()> {
        let item = self
            .document
            .scene
            .item_mut(id)
            .ok_or(DesignerError::ItemNotFound(id))?;
        item.set_alignment_enabled(enabled);
        Ok(())
    }

    /// Global alignment switch.
    pub fn set_alignment_enabled(&mut self, enabled: bool) {
        self.document.scene.set_alignment_enabled(enabled);
    }

    /// Start inline text editing; the item cannot be dragged meanwhile.
    pub fn begin_text_edit(&mut self, id: ItemId) -> DesignerResult<()> {
        if !matches!(self.require_item(id)?.element, Element::Text(_)) {
            return Err(mismatch(id, ElementKind::Text));
        }
        self.document.scene.begin_text_edit(id);
        Ok(())
    }

    /// End inline editing and record the edited text.
    pub fn commit_text_edit(&mut self, text: impl Into<String>) -> DesignerResult<()> {
        match self.document.scene.end_text_edit() {
            Some(id) => self.change_text(id, text),
            None => Ok(()),
        }
    }

    fn push_change(&mut self, cmd: DesignerCommand) {
        self.history.push(cmd, &mut self.document);
        self.document.scene.refresh_selection_frame();
    }
}

fn mismatch(id: ItemId, expected: ElementKind) -> DesignerError {
    DesignerError::KindMismatch { id, expected }
}

fn normalize_tracks(tracks: Vec<f64>, min: f64) -> Vec<f64> {
    let tracks: Vec<f64> = tracks
        .into_iter()
        .map(|t| if t.is_finite() { t.max(min) } else { min })
        .collect();
    if tracks.is_empty() {
        vec![min]
    } else {
        tracks
    }
}
