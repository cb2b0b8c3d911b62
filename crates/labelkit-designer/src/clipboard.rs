//! Document clipboard
//!
//! Holds at most one copied element. The element enum is the tagged union
//! over item kinds, so "what was copied last" and "what would paste" are the
//! same value.

use labelkit_core::{ItemTransform, Point};
use serde::{Deserialize, Serialize};

use crate::item::{ItemId, LabelItem};
use crate::model::{Element, ElementKind, LabelShape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub element: Element,
    pub transform: ItemTransform,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clipboard {
    entry: Option<ClipboardEntry>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(&mut self, item: &LabelItem) {
        tracing::debug!("Copied {} {}", item.kind().display_name(), item.id);
        self.entry = Some(ClipboardEntry {
            element: item.element.clone(),
            transform: item.transform,
        });
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn has_content(&self) -> bool {
        self.entry.is_some()
    }

    pub fn kind(&self) -> Option<ElementKind> {
        self.entry.as_ref().map(|e| e.element.kind())
    }

    pub fn entry(&self) -> Option<&ClipboardEntry> {
        self.entry.as_ref()
    }

    /// New unselected item built from the clipboard content.
    pub fn instantiate(&self, id: ItemId, pos: Point) -> Option<LabelItem> {
        let entry = self.entry.as_ref()?;
        let mut item = LabelItem::new(id, entry.element.clone(), pos);
        item.transform = entry.transform;
        Some(item)
    }

    /// Full clipboard state, for commands that have to put it back.
    pub fn snapshot(&self) -> Option<ClipboardEntry> {
        self.entry.clone()
    }

    pub fn restore(&mut self, snapshot: Option<ClipboardEntry>) {
        self.entry = snapshot;
    }
}
