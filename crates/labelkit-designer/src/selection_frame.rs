//! Selection frame
//!
//! A synthetic helper drawn around a multi-selection. It does not own the
//! items it tracks; its rectangle is always recomputed from them (padded
//! union of their content rects) and it is the thing the user drags when
//! more than one item is selected. It implements [`Alignable`] so a group
//! snaps as one block.

use labelkit_core::{Point, Rect};
use labelkit_settings::SelectionSettings;

use crate::alignment::{AlignState, Alignable};
use crate::item::{ItemId, LabelItem};

#[derive(Debug, Clone)]
pub struct SelectionFrame {
    tracked: Vec<ItemId>,
    local_rect: Rect,
    pos: Point,
    visible: bool,
    padding: f64,
    stroke_width: f64,
    hit_margin: f64,
    align: AlignState,
}

impl SelectionFrame {
    pub fn new(settings: &SelectionSettings) -> Self {
        Self {
            tracked: Vec::new(),
            local_rect: Rect::default(),
            pos: Point::ZERO,
            visible: false,
            padding: settings.frame_padding,
            stroke_width: settings.frame_stroke_width,
            hit_margin: settings.frame_hit_margin,
            align: AlignState::default(),
        }
    }

    /// Replace the tracked set. Duplicates and ids that are not in `items`
    /// are dropped; with fewer than two left the frame hides.
    pub fn set_items(&mut self, ids: impl IntoIterator<Item = ItemId>, items: &[LabelItem]) {
        self.tracked.clear();
        for id in ids {
            if !self.tracked.contains(&id) && items.iter().any(|item| item.id == id) {
                self.tracked.push(id);
            }
        }
        self.refresh_geometry(items);
    }

    /// Recompute rectangle and position from the tracked items.
    ///
    /// Safe to call on every drag step: the result only depends on the
    /// current item geometry. Ids of items that left the scene are pruned.
    pub fn refresh_geometry(&mut self, items: &[LabelItem]) {
        self.tracked
            .retain(|id| items.iter().any(|item| item.id == *id));

        if self.tracked.len() < 2 {
            self.hide();
            return;
        }

        let union = self
            .tracked
            .iter()
            .filter_map(|id| items.iter().find(|item| item.id == *id))
            .map(|item| {
                let rect = item.content_rect_scene();
                if rect.is_valid() {
                    rect
                } else {
                    item.hit_rect()
                }
            })
            .filter(|rect| rect.is_valid())
            .reduce(|acc, rect| acc.united(&rect));

        let Some(union) = union else {
            self.hide();
            return;
        };

        let padded = union.inflated(self.padding);
        self.local_rect = Rect::new(0.0, 0.0, padded.width, padded.height);
        self.pos = padded.top_left();
        self.visible = true;
    }

    fn hide(&mut self) {
        self.local_rect = Rect::default();
        self.visible = false;
        self.clear_guides();
    }

    pub fn tracked_items(&self) -> &[ItemId] {
        &self.tracked
    }

    pub fn is_tracking(&self, id: ItemId) -> bool {
        self.tracked.contains(&id)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn local_rect(&self) -> Rect {
        self.local_rect
    }

    pub fn scene_rect(&self) -> Rect {
        self.local_rect.translated(self.pos)
    }

    /// Paint bounds: the frame rectangle plus its stroke.
    pub fn bounding_rect(&self) -> Rect {
        if self.local_rect.is_null() {
            return Rect::default();
        }
        self.local_rect.inflated(self.stroke_width)
    }

    /// The frame is grabbed along its border band only, so clicks inside
    /// still reach the items underneath.
    pub fn hit_test(&self, scene: Point) -> bool {
        if !self.visible {
            return false;
        }
        let outer = self.scene_rect();
        if !outer.contains(scene) {
            return false;
        }
        let inner = outer.inflated(-self.hit_margin);
        if inner.width <= 0.0 || inner.height <= 0.0 {
            return true;
        }
        !(scene.x > inner.left()
            && scene.x < inner.right()
            && scene.y > inner.top()
            && scene.y < inner.bottom())
    }

    pub fn move_by(&mut self, delta: Point) {
        self.pos += delta;
    }
}

impl Alignable for SelectionFrame {
    fn alignment_id(&self) -> Option<ItemId> {
        None
    }

    fn content_rect_local(&self) -> Rect {
        self.local_rect
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

    fn should_ignore_for_alignment(&self, candidate: ItemId) -> bool {
        self.tracked.contains(&candidate)
    }
}
