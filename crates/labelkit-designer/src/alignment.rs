//! Alignment capability
//!
//! Any item that can be dragged implements [`Alignable`]: it reports a content
//! rectangle and position, carries lock/enable flags, and gets snapping to
//! the label background and to sibling items for free.
//!
//! Snapping checks each axis independently. Per axis the first comparison
//! under the threshold wins and the item moves by exactly the difference, so
//! the matched coordinates become equal. The label background is checked
//! before any sibling; once an axis has snapped it is skipped for the
//! remaining candidates.

use labelkit_core::{ItemTransform, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::input::Modifiers;
use crate::item::ItemId;

/// A guide segment in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub from: Point,
    pub to: Point,
}

impl GuideLine {
    fn vertical(x: f64, top: f64, bottom: f64) -> Self {
        Self {
            from: Point::new(x, top),
            to: Point::new(x, bottom),
        }
    }

    fn horizontal(y: f64, left: f64, right: f64) -> Self {
        Self {
            from: Point::new(left, y),
            to: Point::new(right, y),
        }
    }
}

/// Transient guide feedback of one item. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Guides {
    /// Guide for an X-axis match (a vertical line).
    pub vertical: Option<GuideLine>,
    /// Guide for a Y-axis match (a horizontal line).
    pub horizontal: Option<GuideLine>,
}

impl Guides {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }

    pub fn clear(&mut self) {
        self.vertical = None;
        self.horizontal = None;
    }
}

/// Per-item alignment flags and guide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignState {
    pub locked: bool,
    pub alignment_enabled: bool,
    #[serde(skip)]
    pub guides: Guides,
}

impl Default for AlignState {
    fn default() -> Self {
        Self {
            locked: false,
            alignment_enabled: true,
            guides: Guides::default(),
        }
    }
}

/// Something another item can snap to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    pub id: ItemId,
    pub rect: Rect,
}

/// Everything one snap pass looks at.
#[derive(Debug, Clone, Default)]
pub struct SnapContext {
    /// Label background, checked before any target.
    pub background: Option<Rect>,
    /// Visible items, topmost first. Includes locked items and the mover
    /// itself; the mover filters what it must not align to.
    pub targets: Vec<SnapTarget>,
    pub threshold: f64,
    /// Global alignment switch.
    pub enabled: bool,
}

/// One axis snap: the coordinate that matched and where it has to go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSnap {
    pub value: f64,
    pub target: f64,
}

impl AxisSnap {
    pub fn delta(&self) -> f64 {
        self.target - self.value
    }

    /// New position coordinate that puts `value` exactly on `target`.
    fn apply(&self, pos: f64) -> f64 {
        let offset = self.value - pos;
        self.target - offset
    }
}

/// Result of [`find_snap`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SnapOutcome {
    pub x: Option<AxisSnap>,
    pub y: Option<AxisSnap>,
    pub guides: Guides,
}

impl SnapOutcome {
    pub fn delta(&self) -> Point {
        Point::new(
            self.x.map_or(0.0, |s| s.delta()),
            self.y.map_or(0.0, |s| s.delta()),
        )
    }
}

fn first_match(threshold: f64, pairs: &[(f64, f64)]) -> Option<AxisSnap> {
    pairs
        .iter()
        .find(|(value, target)| (target - value).abs() < threshold)
        .map(|&(value, target)| AxisSnap { value, target })
}

/// Find the snap for a rectangle against the background and a list of
/// candidate rectangles. Pure geometry; eligibility filtering is the
/// caller's job.
pub fn find_snap<'a>(
    rect: Rect,
    background: Option<Rect>,
    candidates: impl IntoIterator<Item = &'a Rect>,
    threshold: f64,
) -> SnapOutcome {
    let mut current = rect;
    let mut outcome = SnapOutcome::default();

    if let Some(bg) = background {
        if let Some(snap) = first_match(
            threshold,
            &[
                (current.center().y, bg.center().y),
                (current.top(), bg.top()),
                (current.bottom(), bg.bottom()),
            ],
        ) {
            current = current.translated(Point::new(0.0, snap.delta()));
            outcome.y = Some(snap);
            outcome.guides.horizontal =
                Some(GuideLine::horizontal(snap.target, bg.left(), bg.right()));
        }

        if let Some(snap) = first_match(
            threshold,
            &[
                (current.center().x, bg.center().x),
                (current.left(), bg.left()),
                (current.right(), bg.right()),
            ],
        ) {
            current = current.translated(Point::new(snap.delta(), 0.0));
            outcome.x = Some(snap);
            outcome.guides.vertical = Some(GuideLine::vertical(snap.target, bg.top(), bg.bottom()));
        }
    }

    for other in candidates {
        if outcome.x.is_some() && outcome.y.is_some() {
            break;
        }

        if outcome.x.is_none() {
            if let Some(snap) = first_match(
                threshold,
                &[
                    (current.center().x, other.center().x),
                    (current.left(), other.left()),
                    (current.right(), other.right()),
                    (current.left(), other.right()),
                    (current.right(), other.left()),
                ],
            ) {
                current = current.translated(Point::new(snap.delta(), 0.0));
                outcome.x = Some(snap);
                outcome.guides.vertical = Some(GuideLine::vertical(
                    snap.target,
                    current.top().min(other.top()),
                    current.bottom().max(other.bottom()),
                ));
            }
        }

        if outcome.y.is_none() {
            if let Some(snap) = first_match(
                threshold,
                &[
                    (current.center().y, other.center().y),
                    (current.top(), other.top()),
                    (current.bottom(), other.bottom()),
                    (current.top(), other.bottom()),
                    (current.bottom(), other.top()),
                ],
            ) {
                current = current.translated(Point::new(0.0, snap.delta()));
                outcome.y = Some(snap);
                outcome.guides.horizontal = Some(GuideLine::horizontal(
                    snap.target,
                    current.left().min(other.left()),
                    current.right().max(other.right()),
                ));
            }
        }
    }

    outcome
}

/// Alignment capability.
///
/// Implementors supply geometry and state access; snapping, guide handling
/// and the lock/enable rules come from the provided methods.
pub trait Alignable {
    /// Identity of the item in the scene; `None` for helpers that are not
    /// scene items, such as the selection frame.
    fn alignment_id(&self) -> Option<ItemId>;

    /// Alignment rectangle in local coordinates. Narrower than the paint and
    /// handle bounds.
    fn content_rect_local(&self) -> Rect;

    fn pos(&self) -> Point;

    fn set_pos(&mut self, pos: Point);

    fn align_state(&self) -> &AlignState;

    fn align_state_mut(&mut self) -> &mut AlignState;

    fn item_transform(&self) -> ItemTransform {
        ItemTransform::identity()
    }

    fn content_rect_scene(&self) -> Rect {
        self.item_transform()
            .map_rect(self.pos(), &self.content_rect_local())
    }

    fn is_locked(&self) -> bool {
        self.align_state().locked
    }

    fn set_locked(&mut self, locked: bool) {
        let state = self.align_state_mut();
        state.locked = locked;
        if locked {
            state.guides.clear();
        }
    }

    fn is_alignment_enabled(&self) -> bool {
        self.align_state().alignment_enabled
    }

    fn set_alignment_enabled(&mut self, enabled: bool) {
        let state = self.align_state_mut();
        state.alignment_enabled = enabled;
        if !enabled {
            state.guides.clear();
        }
    }

    fn guides(&self) -> &Guides {
        &self.align_state().guides
    }

    fn clear_guides(&mut self) {
        self.align_state_mut().guides.clear();
    }

    /// Candidates this item must never align to, beyond itself.
    fn should_ignore_for_alignment(&self, _candidate: ItemId) -> bool {
        false
    }

    /// Snap against the context and move by the exact snap delta.
    ///
    /// Returns the applied displacement. Locked or alignment-disabled items,
    /// and any item while alignment is globally off, do not move and lose
    /// their guides.
    fn check_and_apply_snap(&mut self, ctx: &SnapContext) -> Point {
        if self.is_locked() || !self.is_alignment_enabled() || !ctx.enabled {
            self.clear_guides();
            return Point::ZERO;
        }

        let own = self.alignment_id();
        let rects: Vec<Rect> = ctx
            .targets
            .iter()
            .filter(|t| Some(t.id) != own && !self.should_ignore_for_alignment(t.id))
            .map(|t| t.rect)
            .collect();

        let outcome = find_snap(
            self.content_rect_scene(),
            ctx.background,
            &rects,
            ctx.threshold,
        );

        let before = self.pos();
        let mut after = before;
        if let Some(snap) = outcome.x {
            after.x = snap.apply(before.x);
        }
        if let Some(snap) = outcome.y {
            after.y = snap.apply(before.y);
        }
        if after != before {
            self.set_pos(after);
        }
        self.align_state_mut().guides = outcome.guides;

        after - before
    }

    /// Per-move-step hook: Alt suppresses snapping for this step.
    fn handle_move_for_alignment(&mut self, ctx: &SnapContext, modifiers: Modifiers) -> Point {
        if modifiers.alt {
            self.clear_guides();
            return Point::ZERO;
        }
        self.check_and_apply_snap(ctx)
    }

    /// Gesture end: guides never outlive the drag.
    fn handle_release_for_alignment(&mut self) {
        self.clear_guides();
    }
}
