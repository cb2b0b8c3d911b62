//! Pointer gesture state machine.
//!
//! The coordinator turns press/drag/release sequences into item mutations and,
//! once a gesture ends, into history commands. Geometry is snapshotted on
//! press before anything changes; on release the snapshots are compared with
//! the final geometry and only real changes are recorded.

use std::collections::HashMap;

use labelkit_core::{Point, Rect, Size};
use labelkit_settings::EditorConfig;
use smallvec::SmallVec;

use crate::alignment::Alignable;
use crate::commands::{add_label, DesignerCommand, MOVE_MULTIPLE_LABEL};
use crate::document::Document;
use crate::history::UndoStack;
use crate::input::{PointerEvent, ToolMode};
use crate::item::{GeometrySnapshot, ItemId, LabelItem};
use crate::model::{Element, ElementKind, HandleLayout, LabelShape, ShapeGeometry};

/// Resize handle of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    /// First end point of a segment.
    Start,
    /// Second end point of a segment.
    End,
}

impl Handle {
    fn moves_left(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::Left | Handle::BottomLeft)
    }

    fn moves_right(self) -> bool {
        matches!(self, Handle::TopRight | Handle::Right | Handle::BottomRight)
    }

    fn moves_top(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::Top | Handle::TopRight)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Handle::BottomLeft | Handle::Bottom | Handle::BottomRight)
    }
}

/// Handle positions of one item, in scene coordinates.
pub type HandlePositions = SmallVec<[(Handle, Point); 8]>;

pub fn handle_positions(item: &LabelItem) -> HandlePositions {
    let mut handles = HandlePositions::new();
    match (item.handle_layout(), &item.element) {
        (HandleLayout::Endpoints, Element::Line(line)) => {
            handles.push((Handle::Start, item.map_to_scene(line.start)));
            handles.push((Handle::End, item.map_to_scene(line.end)));
        }
        (HandleLayout::Endpoints, Element::Arrow(arrow)) => {
            handles.push((Handle::Start, item.map_to_scene(arrow.start)));
            handles.push((Handle::End, item.map_to_scene(arrow.end)));
        }
        _ => {
            let r = item.element.content_rect();
            let mid_x = r.center().x;
            let mid_y = r.center().y;
            let local = [
                (Handle::TopLeft, r.top_left()),
                (Handle::Top, Point::new(mid_x, r.top())),
                (Handle::TopRight, r.top_right()),
                (Handle::Right, Point::new(r.right(), mid_y)),
                (Handle::BottomRight, r.bottom_right()),
                (Handle::Bottom, Point::new(mid_x, r.bottom())),
                (Handle::BottomLeft, r.bottom_left()),
                (Handle::Left, Point::new(r.left(), mid_y)),
            ];
            for (handle, p) in local {
                handles.push((handle, item.map_to_scene(p)));
            }
        }
    }
    handles
}

/// What a press committed to, before the pointer has moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Move { id: ItemId },
    GroupMove,
    Vertex { id: ItemId, index: usize },
    Resize { id: ItemId, handle: Handle },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Button down, no movement yet.
    Pressed(Gesture),
    SingleDragging {
        id: ItemId,
    },
    /// Dragging the selection frame and every tracked item with it.
    GroupDragging,
    VertexDragging {
        id: ItemId,
        index: usize,
    },
    HandleResizing {
        id: ItemId,
        handle: Handle,
    },
    /// Sizing a freshly placed shape.
    Drawing {
        id: ItemId,
        anchor: Point,
    },
}

#[derive(Debug, Clone)]
pub struct DragCoordinator {
    state: DragState,
    tool: ToolMode,
    press_pos: Point,
    last_pos: Point,
    /// Items the current gesture may change, in draw order.
    moving: Vec<ItemId>,
    snapshots: HashMap<ItemId, GeometrySnapshot>,
    allow_merge: bool,
    /// Polygon being placed click by click. Its last point is the preview.
    polygon: Option<ItemId>,
    handle_size: f64,
    vertex_hit_radius: f64,
    min_item_size: f64,
}

impl DragCoordinator {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            state: DragState::Idle,
            tool: ToolMode::Select,
            press_pos: Point::ZERO,
            last_pos: Point::ZERO,
            moving: Vec::new(),
            snapshots: HashMap::new(),
            allow_merge: false,
            polygon: None,
            handle_size: config.selection.handle_size,
            vertex_hit_radius: config.selection.vertex_hit_radius,
            min_item_size: config.editing.min_item_size,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn polygon_in_progress(&self) -> Option<ItemId> {
        self.polygon
    }

    /// Ids the running gesture moves.
    pub fn moving_items(&self) -> &[ItemId] {
        &self.moving
    }

    /// Switch tools. A polygon that was still being placed is discarded.
    pub fn set_tool(&mut self, tool: ToolMode, doc: &mut Document) {
        if let Some(id) = self.polygon.take() {
            tracing::debug!("Discarding unfinished polygon {}", id);
            doc.scene.detach(id);
        }
        self.reset();
        self.tool = tool;
    }

    // Press

    pub fn press(&mut self, doc: &mut Document, history: &mut UndoStack, ev: &PointerEvent) {
        self.reset();
        self.press_pos = ev.pos;
        self.last_pos = ev.pos;

        match self.tool {
            ToolMode::Select => self.press_select(doc, ev),
            ToolMode::Insert(ElementKind::Polygon) => self.press_polygon(doc, ev),
            ToolMode::Insert(kind) if self.tool.is_drawn() => self.begin_drawing(doc, kind, ev),
            ToolMode::Insert(kind) => self.place(doc, history, kind, ev),
        }
    }

    fn press_select(&mut self, doc: &mut Document, ev: &PointerEvent) {
        // Polygon vertices sit on the bounding box, so they win over handles.
        if let Some((id, index)) = self.vertex_at(doc, ev.pos) {
            self.start_gesture(doc, Gesture::Vertex { id, index }, vec![id]);
            return;
        }

        if let Some((id, handle)) = self.handle_at(doc, ev.pos) {
            self.start_gesture(doc, Gesture::Resize { id, handle }, vec![id]);
            return;
        }

        if doc.scene.frame().hit_test(ev.pos) {
            let tracked: Vec<ItemId> = doc
                .scene
                .frame()
                .tracked_items()
                .iter()
                .copied()
                .filter(|id| doc.scene.is_movable(*id))
                .collect();
            if !tracked.is_empty() {
                self.start_gesture(doc, Gesture::GroupMove, tracked);
            }
            return;
        }

        let Some(clicked) = doc.scene.item_at(ev.pos) else {
            if !ev.modifiers.extends_selection() {
                doc.scene.clear_selection();
            }
            return;
        };

        if ev.modifiers.extends_selection() {
            doc.scene.toggle_selected(clicked);
            if !doc.scene.is_selected(clicked) {
                return;
            }
        } else if !doc.scene.is_selected(clicked) {
            doc.scene.select_only(clicked);
        }

        if !doc.scene.is_movable(clicked) {
            return;
        }

        let mut moving = doc.scene.movable_selection();
        if moving.is_empty() || !moving.contains(&clicked) {
            moving = vec![clicked];
        }

        let gesture = if doc.scene.frame().is_visible() && moving.len() > 1 {
            Gesture::GroupMove
        } else {
            moving = vec![clicked];
            Gesture::Move { id: clicked }
        };
        self.start_gesture(doc, gesture, moving);
    }

    fn start_gesture(&mut self, doc: &Document, gesture: Gesture, items: Vec<ItemId>) {
        self.snapshots = items
            .iter()
            .filter_map(|id| doc.scene.item(*id))
            .map(|item| (item.id, item.capture_geometry()))
            .collect();
        self.allow_merge = items.len() == 1;
        self.moving = items;
        self.state = DragState::Pressed(gesture);
        tracing::trace!("Pressed: {:?} on {} item(s)", gesture, self.moving.len());
    }

    /// Handle of the single selected item under `p`. Handles are only shown
    /// while the selection frame is hidden.
    fn handle_at(&self, doc: &Document, p: Point) -> Option<(ItemId, Handle)> {
        if doc.scene.frame().is_visible() {
            return None;
        }
        let selected = doc.scene.selected_ids();
        let [id] = selected.as_slice() else {
            return None;
        };
        if !doc.scene.is_movable(*id) {
            return None;
        }
        let item = doc.scene.item(*id)?;
        let half = self.handle_size / 2.0;
        handle_positions(item)
            .into_iter()
            .find(|(_, h)| (p.x - h.x).abs() <= half && (p.y - h.y).abs() <= half)
            .map(|(handle, _)| (*id, handle))
    }

    fn vertex_at(&self, doc: &Document, p: Point) -> Option<(ItemId, usize)> {
        doc.scene.selected_ids().into_iter().rev().find_map(|id| {
            if !doc.scene.is_movable(id) {
                return None;
            }
            let item = doc.scene.item(id)?;
            let polygon = item.element.as_polygon()?;
            polygon
                .vertex_at(item.map_from_scene(p), self.vertex_hit_radius)
                .map(|index| (id, index))
        })
    }

    // Tools

    fn place(
        &mut self,
        doc: &mut Document,
        history: &mut UndoStack,
        kind: ElementKind,
        ev: &PointerEvent,
    ) {
        let id = doc.scene.allocate_id();
        let mut item = LabelItem::new(id, Element::default_for(kind), ev.pos);
        item.selected = true;
        doc.scene.clear_selection();
        history.push_at(DesignerCommand::add(item, add_label(kind)), doc, ev.at);
        self.tool = ToolMode::Select;
    }

    fn begin_drawing(&mut self, doc: &mut Document, kind: ElementKind, ev: &PointerEvent) {
        let id = doc.scene.allocate_id();
        doc.scene
            .attach(LabelItem::new(id, Element::default_for(kind), ev.pos));
        self.state = DragState::Drawing { id, anchor: ev.pos };
    }

    fn press_polygon(&mut self, doc: &mut Document, ev: &PointerEvent) {
        match self.polygon {
            None => {
                let id = doc.scene.allocate_id();
                let mut item = LabelItem::new(id, Element::default_for(ElementKind::Polygon), ev.pos);
                if let Some(polygon) = item.element.as_polygon_mut() {
                    polygon.append_point(Point::ZERO);
                    polygon.append_point(Point::ZERO);
                }
                doc.scene.attach(item);
                self.polygon = Some(id);
            }
            Some(id) => {
                if let Some(item) = doc.scene.item_mut(id) {
                    let local = ev.pos - item.pos;
                    if let Some(polygon) = item.element.as_polygon_mut() {
                        polygon.set_last_point(local);
                        polygon.append_point(local);
                    }
                }
            }
        }
    }

    /// Fix the last polygon vertex and record the polygon. Needs at least
    /// three vertices; fewer discards it. Returns whether a polygon was added.
    pub fn finish_polygon(
        &mut self,
        doc: &mut Document,
        history: &mut UndoStack,
        ev: &PointerEvent,
    ) -> bool {
        let Some(id) = self.polygon.take() else {
            return false;
        };
        self.tool = ToolMode::Select;
        let Some(mut item) = doc.scene.detach(id) else {
            return false;
        };

        let origin = item.pos;
        let Some(polygon) = item.element.as_polygon_mut() else {
            return false;
        };
        polygon.set_last_point(ev.pos - origin);
        if polygon.points.len() < 4 {
            tracing::debug!("Polygon needs at least three points, discarding");
            return false;
        }
        polygon.pop_point();

        let offset = polygon.normalize();
        item.pos = origin + offset;
        item.selected = true;

        doc.scene.clear_selection();
        history.push_at(
            DesignerCommand::add(item, add_label(ElementKind::Polygon)),
            doc,
            ev.at,
        );
        true
    }

    // Drag

    pub fn drag(&mut self, doc: &mut Document, ev: &PointerEvent) {
        if let Some(id) = self.polygon {
            if let Some(item) = doc.scene.item_mut(id) {
                let local = ev.pos - item.pos;
                if let Some(polygon) = item.element.as_polygon_mut() {
                    polygon.set_last_point(local);
                }
            }
            return;
        }

        if let DragState::Pressed(gesture) = self.state {
            self.state = match gesture {
                Gesture::Move { id } => DragState::SingleDragging { id },
                Gesture::GroupMove => DragState::GroupDragging,
                Gesture::Vertex { id, index } => DragState::VertexDragging { id, index },
                Gesture::Resize { id, handle } => DragState::HandleResizing { id, handle },
            };
        }

        match self.state {
            DragState::Idle | DragState::Pressed(_) => {}
            DragState::SingleDragging { id } => self.drag_single(doc, id, ev),
            DragState::GroupDragging => self.drag_group(doc, ev),
            DragState::VertexDragging { id, index } => {
                if let Some(item) = doc.scene.item_mut(id) {
                    let local = item.map_from_scene(ev.pos);
                    if let Some(polygon) = item.element.as_polygon_mut() {
                        polygon.set_vertex(index, local);
                    }
                }
            }
            DragState::HandleResizing { id, handle } => self.drag_handle(doc, id, handle, ev),
            DragState::Drawing { id, anchor } => self.drag_drawing(doc, id, anchor, ev.pos),
        }
        self.last_pos = ev.pos;
    }

    fn drag_single(&mut self, doc: &mut Document, id: ItemId, ev: &PointerEvent) {
        let Some(start) = self.snapshots.get(&id).map(|s| s.pos) else {
            return;
        };
        let ctx = doc.scene.snap_context();
        let Some(item) = doc.scene.item_mut(id) else {
            return;
        };
        item.set_pos(start + (ev.pos - self.press_pos));
        let snapped = item.handle_move_for_alignment(&ctx, ev.modifiers);
        tracing::trace!("Drag {} to {:?} (snap {:?})", id, item.pos, snapped);
    }

    fn drag_group(&mut self, doc: &mut Document, ev: &PointerEvent) {
        let ctx = doc.scene.snap_context();
        let frame = doc.scene.frame_mut();
        let before = frame.pos();
        frame.move_by(ev.pos - self.last_pos);
        frame.handle_move_for_alignment(&ctx, ev.modifiers);
        let delta = frame.pos() - before;

        if !delta.is_zero() {
            for id in &self.moving {
                if !doc.scene.is_movable(*id) {
                    continue;
                }
                if let Some(item) = doc.scene.item_mut(*id) {
                    item.pos += delta;
                }
            }
        }
        doc.scene.refresh_selection_frame();
        tracing::trace!("Group step {:?}", delta);
    }

    fn drag_handle(&mut self, doc: &mut Document, id: ItemId, handle: Handle, ev: &PointerEvent) {
        let Some(snapshot) = self.snapshots.get(&id).cloned() else {
            return;
        };
        let min = self.min_item_size;
        let press = self.press_pos;
        let Some(item) = doc.scene.item_mut(id) else {
            return;
        };

        item.restore_geometry(&snapshot);

        if matches!(handle, Handle::Start | Handle::End) {
            let local = item.map_from_scene(ev.pos);
            if let ShapeGeometry::Segment { start, end } = snapshot.shape {
                let shape = match handle {
                    Handle::Start => ShapeGeometry::Segment { start: local, end },
                    _ => ShapeGeometry::Segment { start, end: local },
                };
                item.element.set_geometry(&shape);
            }
            return;
        }

        let start_size = item.element.content_rect().size();
        let d = item.map_from_scene(item.pos + (ev.pos - press));

        let mut width = start_size.width;
        let mut height = start_size.height;
        if handle.moves_left() {
            width -= d.x;
        } else if handle.moves_right() {
            width += d.x;
        }
        if handle.moves_top() {
            height -= d.y;
        } else if handle.moves_bottom() {
            height += d.y;
        }
        let size = Size::new(width, height).clamped_to(min);

        let mut shift = Point::ZERO;
        if handle.moves_left() {
            shift.x = start_size.width - size.width;
        }
        if handle.moves_top() {
            shift.y = start_size.height - size.height;
        }

        item.element.resize(size);
        item.pos = item.transform.map_point(snapshot.pos, shift);
    }

    fn drag_drawing(&mut self, doc: &mut Document, id: ItemId, anchor: Point, current: Point) {
        let Some(item) = doc.scene.item_mut(id) else {
            return;
        };
        match item.handle_layout() {
            HandleLayout::Endpoints => {
                let end = current - item.pos;
                item.element.set_geometry(&ShapeGeometry::Segment {
                    start: Point::ZERO,
                    end,
                });
            }
            HandleLayout::Box => {
                let rect = Rect::from_points(anchor, current);
                item.pos = rect.top_left();
                item.element.resize(rect.size());
            }
        }
    }

    // Release

    pub fn release(&mut self, doc: &mut Document, history: &mut UndoStack, ev: &PointerEvent) {
        match self.state {
            DragState::Idle | DragState::Pressed(_) => {}
            DragState::SingleDragging { .. } | DragState::GroupDragging => {
                self.finish_move(doc, history, ev)
            }
            DragState::VertexDragging { id, index } => self.finish_vertex(doc, history, id, index, ev),
            DragState::HandleResizing { id, .. } => self.finish_resize(doc, history, id, ev),
            DragState::Drawing { id, .. } => self.finish_drawing(doc, history, id, ev),
        }
        self.reset();
    }

    fn finish_move(&mut self, doc: &mut Document, history: &mut UndoStack, ev: &PointerEvent) {
        for id in &self.moving {
            if let Some(item) = doc.scene.item_mut(*id) {
                item.handle_release_for_alignment();
            }
        }
        doc.scene.frame_mut().handle_release_for_alignment();

        let mut commands = Vec::new();
        for id in &self.moving {
            let (Some(before), Some(item)) = (self.snapshots.get(id), doc.scene.item(*id)) else {
                continue;
            };
            let after = item.capture_geometry();
            if after == *before {
                continue;
            }
            let cmd = if after.same_shape(before) {
                DesignerCommand::move_item(*id, before.pos, after.pos, self.allow_merge)
            } else {
                DesignerCommand::resize(*id, item.kind(), before.clone(), after)
            };
            commands.push(cmd);
        }

        match commands.len() {
            0 => {}
            1 => {
                if let Some(cmd) = commands.pop() {
                    history.push_at(cmd, doc, ev.at);
                }
            }
            n => {
                tracing::debug!("Recording move of {} items", n);
                history.begin_macro(MOVE_MULTIPLE_LABEL);
                for mut cmd in commands {
                    cmd.disallow_merge();
                    history.push_at(cmd, doc, ev.at);
                }
                history.end_macro();
            }
        }
        doc.scene.refresh_selection_frame();
    }

    fn finish_vertex(
        &mut self,
        doc: &mut Document,
        history: &mut UndoStack,
        id: ItemId,
        index: usize,
        ev: &PointerEvent,
    ) {
        let (Some(before), Some(item)) = (self.snapshots.get(&id), doc.scene.item_mut(id)) else {
            return;
        };
        // Keep the local origin at the top-left of the points; the scene
        // position of every vertex stays put.
        let offset = item
            .element
            .as_polygon_mut()
            .map_or(Point::ZERO, |polygon| polygon.normalize());
        if !offset.is_zero() {
            item.pos = item.map_to_scene(offset);
        }
        let after = item.capture_geometry();
        if after != *before {
            let cmd = DesignerCommand::move_vertex(id, index, before.clone(), after);
            history.push_at(cmd, doc, ev.at);
        }
        doc.scene.refresh_selection_frame();
    }

    fn finish_resize(
        &mut self,
        doc: &mut Document,
        history: &mut UndoStack,
        id: ItemId,
        ev: &PointerEvent,
    ) {
        let (Some(before), Some(item)) = (self.snapshots.get(&id), doc.scene.item(id)) else {
            return;
        };
        let after = item.capture_geometry();
        if after != *before {
            let cmd = DesignerCommand::resize(id, item.kind(), before.clone(), after);
            history.push_at(cmd, doc, ev.at);
        }
        doc.scene.refresh_selection_frame();
    }

    fn finish_drawing(
        &mut self,
        doc: &mut Document,
        history: &mut UndoStack,
        id: ItemId,
        ev: &PointerEvent,
    ) {
        self.tool = ToolMode::Select;
        let Some(mut item) = doc.scene.detach(id) else {
            return;
        };
        let min = self.min_item_size;
        match item.element.geometry() {
            ShapeGeometry::Segment { start, end } if (end - start).length_squared() == 0.0 => {
                item.element.set_geometry(&ShapeGeometry::Segment {
                    start,
                    end: start + Point::new(min, 0.0),
                });
            }
            ShapeGeometry::Box(size) if size.width < min || size.height < min => {
                item.element.resize(size.clamped_to(min));
            }
            _ => {}
        }
        let kind = item.kind();
        item.selected = true;
        doc.scene.clear_selection();
        history.push_at(DesignerCommand::add(item, add_label(kind)), doc, ev.at);
    }

    fn reset(&mut self) {
        self.state = DragState::Idle;
        self.moving.clear();
        self.snapshots.clear();
        self.allow_merge = false;
    }
}
