use labelkit_core::{Point, Rect, Size};
use labelkit_designer::model::{LabelLine, LabelPolygon};
use labelkit_designer::{
    handle_positions, Alignable, DesignerCommand, DesignerState, DragState, Element, ElementKind,
    Gesture, Handle, ItemId, LabelItem, LabelShape, Modifiers, ShapeGeometry, ToolMode,
};

use crate::support::{rect_item, Clock};

fn state_with(rects: &[(f64, f64, f64, f64)]) -> (DesignerState, Vec<ItemId>) {
    let mut state = DesignerState::default();
    let mut ids = Vec::new();
    for (i, (x, y, w, h)) in rects.iter().enumerate() {
        let item = rect_item(i as u64 + 1, *x, *y, *w, *h);
        ids.push(item.id);
        state.document.scene.attach(item);
    }
    (state, ids)
}

fn drag(state: &mut DesignerState, clock: &mut Clock, from: (f64, f64), to: (f64, f64)) {
    state.pointer_press(&clock.event(from.0, from.1));
    state.pointer_drag(&clock.event(to.0, to.1));
    state.pointer_release(&clock.event(to.0, to.1));
}

fn pos(state: &DesignerState, id: ItemId) -> Point {
    state.item(id).unwrap().pos
}

fn size(state: &DesignerState, id: ItemId) -> Size {
    state.item(id).unwrap().size()
}

fn segment(start: Point, end: Point) -> ShapeGeometry {
    ShapeGeometry::Segment { start, end }
}

#[test]
fn test_single_drag_records_one_move() {
    let (mut state, ids) = state_with(&[(10.0, 10.0, 50.0, 50.0)]);
    let mut clock = Clock::new();

    state.pointer_press(&clock.event(30.0, 30.0));
    assert_eq!(
        state.coordinator.state(),
        DragState::Pressed(Gesture::Move { id: ids[0] })
    );
    state.pointer_drag(&clock.event(30.0, 55.0));
    assert_eq!(
        state.coordinator.state(),
        DragState::SingleDragging { id: ids[0] }
    );
    state.pointer_drag(&clock.event(30.0, 80.0));
    state.pointer_release(&clock.event(30.0, 80.0));

    assert!(state.coordinator.is_idle());
    assert_eq!(pos(&state, ids[0]), Point::new(10.0, 60.0));
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history.undo_text(), "Move item");
    assert_eq!(state.selected_ids(), vec![ids[0]]);

    assert!(state.undo());
    assert_eq!(pos(&state, ids[0]), Point::new(10.0, 10.0));
    assert!(state.redo());
    assert_eq!(pos(&state, ids[0]), Point::new(10.0, 60.0));
}

#[test]
fn test_click_without_movement_records_nothing() {
    let (mut state, ids) = state_with(&[(10.0, 10.0, 50.0, 50.0)]);
    let mut clock = Clock::new();

    state.pointer_press(&clock.event(30.0, 30.0));
    state.pointer_release(&clock.event(30.0, 30.0));

    assert!(state.history.is_empty());
    assert!(state.coordinator.is_idle());
    assert_eq!(state.selected_ids(), vec![ids[0]]);
}

#[test]
fn test_click_on_empty_space_clears_selection() {
    let (mut state, ids) = state_with(&[(10.0, 10.0, 50.0, 50.0)]);
    let mut clock = Clock::new();
    state.document.scene.select_only(ids[0]);

    state.pointer_press(&clock.event(300.0, 300.0));
    state.pointer_release(&clock.event(300.0, 300.0));

    assert!(state.selected_ids().is_empty());
    assert!(state.history.is_empty());
}

#[test]
fn test_ctrl_click_extends_selection() {
    let (mut state, ids) = state_with(&[(0.0, 0.0, 20.0, 20.0), (100.0, 0.0, 20.0, 20.0)]);
    let mut clock = Clock::new();
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    state.pointer_press(&clock.event(10.0, 10.0));
    state.pointer_release(&clock.event(10.0, 10.0));
    state.pointer_press(&clock.event(110.0, 10.0).with_modifiers(ctrl));
    state.pointer_release(&clock.event(110.0, 10.0));

    assert_eq!(state.selected_ids(), ids);
    assert!(state.document.scene.frame().is_visible());

    // Ctrl-click on a selected item deselects it and starts nothing.
    state.pointer_press(&clock.event(110.0, 10.0).with_modifiers(ctrl));
    assert!(state.coordinator.is_idle());
    assert_eq!(state.selected_ids(), vec![ids[0]]);
    assert!(!state.document.scene.frame().is_visible());
}

#[test]
fn test_group_drag_records_one_macro() {
    let (mut state, ids) = state_with(&[
        (0.0, 0.0, 20.0, 20.0),
        (100.0, 0.0, 20.0, 20.0),
        (200.0, 0.0, 20.0, 20.0),
    ]);
    let mut clock = Clock::new();
    state.document.scene.select_all();
    assert!(state.document.scene.frame().is_visible());

    state.pointer_press(&clock.event(10.0, 10.0));
    assert_eq!(
        state.coordinator.state(),
        DragState::Pressed(Gesture::GroupMove)
    );
    state.pointer_drag(&clock.event(20.0, 10.0));
    state.pointer_drag(&clock.event(30.0, 10.0));
    state.pointer_release(&clock.event(30.0, 10.0));

    assert_eq!(pos(&state, ids[0]), Point::new(20.0, 0.0));
    assert_eq!(pos(&state, ids[1]), Point::new(120.0, 0.0));
    assert_eq!(pos(&state, ids[2]), Point::new(220.0, 0.0));
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history.undo_text(), "Move multiple items");
    let Some(DesignerCommand::Macro(group)) = state.history.command(0) else {
        panic!("expected a macro");
    };
    assert_eq!(group.children.len(), 3);
    assert_eq!(
        state.document.scene.frame().scene_rect(),
        Rect::new(14.0, -6.0, 232.0, 32.0)
    );

    assert!(state.undo());
    assert_eq!(pos(&state, ids[0]), Point::new(0.0, 0.0));
    assert_eq!(pos(&state, ids[2]), Point::new(200.0, 0.0));
    assert_eq!(
        state.document.scene.frame().scene_rect(),
        Rect::new(-6.0, -6.0, 232.0, 32.0)
    );
}

#[test]
fn test_group_drag_from_frame_border() {
    let (mut state, ids) = state_with(&[(0.0, 0.0, 20.0, 20.0), (100.0, 0.0, 20.0, 20.0)]);
    let mut clock = Clock::new();
    state.document.scene.select_all();

    // The frame spans (-6, -6) to (126, 26); (-4, 10) is on its left band.
    drag(&mut state, &mut clock, (-4.0, 10.0), (16.0, 10.0));

    assert_eq!(pos(&state, ids[0]), Point::new(20.0, 0.0));
    assert_eq!(pos(&state, ids[1]), Point::new(120.0, 0.0));
    assert_eq!(state.history.undo_text(), "Move multiple items");
}

#[test]
fn test_locked_items_stay_put() {
    let (mut state, ids) = state_with(&[
        (0.0, 0.0, 20.0, 20.0),
        (100.0, 0.0, 20.0, 20.0),
        (200.0, 0.0, 20.0, 20.0),
    ]);
    let mut clock = Clock::new();
    state.document.scene.set_locked(ids[2], true);

    // A locked item alone does not drag at all.
    drag(&mut state, &mut clock, (210.0, 10.0), (260.0, 10.0));
    assert_eq!(pos(&state, ids[2]), Point::new(200.0, 0.0));
    assert!(state.history.is_empty());

    state.document.scene.select_all();
    drag(&mut state, &mut clock, (10.0, 10.0), (30.0, 10.0));

    assert_eq!(pos(&state, ids[0]), Point::new(20.0, 0.0));
    assert_eq!(pos(&state, ids[1]), Point::new(120.0, 0.0));
    assert_eq!(pos(&state, ids[2]), Point::new(200.0, 0.0));
    let Some(DesignerCommand::Macro(group)) = state.history.command(0) else {
        panic!("expected a macro");
    };
    assert_eq!(group.children.len(), 2);
}

#[test]
fn test_item_in_text_edit_is_not_dragged() {
    let mut state = DesignerState::default();
    let id = state.add_element(ElementKind::Text, Point::new(10.0, 10.0));
    state.begin_text_edit(id).unwrap();
    let before = state.history.len();
    let mut clock = Clock::new();

    let inside = state.item(id).unwrap().content_rect_scene().center();
    drag(&mut state, &mut clock, (inside.x, inside.y), (inside.x + 40.0, inside.y));

    assert_eq!(pos(&state, id), Point::new(10.0, 10.0));
    assert_eq!(state.history.len(), before);
}

#[test]
fn test_frame_drag_leaves_text_edit_item() {
    let (mut state, ids) = state_with(&[(0.0, 0.0, 20.0, 20.0), (100.0, 0.0, 20.0, 20.0)]);
    let mut clock = Clock::new();
    state.document.scene.select_all();
    assert!(state.document.scene.begin_text_edit(ids[0]));

    drag(&mut state, &mut clock, (-4.0, 10.0), (16.0, 10.0));

    assert_eq!(pos(&state, ids[0]), Point::new(0.0, 0.0));
    assert_eq!(pos(&state, ids[1]), Point::new(120.0, 0.0));
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history.undo_text(), "Move item");
}

#[test]
fn test_frame_drag_with_nothing_movable() {
    let (mut state, ids) = state_with(&[(0.0, 0.0, 20.0, 20.0), (100.0, 0.0, 20.0, 20.0)]);
    let mut clock = Clock::new();
    state.document.scene.select_all();
    state.document.scene.set_locked(ids[0], true);
    assert!(state.document.scene.begin_text_edit(ids[1]));

    state.pointer_press(&clock.event(-4.0, 10.0));
    assert!(state.coordinator.is_idle());
    state.pointer_drag(&clock.event(16.0, 10.0));
    state.pointer_release(&clock.event(16.0, 10.0));

    assert_eq!(pos(&state, ids[0]), Point::new(0.0, 0.0));
    assert_eq!(pos(&state, ids[1]), Point::new(100.0, 0.0));
    assert!(state.history.is_empty());
}

#[test]
fn test_resize_with_corner_handle() {
    let (mut state, ids) = state_with(&[(10.0, 10.0, 50.0, 50.0)]);
    let mut clock = Clock::new();
    state.document.scene.select_only(ids[0]);

    state.pointer_press(&clock.event(60.0, 60.0));
    assert_eq!(
        state.coordinator.state(),
        DragState::Pressed(Gesture::Resize {
            id: ids[0],
            handle: Handle::BottomRight
        })
    );
    state.pointer_drag(&clock.event(80.0, 70.0));
    state.pointer_release(&clock.event(80.0, 70.0));

    assert_eq!(size(&state, ids[0]), Size::new(70.0, 60.0));
    assert_eq!(pos(&state, ids[0]), Point::new(10.0, 10.0));
    assert_eq!(state.history.undo_text(), "Resize item");

    state.undo();
    assert_eq!(size(&state, ids[0]), Size::new(50.0, 50.0));
}

#[test]
fn test_left_handle_moves_position_and_clamps() {
    let (mut state, ids) = state_with(&[(10.0, 10.0, 50.0, 50.0)]);
    let mut clock = Clock::new();
    state.document.scene.select_only(ids[0]);

    drag(&mut state, &mut clock, (10.0, 35.0), (30.0, 35.0));
    assert_eq!(size(&state, ids[0]), Size::new(30.0, 50.0));
    assert_eq!(pos(&state, ids[0]), Point::new(30.0, 10.0));

    // Past the right edge the width stops at the minimum item size and the
    // right edge stays where it was.
    drag(&mut state, &mut clock, (30.0, 35.0), (200.0, 35.0));
    assert_eq!(size(&state, ids[0]), Size::new(10.0, 50.0));
    assert_eq!(pos(&state, ids[0]), Point::new(50.0, 10.0));

    // Both resizes happened in quick succession and collapse into one step.
    assert_eq!(state.history.len(), 1);
    state.undo();
    assert_eq!(size(&state, ids[0]), Size::new(50.0, 50.0));
    assert_eq!(pos(&state, ids[0]), Point::new(10.0, 10.0));
}

#[test]
fn test_handles_hidden_for_multi_selection() {
    let (mut state, ids) = state_with(&[(10.0, 10.0, 50.0, 50.0), (100.0, 10.0, 50.0, 50.0)]);
    let mut clock = Clock::new();
    state.document.scene.select_all();

    // Within reach of the first item's bottom-right handle at (60, 60).
    state.pointer_press(&clock.event(56.0, 56.0));
    assert_eq!(
        state.coordinator.state(),
        DragState::Pressed(Gesture::GroupMove)
    );
    assert_eq!(state.coordinator.moving_items(), ids.as_slice());
}

#[test]
fn test_line_endpoint_handle() {
    let mut state = DesignerState::default();
    let mut line = LabelItem::new(
        ItemId(1),
        Element::Line(LabelLine::new(Point::ZERO, Point::new(100.0, 0.0))),
        Point::new(10.0, 10.0),
    );
    line.selected = true;
    state.document.scene.attach(line);
    let handles = handle_positions(state.item(ItemId(1)).unwrap());
    assert_eq!(
        handles.as_slice(),
        &[
            (Handle::Start, Point::new(10.0, 10.0)),
            (Handle::End, Point::new(110.0, 10.0))
        ]
    );

    let mut clock = Clock::new();
    drag(&mut state, &mut clock, (110.0, 10.0), (110.0, 50.0));

    assert_eq!(
        state.item(ItemId(1)).unwrap().element.geometry(),
        segment(Point::ZERO, Point::new(100.0, 40.0))
    );
    assert_eq!(state.history.undo_text(), "Resize item");
    state.undo();
    assert_eq!(
        state.item(ItemId(1)).unwrap().element.geometry(),
        segment(Point::ZERO, Point::new(100.0, 0.0))
    );
}

#[test]
fn test_polygon_vertex_drag() {
    let mut state = DesignerState::default();
    let mut polygon = LabelItem::new(
        ItemId(1),
        Element::Polygon(LabelPolygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(40.0, 10.0),
            Point::new(10.0, 40.0),
        ])),
        Point::new(100.0, 100.0),
    );
    polygon.selected = true;
    state.document.scene.attach(polygon);
    let mut clock = Clock::new();

    state.pointer_press(&clock.event(141.0, 111.0));
    assert_eq!(
        state.coordinator.state(),
        DragState::Pressed(Gesture::Vertex {
            id: ItemId(1),
            index: 1
        })
    );
    state.pointer_drag(&clock.event(150.0, 120.0));
    state.pointer_release(&clock.event(150.0, 120.0));

    let vertex = |state: &DesignerState| {
        state
            .item(ItemId(1))
            .and_then(|item| item.element.as_polygon())
            .and_then(|p| p.vertex(1))
    };
    assert_eq!(vertex(&state), Some(Point::new(50.0, 20.0)));
    assert_eq!(state.history.undo_text(), "Move polygon point");
    state.undo();
    assert_eq!(vertex(&state), Some(Point::new(40.0, 10.0)));
}

/// Triangle (0,0) (40,10) (10,40) at (100, 100), selected on its own.
fn selected_triangle() -> DesignerState {
    let mut state = DesignerState::default();
    let mut polygon = LabelItem::new(
        ItemId(1),
        Element::Polygon(LabelPolygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(40.0, 10.0),
            Point::new(10.0, 40.0),
        ])),
        Point::new(100.0, 100.0),
    );
    polygon.selected = true;
    state.document.scene.attach(polygon);
    state
}

fn points(state: &DesignerState) -> Vec<Point> {
    state
        .item(ItemId(1))
        .and_then(|item| item.element.as_polygon())
        .map(|polygon| polygon.points.clone())
        .unwrap_or_default()
}

#[test]
fn test_vertex_on_corner_handle_drags_vertex() {
    let mut state = selected_triangle();
    let mut clock = Clock::new();
    assert!(!state.document.scene.frame().is_visible());

    // Vertex 0 sits exactly on the top-left resize handle.
    state.pointer_press(&clock.event(100.0, 100.0));
    assert_eq!(
        state.coordinator.state(),
        DragState::Pressed(Gesture::Vertex {
            id: ItemId(1),
            index: 0
        })
    );
    state.pointer_drag(&clock.event(96.0, 97.0));
    state.pointer_release(&clock.event(96.0, 97.0));

    assert_eq!(state.history.undo_text(), "Move polygon point");
    let item = state.item(ItemId(1)).unwrap();
    assert_eq!(item.size(), Size::new(44.0, 43.0));
    let scene: Vec<Point> = points(&state)
        .into_iter()
        .map(|p| item.map_to_scene(p))
        .collect();
    assert_eq!(
        scene,
        vec![
            Point::new(96.0, 97.0),
            Point::new(140.0, 110.0),
            Point::new(110.0, 140.0)
        ]
    );
}

#[test]
fn test_vertex_release_reanchors_polygon() {
    let mut state = selected_triangle();
    let mut clock = Clock::new();

    // Drag vertex 2 from (110, 140) left of the bounding box.
    state.pointer_press(&clock.event(110.0, 140.0));
    state.pointer_drag(&clock.event(95.0, 150.0));
    state.pointer_release(&clock.event(95.0, 150.0));

    let moved = vec![
        Point::new(5.0, 0.0),
        Point::new(45.0, 10.0),
        Point::new(0.0, 50.0),
    ];
    assert_eq!(points(&state), moved);
    assert_eq!(pos(&state, ItemId(1)), Point::new(95.0, 100.0));
    let item = state.item(ItemId(1)).unwrap();
    assert_eq!(item.map_to_scene(moved[1]), Point::new(140.0, 110.0));
    assert_eq!(item.content_rect_scene().top_left(), Point::new(95.0, 100.0));
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history.undo_text(), "Move polygon point");

    assert!(state.undo());
    assert_eq!(
        points(&state),
        vec![
            Point::new(0.0, 0.0),
            Point::new(40.0, 10.0),
            Point::new(10.0, 40.0)
        ]
    );
    assert_eq!(pos(&state, ItemId(1)), Point::new(100.0, 100.0));

    assert!(state.redo());
    assert_eq!(points(&state), moved);
    assert_eq!(pos(&state, ItemId(1)), Point::new(95.0, 100.0));
}

#[test]
fn test_draw_rectangle() {
    let mut state = DesignerState::default();
    let mut clock = Clock::new();
    state.set_tool(ToolMode::Insert(ElementKind::Rectangle));

    // Dragged up-left: the rectangle still starts at the top-left corner.
    state.pointer_press(&clock.event(60.0, 40.0));
    state.pointer_drag(&clock.event(30.0, 20.0));
    state.pointer_drag(&clock.event(10.0, 10.0));
    state.pointer_release(&clock.event(10.0, 10.0));

    let id = ItemId(1);
    assert_eq!(pos(&state, id), Point::new(10.0, 10.0));
    assert_eq!(size(&state, id), Size::new(50.0, 30.0));
    assert_eq!(state.selected_ids(), vec![id]);
    assert_eq!(state.tool(), ToolMode::Select);
    assert_eq!(state.history.undo_text(), "Add rectangle");

    state.undo();
    assert!(state.item(id).is_none());
}

#[test]
fn test_draw_click_gets_minimum_size() {
    let mut state = DesignerState::default();
    let mut clock = Clock::new();

    state.set_tool(ToolMode::Insert(ElementKind::Ellipse));
    state.pointer_press(&clock.event(5.0, 5.0));
    state.pointer_release(&clock.event(5.0, 5.0));
    assert_eq!(size(&state, ItemId(1)), Size::new(10.0, 10.0));

    state.set_tool(ToolMode::Insert(ElementKind::Line));
    state.pointer_press(&clock.event(50.0, 50.0));
    state.pointer_release(&clock.event(50.0, 50.0));
    assert_eq!(
        state.item(ItemId(2)).unwrap().element.geometry(),
        segment(Point::ZERO, Point::new(10.0, 0.0))
    );
    assert_eq!(state.history.len(), 2);
}

#[test]
fn test_click_places_text() {
    let mut state = DesignerState::default();
    let mut clock = Clock::new();
    state.set_tool(ToolMode::Insert(ElementKind::QrCode));

    state.pointer_press(&clock.event(40.0, 30.0));
    state.pointer_release(&clock.event(40.0, 30.0));

    assert_eq!(pos(&state, ItemId(1)), Point::new(40.0, 30.0));
    assert_eq!(state.item(ItemId(1)).unwrap().kind(), ElementKind::QrCode);
    assert_eq!(state.tool(), ToolMode::Select);
    assert_eq!(state.history.undo_text(), "Add QR code");
}

#[test]
fn test_polygon_placement() {
    let mut state = DesignerState::default();
    let mut clock = Clock::new();
    state.set_tool(ToolMode::Insert(ElementKind::Polygon));

    state.pointer_press(&clock.event(100.0, 100.0));
    state.pointer_drag(&clock.event(70.0, 110.0));
    let id = state.coordinator.polygon_in_progress().unwrap();
    assert_eq!(
        state
            .item(id)
            .and_then(|i| i.element.as_polygon())
            .map(|p| p.points.clone()),
        Some(vec![Point::ZERO, Point::new(-30.0, 10.0)])
    );

    state.pointer_press(&clock.event(60.0, 120.0));
    state.pointer_press(&clock.event(80.0, 80.0));
    assert!(state.finish_polygon(&clock.event(80.0, 80.0)));

    let item = state.item(id).unwrap();
    assert_eq!(item.pos, Point::new(60.0, 80.0));
    assert_eq!(
        item.element.as_polygon().unwrap().points,
        vec![
            Point::new(40.0, 20.0),
            Point::new(0.0, 40.0),
            Point::new(20.0, 0.0)
        ]
    );
    assert!(item.selected);
    assert_eq!(state.tool(), ToolMode::Select);
    assert_eq!(state.history.undo_text(), "Add polygon");
    assert!(state.coordinator.polygon_in_progress().is_none());
}

#[test]
fn test_polygon_with_two_points_is_discarded() {
    let mut state = DesignerState::default();
    let mut clock = Clock::new();
    state.set_tool(ToolMode::Insert(ElementKind::Polygon));

    state.pointer_press(&clock.event(0.0, 0.0));
    state.pointer_press(&clock.event(10.0, 0.0));
    assert!(!state.finish_polygon(&clock.event(10.0, 0.0)));

    assert!(state.document.scene.is_empty());
    assert!(state.history.is_empty());
}

#[test]
fn test_switching_tool_discards_unfinished_polygon() {
    let mut state = DesignerState::default();
    let mut clock = Clock::new();
    state.set_tool(ToolMode::Insert(ElementKind::Polygon));
    state.pointer_press(&clock.event(0.0, 0.0));
    assert_eq!(state.document.scene.len(), 1);

    state.set_tool(ToolMode::Select);
    assert!(state.document.scene.is_empty());
    assert!(state.coordinator.polygon_in_progress().is_none());
}

#[test]
fn test_drag_snaps_to_label_centre() {
    let (mut state, ids) = state_with(&[(0.0, 300.0, 40.0, 20.0)]);
    state.set_label_rect(Some(Rect::new(0.0, 0.0, 200.0, 100.0)));
    let mut clock = Clock::new();

    state.pointer_press(&clock.event(10.0, 310.0));
    state.pointer_drag(&clock.event(88.0, 310.0));
    assert_eq!(pos(&state, ids[0]), Point::new(80.0, 300.0));
    let guide = state.item(ids[0]).unwrap().guides().vertical.unwrap();
    assert_eq!(guide.from, Point::new(100.0, 0.0));

    state.pointer_release(&clock.event(88.0, 310.0));
    assert!(state.item(ids[0]).unwrap().guides().is_empty());
    assert_eq!(pos(&state, ids[0]), Point::new(80.0, 300.0));

    state.undo();
    assert_eq!(pos(&state, ids[0]), Point::new(0.0, 300.0));
}

#[test]
fn test_alt_drag_does_not_snap() {
    let (mut state, ids) = state_with(&[(0.0, 300.0, 40.0, 20.0)]);
    state.set_label_rect(Some(Rect::new(0.0, 0.0, 200.0, 100.0)));
    let mut clock = Clock::new();
    let alt = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };

    state.pointer_press(&clock.event(10.0, 310.0));
    state.pointer_drag(&clock.event(88.0, 310.0).with_modifiers(alt));
    state.pointer_release(&clock.event(88.0, 310.0).with_modifiers(alt));

    assert_eq!(pos(&state, ids[0]), Point::new(78.0, 300.0));
}

#[test]
fn test_quick_successive_drags_merge() {
    let (mut state, ids) = state_with(&[(10.0, 10.0, 50.0, 50.0)]);
    let mut clock = Clock::new();

    drag(&mut state, &mut clock, (30.0, 30.0), (32.0, 30.0));
    drag(&mut state, &mut clock, (32.0, 30.0), (34.0, 30.0));

    assert_eq!(pos(&state, ids[0]), Point::new(14.0, 10.0));
    assert_eq!(state.history.len(), 1);
    state.undo();
    assert_eq!(pos(&state, ids[0]), Point::new(10.0, 10.0));
}

#[test]
fn test_slow_successive_drags_stay_separate() {
    let (mut state, ids) = state_with(&[(10.0, 10.0, 50.0, 50.0)]);
    let mut clock = Clock::new();

    drag(&mut state, &mut clock, (30.0, 30.0), (32.0, 30.0));
    clock.advance(2_000);
    drag(&mut state, &mut clock, (32.0, 30.0), (34.0, 30.0));

    assert_eq!(state.history.len(), 2);
    state.undo();
    assert_eq!(pos(&state, ids[0]), Point::new(12.0, 10.0));
}
