use labelkit_core::{Point, Rect};
use labelkit_designer::{find_snap, Alignable, ItemId, Modifiers, SnapContext, SnapTarget};

use crate::support::{approx, document_with, rect_item};

fn ctx(background: Option<Rect>, targets: &[(u64, Rect)]) -> SnapContext {
    SnapContext {
        background,
        targets: targets
            .iter()
            .map(|(id, rect)| SnapTarget {
                id: ItemId(*id),
                rect: *rect,
            })
            .collect(),
        threshold: 5.0,
        enabled: true,
    }
}

#[test]
fn test_left_edge_snaps_exactly() {
    let mut mover = rect_item(1, 97.0, 300.0, 40.0, 20.0);
    let other = Rect::new(100.0, 0.0, 60.0, 60.0);

    let delta = mover.check_and_apply_snap(&ctx(None, &[(2, other)]));

    assert_eq!(mover.content_rect_scene().left(), 100.0);
    assert!(approx(delta.x, 3.0));
    assert_eq!(delta.y, 0.0);
    let guide = mover.guides().vertical.unwrap();
    assert_eq!(guide.from.x, 100.0);
    assert_eq!(guide.to.x, 100.0);
    // The guide spans both rectangles vertically.
    assert_eq!(guide.from.y, 0.0);
    assert_eq!(guide.to.y, 320.0);
}

#[test]
fn test_threshold_is_strict() {
    let mut mover = rect_item(1, 95.0, 300.0, 40.0, 20.0);
    // Left edges are exactly 5 apart; nothing else lines up.
    let other = Rect::new(100.0, 0.0, 200.0, 60.0);

    let delta = mover.check_and_apply_snap(&ctx(None, &[(2, other)]));

    assert_eq!(delta, Point::ZERO);
    assert_eq!(mover.pos, Point::new(95.0, 300.0));
    assert!(mover.guides().is_empty());
}

#[test]
fn test_background_is_checked_first() {
    let label = Rect::new(0.0, 0.0, 200.0, 100.0);
    // Centre X is 2 off the label centre and 1 off the sibling's left edge.
    let mut mover = rect_item(1, 82.0, 300.0, 40.0, 20.0);
    let sibling = Rect::new(101.0, 0.0, 10.0, 10.0);

    mover.check_and_apply_snap(&ctx(Some(label), &[(2, sibling)]));

    assert_eq!(mover.content_rect_scene().center().x, 100.0);
    let guide = mover.guides().vertical.unwrap();
    assert_eq!(guide.from, Point::new(100.0, 0.0));
    assert_eq!(guide.to, Point::new(100.0, 100.0));
}

#[test]
fn test_both_axes_snap_to_different_candidates() {
    let mut mover = rect_item(1, 48.0, 203.0, 20.0, 20.0);
    let a = Rect::new(50.0, 0.0, 20.0, 20.0);
    let b = Rect::new(400.0, 200.0, 10.0, 10.0);

    mover.check_and_apply_snap(&ctx(None, &[(2, a), (3, b)]));

    assert_eq!(mover.pos, Point::new(50.0, 200.0));
    assert!(mover.guides().vertical.is_some());
    let horizontal = mover.guides().horizontal.unwrap();
    assert_eq!(horizontal.from, Point::new(50.0, 200.0));
    assert_eq!(horizontal.to, Point::new(410.0, 200.0));
}

#[test]
fn test_topmost_sibling_wins() {
    // Both siblings are within range of the mover's centre X; the later one
    // is drawn on top.
    let (mut doc, ids) = document_with(&[
        (200.0, 0.0, 20.0, 20.0),
        (203.0, 300.0, 20.0, 20.0),
        (201.0, 150.0, 20.0, 20.0),
    ]);
    let targets: Vec<ItemId> = doc.scene.snap_context().targets.iter().map(|t| t.id).collect();
    assert_eq!(targets, vec![ids[2], ids[1], ids[0]]);

    let mut mover = doc.scene.item(ids[2]).unwrap().clone();
    mover.check_and_apply_snap(&doc.scene.snap_context());
    assert_eq!(mover.pos, Point::new(203.0, 150.0));

    assert!(doc.scene.bring_to_front(ids[0]));
    let mut mover = doc.scene.item(ids[2]).unwrap().clone();
    mover.check_and_apply_snap(&doc.scene.snap_context());
    assert_eq!(mover.pos, Point::new(200.0, 150.0));
}

#[test]
fn test_never_snaps_to_itself() {
    let mut mover = rect_item(1, 97.0, 0.0, 40.0, 20.0);
    let own = Rect::new(100.0, 0.0, 40.0, 20.0);
    let delta = mover.check_and_apply_snap(&ctx(None, &[(1, own)]));
    assert_eq!(delta, Point::ZERO);
}

#[test]
fn test_locked_mover_does_not_snap_but_stays_a_target() {
    let mut locked = rect_item(1, 97.0, 300.0, 40.0, 20.0);
    locked.set_locked(true);
    let target = Rect::new(100.0, 0.0, 60.0, 60.0);
    let delta = locked.check_and_apply_snap(&ctx(None, &[(2, target)]));
    assert_eq!(delta, Point::ZERO);
    assert!(locked.guides().is_empty());

    // Another item snaps against the locked one.
    let mut mover = rect_item(3, 0.0, 302.0, 10.0, 20.0);
    mover.check_and_apply_snap(&ctx(None, &[(1, locked.content_rect_scene())]));
    assert_eq!(mover.pos.y, 300.0);
}

#[test]
fn test_disabled_alignment_clears_guides() {
    let mut mover = rect_item(1, 97.0, 300.0, 40.0, 20.0);
    let other = Rect::new(100.0, 0.0, 60.0, 60.0);
    mover.check_and_apply_snap(&ctx(None, &[(2, other)]));
    assert!(!mover.guides().is_empty());

    mover.set_alignment_enabled(false);
    assert!(mover.guides().is_empty());
    mover.set_pos(Point::new(96.0, 300.0));
    assert_eq!(mover.check_and_apply_snap(&ctx(None, &[(2, other)])), Point::ZERO);

    mover.set_alignment_enabled(true);
    let mut global_off = ctx(None, &[(2, other)]);
    global_off.enabled = false;
    assert_eq!(mover.check_and_apply_snap(&global_off), Point::ZERO);
    assert!(mover.guides().is_empty());
}

#[test]
fn test_alt_suppresses_snapping() {
    let mut mover = rect_item(1, 97.0, 300.0, 40.0, 20.0);
    let other = Rect::new(100.0, 0.0, 60.0, 60.0);
    let alt = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };

    let delta = mover.handle_move_for_alignment(&ctx(None, &[(2, other)]), alt);

    assert_eq!(delta, Point::ZERO);
    assert_eq!(mover.pos.x, 97.0);
    assert!(mover.guides().is_empty());
}

#[test]
fn test_release_clears_guides() {
    let mut mover = rect_item(1, 97.0, 300.0, 40.0, 20.0);
    mover.handle_move_for_alignment(
        &ctx(None, &[(2, Rect::new(100.0, 0.0, 60.0, 60.0))]),
        Modifiers::NONE,
    );
    assert!(!mover.guides().is_empty());
    mover.handle_release_for_alignment();
    assert!(mover.guides().is_empty());
}

#[test]
fn test_find_snap_adjacent_edges() {
    // Right edge of the mover 2 left of the candidate's left edge.
    let outcome = find_snap(
        Rect::new(0.0, 500.0, 48.0, 10.0),
        None,
        &[Rect::new(50.0, 0.0, 100.0, 100.0)],
        5.0,
    );
    let x = outcome.x.unwrap();
    assert_eq!(x.value, 48.0);
    assert_eq!(x.target, 50.0);
    assert_eq!(outcome.delta(), Point::new(2.0, 0.0));
    assert!(outcome.y.is_none());
}
